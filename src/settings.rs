//! Configuration types for the translation estimators.
//!
//! Every estimator receives its settings explicitly; nothing is read from
//! process-wide state. Defaults are documented on each field and can be
//! overridden piecemeal when loading from a host configuration file, since
//! all structs deserialize with `#[serde(default)]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AlignmentError, Result};

/// Which estimator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodType {
    /// Sampled voting over correspondence candidates.
    Stochastic,
    /// Maximum clique of the pairwise consistency graph.
    #[serde(alias = "pmc", alias = "clique")]
    MaximumClique,
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodType::Stochastic => f.write_str("stochastic"),
            MethodType::MaximumClique => f.write_str("maximum_clique"),
        }
    }
}

impl FromStr for MethodType {
    type Err = AlignmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stochastic" => Ok(MethodType::Stochastic),
            "maximum_clique" | "max_clique" | "clique" | "pmc" => Ok(MethodType::MaximumClique),
            other => Err(AlignmentError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Cost used to rank stochastic translation candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringType {
    /// Mean squared residual over the `|target|` best-matching correspondences.
    TruncatedMean,
    /// Sum of every residual length. Penalises unmatched points.
    SumOfLengths,
}

/// How the stochastic estimator picks its voting source points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSelection {
    /// Draw `floor(ratio * |source|)` points without replacement; ratio in (0, 1].
    Ratio(f64),
    /// Use exactly these source indices.
    Indices(Vec<usize>),
}

/// Settings for the stochastic estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticSettings {
    /// Voting subset. Default: every source point (`Ratio(1.0)`).
    pub selection: SourceSelection,
    /// RNG seed for `SourceSelection::Ratio`. Default: 42.
    pub seed: u64,
    /// Candidate cost. Default: `TruncatedMean`.
    pub scoring: ScoringType,
}

impl Default for StochasticSettings {
    fn default() -> Self {
        Self {
            selection: SourceSelection::Ratio(1.0),
            seed: 42,
            scoring: ScoringType::TruncatedMean,
        }
    }
}

impl StochasticSettings {
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.selection = SourceSelection::Ratio(ratio);
        self
    }

    pub fn with_indices(mut self, indices: Vec<usize>) -> Self {
        self.selection = SourceSelection::Indices(indices);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringType) -> Self {
        self.scoring = scoring;
        self
    }

    /// Validate against the size of the source set the settings will be used with.
    pub fn validate(&self, source_len: usize) -> Result<()> {
        match &self.selection {
            SourceSelection::Ratio(ratio) => {
                if !(ratio.is_finite() && *ratio > 0.0 && *ratio <= 1.0) {
                    return Err(AlignmentError::InvalidInput(format!(
                        "sampling ratio must lie in (0, 1], got {ratio}"
                    )));
                }
            }
            SourceSelection::Indices(indices) => {
                if indices.len() > source_len {
                    return Err(AlignmentError::InvalidInput(format!(
                        "sample of {} indices exceeds source set of {source_len} points",
                        indices.len()
                    )));
                }
                if let Some(&bad) = indices.iter().find(|&&i| i >= source_len) {
                    return Err(AlignmentError::InvalidInput(format!(
                        "source index {bad} out of range for {source_len} points"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Settings for the maximum-clique estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliqueSettings {
    /// Pairwise consistency threshold, in point-coordinate units. Default: 1.0.
    pub epsilon: f64,
    /// Skip candidates dominated by an already explored node. Default: true.
    pub dominance_pruning: bool,
    /// Excluded nodes tested per candidate during dominance pruning. Default: 16.
    pub max_dominance_checks: usize,
    /// Seed the incumbent with a greedy clique before searching. Default: true.
    pub greedy_initial_clique: bool,
    /// Stop after this many branches and return the incumbent. Default: unbounded.
    pub max_branches: Option<usize>,
}

impl Default for CliqueSettings {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            dominance_pruning: true,
            max_dominance_checks: 16,
            greedy_initial_clique: true,
            max_branches: None,
        }
    }
}

impl CliqueSettings {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_branches(mut self, max_branches: usize) -> Self {
        self.max_branches = Some(max_branches);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(AlignmentError::InvalidInput(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Top-level configuration: which estimator runs and with what parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentSettings {
    /// Default: `MaximumClique`.
    pub method: MethodType,
    pub stochastic: StochasticSettings,
    pub clique: CliqueSettings,
}

impl Default for AlignmentSettings {
    fn default() -> Self {
        Self {
            method: MethodType::MaximumClique,
            stochastic: StochasticSettings::default(),
            clique: CliqueSettings::default(),
        }
    }
}

impl AlignmentSettings {
    pub fn stochastic(settings: StochasticSettings) -> Self {
        Self {
            method: MethodType::Stochastic,
            stochastic: settings,
            ..Self::default()
        }
    }

    pub fn clique(settings: CliqueSettings) -> Self {
        Self {
            method: MethodType::MaximumClique,
            clique: settings,
            ..Self::default()
        }
    }
}
