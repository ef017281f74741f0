//! Analyzer configuration.
//!
//! Every field has a default, so an empty TOML file (or no file at all)
//! gives the stock behavior.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matching::MAX_MATCHES;
use crate::scoring::ScoreWeights;
use crate::symmetry::SymmetryConfig;
use crate::tips::{TipLimits, FREE_TIP_LIMIT, PREMIUM_TIP_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Maximum number of celebrity matches returned, at most [`MAX_MATCHES`].
    pub max_matches: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_matches: MAX_MATCHES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// JSON tip catalog. No catalog means no tips.
    pub tips_catalog: Option<PathBuf>,
    /// JSON celebrity catalog. No catalog means no matches.
    pub celebrity_catalog: Option<PathBuf>,
    pub symmetry: SymmetryConfig,
    pub weights: ScoreWeights,
    pub tips: TipLimits,
    pub matching: MatchingConfig,
    /// Reject faces whose frontal ratio falls outside `frontal_ratio_bounds`.
    pub require_frontal: bool,
    pub frontal_ratio_bounds: [f64; 2],
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            tips_catalog: None,
            celebrity_catalog: None,
            symmetry: SymmetryConfig::default(),
            weights: ScoreWeights::default(),
            tips: TipLimits::default(),
            matching: MatchingConfig::default(),
            require_frontal: false,
            frontal_ratio_bounds: [0.5, 2.0],
        }
    }
}

impl AnalyzerConfig {
    /// Read and validate a TOML config.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Limits may be tightened but never raised above the built-in caps.
    pub fn validate(&self) -> Result<()> {
        check_cap("tips.free_limit", self.tips.free_limit, FREE_TIP_LIMIT)?;
        check_cap("tips.premium_limit", self.tips.premium_limit, PREMIUM_TIP_LIMIT)?;
        check_cap("matching.max_matches", self.matching.max_matches, MAX_MATCHES)?;

        let [low, high] = self.frontal_ratio_bounds;
        if !(low.is_finite() && high.is_finite() && 0.0 <= low && low <= high) {
            return Err(Error::InvalidConfig {
                field: "frontal_ratio_bounds",
                reason: format!("[{low}, {high}] is not an ordered non-negative range"),
            });
        }
        Ok(())
    }

    pub fn is_frontal(&self, ratio: f64) -> bool {
        let [low, high] = self.frontal_ratio_bounds;
        (low..=high).contains(&ratio)
    }
}

fn check_cap(field: &'static str, value: usize, cap: usize) -> Result<()> {
    if value > cap {
        return Err(Error::InvalidConfig {
            field,
            reason: format!("{value} exceeds the maximum of {cap}"),
        });
    }
    Ok(())
}
