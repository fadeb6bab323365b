//! Configuration for the correlation engine
//!
//! Pass multipliers, the acceptance threshold, and the knobs that control
//! feature extraction and local-part consumption.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CorrelateError, Result};

/// Hard ceiling on the number of words fed to prefix permutation.
pub const PREFIX_WORD_CAP: usize = 5;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Multiplier applied to each pass's raw match count
    pub weights: PassWeights,
    /// A pair is recorded only when its total weight exceeds this
    pub acceptance_threshold: f64,
    /// Shortest word truncation added to the full-word family
    pub min_truncation: usize,
    /// Names with more prefix-bearing words than this skip the combination pass
    pub max_prefix_words: usize,
    /// Which characters survive local-part sanitization
    pub strictness: Strictness,
    /// How matched probes are removed from the working copy
    pub consumption: ConsumptionMode,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            weights: PassWeights::default(),
            acceptance_threshold: 0.8,
            min_truncation: 4,
            max_prefix_words: PREFIX_WORD_CAP,
            strictness: Strictness::default(),
            consumption: ConsumptionMode::default(),
        }
    }
}

/// Per-pass multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassWeights {
    /// Full words and their truncations; contiguous letters, boosted
    pub full_word: f64,
    /// Reversed full words and truncations
    pub reversed: f64,
    /// Concatenated 2-3 letter word prefixes
    pub prefix_combination: f64,
    /// Initials in name order, contiguous
    pub ordered_initials: f64,
    /// Initials in any order
    pub unordered_initials: f64,
}

impl Default for PassWeights {
    fn default() -> Self {
        Self {
            full_word: 1.2,
            reversed: 1.2,
            prefix_combination: 1.0,
            ordered_initials: 0.85,
            unordered_initials: 0.80,
        }
    }
}

impl PassWeights {
    fn iter(&self) -> [(&'static str, f64); 5] {
        [
            ("full_word", self.full_word),
            ("reversed", self.reversed),
            ("prefix_combination", self.prefix_combination),
            ("ordered_initials", self.ordered_initials),
            ("unordered_initials", self.unordered_initials),
        ]
    }
}

/// Local-part sanitization mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    /// Keep only `A-Za-z`
    #[default]
    Alphabetic,
    /// Keep word characters (letters, digits, underscore)
    Word,
}

/// Removal strategy for matched probes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsumptionMode {
    /// Remove every occurrence of each matched substring
    #[default]
    Global,
    /// Remove only the spans that actually matched
    SpanLocal,
}

impl CorrelationConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| CorrelateError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CorrelateError::ConfigParse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (name, weight) in self.weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight(format!(
                    "{name} must be a finite non-negative number, got {weight}"
                )));
            }
        }

        if !self.acceptance_threshold.is_finite() || self.acceptance_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(format!(
                "acceptance_threshold must be a finite non-negative number, got {}",
                self.acceptance_threshold
            )));
        }

        if self.min_truncation == 0 {
            return Err(ConfigError::OutOfRange(
                "min_truncation must be positive".to_string(),
            ));
        }

        // Permutations grow factorially, so the cap can only be lowered.
        if self.max_prefix_words == 0 || self.max_prefix_words > PREFIX_WORD_CAP {
            return Err(ConfigError::OutOfRange(format!(
                "max_prefix_words must be between 1 and {PREFIX_WORD_CAP}, got {}",
                self.max_prefix_words
            )));
        }

        Ok(())
    }
}
