use std::ops::RangeInclusive;

use thiserror::Error;

use crate::Age;
use crate::rule_set::B3S23;
use crate::rule_set::RuleSet;

/// Default age ceiling. Cells stop getting lighter once they reach it.
pub const DEFAULT_MAX_AGE: Age = 20;

/// Default bounds (inclusive) on the height and width of a random grid.
pub const DEFAULT_SIZE_RANGE: RangeInclusive<usize> = 40..=60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Max age must be at least 1")]
    ZeroMaxAge,

    #[error("Size range {lo}..={hi} is empty")]
    EmptySizeRange { lo: usize, hi: usize },

    #[error("Size range must not include 0")]
    ZeroSize,
}

/// Knobs shared by the engine and the random grid generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_age: Age,
    pub size_range: RangeInclusive<usize>,
    pub rule: RuleSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            size_range: DEFAULT_SIZE_RANGE,
            rule: B3S23,
        }
    }
}

impl Config {
    pub fn new(max_age: Age, size_range: RangeInclusive<usize>) -> Result<Self, ConfigError> {
        if max_age == 0 {
            return Err(ConfigError::ZeroMaxAge);
        }

        let (lo, hi) = (*size_range.start(), *size_range.end());
        if lo > hi {
            return Err(ConfigError::EmptySizeRange { lo, hi });
        }

        if lo == 0 {
            return Err(ConfigError::ZeroSize);
        }

        Ok(Self {
            max_age,
            size_range,
            rule: B3S23,
        })
    }

    pub fn with_rule(mut self, rule: RuleSet) -> Self {
        self.rule = rule;
        self
    }
}
