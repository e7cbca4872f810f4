//! Run policies: the stopping rules that drive a walk to completion.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default per-step stop probability of [`RunPolicy::EarlyStop`].
pub const DEFAULT_STOP_PROBABILITY: f64 = 0.1;

/// Stopping rule for a single walk.
///
/// | Policy | Stops when |
/// |--------|------------|
/// | `Unrestricted` | the walk is trapped |
/// | `Bounded` | a target length drawn from `[1, total_points)` is reached, or trapped |
/// | `EarlyStop` | a per-step `[0, 1)` draw falls below `stop_probability`, or trapped |
///
/// Every policy records the number of legal moves at each step; the walk's
/// weight is their product.
///
/// # Examples
///
/// ```rust
/// use saw_engine::walker::RunPolicy;
///
/// let policy: RunPolicy = "early-stop".parse().unwrap();
/// assert_eq!(policy, RunPolicy::EarlyStop { stop_probability: 0.1 });
///
/// // Numeric method ids 1, 2 and 3 are accepted too
/// assert_eq!("2".parse::<RunPolicy>().unwrap(), RunPolicy::Bounded);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RunPolicy {
    /// Walk until trapped.
    #[default]
    Unrestricted,

    /// Walk until a uniformly drawn target length is reached or trapped.
    Bounded,

    /// Walk until trapped, stopping early with a fixed per-step probability.
    EarlyStop {
        /// Probability in `[0, 1)` of stopping before each step.
        stop_probability: f64,
    },
}

impl RunPolicy {
    /// Early stop with [`DEFAULT_STOP_PROBABILITY`].
    #[inline]
    pub fn early_stop() -> Self {
        Self::EarlyStop {
            stop_probability: DEFAULT_STOP_PROBABILITY,
        }
    }

    /// Early stop with a custom probability.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStopProbability`] unless
    /// `0 <= stop_probability < 1`.
    pub fn early_stop_with(stop_probability: f64) -> Result<Self, ConfigError> {
        let policy = Self::EarlyStop { stop_probability };
        policy.validate()?;
        Ok(policy)
    }

    /// Checks the policy parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStopProbability`] for an early-stop
    /// probability outside `[0, 1)` (NaN included).
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::EarlyStop { stop_probability } if !(0.0..1.0).contains(&stop_probability) => {
                Err(ConfigError::InvalidStopProbability(stop_probability))
            }
            _ => Ok(()),
        }
    }

    /// Short kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unrestricted => "unrestricted",
            Self::Bounded => "bounded",
            Self::EarlyStop { .. } => "early-stop",
        }
    }

    /// The stop probability, if this is an early-stop policy.
    pub fn stop_probability(&self) -> Option<f64> {
        match *self {
            Self::EarlyStop { stop_probability } => Some(stop_probability),
            _ => None,
        }
    }
}

impl fmt::Display for RunPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EarlyStop { stop_probability } => {
                write!(f, "{} (p={})", self.name(), stop_probability)
            }
            _ => write!(f, "{}", self.name()),
        }
    }
}

impl FromStr for RunPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unrestricted" | "1" => Ok(Self::Unrestricted),
            "bounded" | "2" => Ok(Self::Bounded),
            "early-stop" | "early_stop" | "earlystop" | "3" => Ok(Self::early_stop()),
            other => Err(ConfigError::InvalidParameter {
                name: "policy",
                value: format!(
                    "unknown policy '{}'. Supported: unrestricted, bounded, early-stop (or 1, 2, 3)",
                    other
                ),
            }),
        }
    }
}
