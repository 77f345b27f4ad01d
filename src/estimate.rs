//! Empirical win probabilities
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::result::{MontyError, Result};
use std::fmt;

/// Wins counted over a number of trials
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde1",
    serde(rename_all = "snake_case", try_from = "EstimateParts")
)]
pub struct Estimate {
    wins: usize,
    trials: usize,
}

/// Unchecked fields of a deserialized `Estimate`
#[cfg(feature = "serde1")]
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct EstimateParts {
    wins: usize,
    trials: usize,
}

#[cfg(feature = "serde1")]
impl TryFrom<EstimateParts> for Estimate {
    type Error = MontyError;

    fn try_from(parts: EstimateParts) -> Result<Self> {
        Estimate::new(parts.wins, parts.trials)
    }
}

impl Estimate {
    /// Create a new estimate. `wins` must not exceed `trials`.
    #[inline]
    pub fn new(wins: usize, trials: usize) -> Result<Self> {
        if wins > trials {
            Err(MontyError::WinsExceedTrials { wins, trials })
        } else {
            Ok(Estimate { wins, trials })
        }
    }

    /// Tally the `true` outcomes
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::estimate::Estimate;
    /// let est = Estimate::from_outcomes([true, false, false, true]);
    /// assert_eq!(est.wins(), 2);
    /// assert_eq!(est.trials(), 4);
    /// ```
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let (wins, trials) = outcomes
            .into_iter()
            .fold((0, 0), |(wins, trials), win| {
                (wins + usize::from(win), trials + 1)
            });
        Estimate { wins, trials }
    }

    #[inline]
    pub fn wins(&self) -> usize {
        self.wins
    }

    #[inline]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// The empirical win probability, wins / trials
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::estimate::Estimate;
    /// let est = Estimate::new(1, 4).unwrap();
    /// assert::close(est.p().unwrap(), 0.25, 1E-12);
    ///
    /// assert!(Estimate::new(0, 0).unwrap().p().is_err());
    /// ```
    pub fn p(&self) -> Result<f64> {
        if self.trials == 0 {
            Err(MontyError::EmptyTrialSet)
        } else {
            Ok(self.wins as f64 / self.trials as f64)
        }
    }

    /// Binomial standard error of `p`, sqrt(p(1 - p) / n)
    pub fn std_err(&self) -> Result<f64> {
        let p = self.p()?;
        Ok((p * (1.0 - p) / self.trials as f64).sqrt())
    }

    /// Normal-approximation interval `p ± z·se`, clamped to [0, 1]
    pub fn conf_interval(&self, z: f64) -> Result<(f64, f64)> {
        let p = self.p()?;
        let half = z * self.std_err()?;
        Ok(((p - half).max(0.0), (p + half).min(1.0)))
    }

    /// Absolute difference between `p` and `expected`
    pub fn abs_error(&self, expected: f64) -> Result<f64> {
        self.p().map(|p| (p - expected).abs())
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.p() {
            Ok(p) => write!(f, "{:.4} ({}/{})", p, self.wins, self.trials),
            Err(_) => write!(f, "undefined (0 trials)"),
        }
    }
}
