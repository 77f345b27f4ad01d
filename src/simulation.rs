//! One-shot Monte Carlo estimate of both strategies
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TRIALS, Z_95};
use crate::estimate::Estimate;
use crate::result::{MontyError, Result};
use crate::strategy::Strategy;
use crate::trial::TrialSet;
use rand::Rng;
use std::fmt;

/// Simulation settings
///
/// # Example
///
/// ```
/// # use monty::simulation::Simulation;
/// let report = Simulation::new(1_000).with_seed(7).run().unwrap();
/// assert_eq!(report.trials(), 1_000);
/// assert_eq!(report, Simulation::new(1_000).with_seed(7).run().unwrap());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Simulation {
    n_trials: usize,
    seed: Option<u64>,
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new(DEFAULT_TRIALS)
    }
}

impl Simulation {
    pub fn new(n_trials: usize) -> Self {
        Simulation {
            n_trials,
            seed: None,
        }
    }

    /// Draw trials reproducibly from `seed` instead of the thread RNG
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn validate(&self) -> Result<()> {
        if self.n_trials == 0 {
            Err(MontyError::InvalidTrialCount(self.n_trials))
        } else {
            Ok(())
        }
    }

    /// Draw the trial set for this simulation
    pub fn draw_trials(&self) -> Result<TrialSet> {
        self.validate()?;
        let trials = match self.seed {
            Some(seed) => TrialSet::from_seed(self.n_trials, seed),
            None => TrialSet::generate(self.n_trials, &mut rand::thread_rng()),
        };
        Ok(trials)
    }

    /// Draw trials and evaluate both strategies over them
    pub fn run(&self) -> Result<Report> {
        let trials = self.draw_trials()?;
        Report::from_trials(&trials, self.seed)
    }

    /// Like `run`, drawing trials from `rng`. The configured seed is
    /// ignored.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<Report> {
        self.validate()?;
        let trials = TrialSet::generate(self.n_trials, rng);
        Report::from_trials(&trials, None)
    }
}

/// Estimated win probabilities of both strategies over the same trials
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde1",
    serde(rename_all = "snake_case", try_from = "ReportParts")
)]
pub struct Report {
    trials: usize,
    #[cfg_attr(feature = "serde1", serde(skip_serializing_if = "Option::is_none", default))]
    seed: Option<u64>,
    stay: Estimate,
    switch: Estimate,
}

/// Unchecked fields of a deserialized `Report`
#[cfg(feature = "serde1")]
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct ReportParts {
    trials: usize,
    #[serde(default)]
    seed: Option<u64>,
    stay: Estimate,
    switch: Estimate,
}

#[cfg(feature = "serde1")]
impl TryFrom<ReportParts> for Report {
    type Error = MontyError;

    fn try_from(parts: ReportParts) -> Result<Self> {
        if parts.trials == 0 {
            return Err(MontyError::EmptyTrialSet);
        }
        for est in [&parts.stay, &parts.switch] {
            if est.trials() != parts.trials {
                return Err(MontyError::TrialCountMismatch {
                    expected: parts.trials,
                    found: est.trials(),
                });
            }
        }
        Ok(Report {
            trials: parts.trials,
            seed: parts.seed,
            stay: parts.stay,
            switch: parts.switch,
        })
    }
}

impl Report {
    /// Evaluate both strategies over `trials`
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::simulation::Report;
    /// # use monty::trial::TrialSet;
    /// let trials = TrialSet::from_indices(&[0, 1, 2], &[0, 0, 0]).unwrap();
    /// let report = Report::from_trials(&trials, None).unwrap();
    /// assert::close(report.p_stay(), 1.0 / 3.0, 1E-12);
    /// assert::close(report.p_switch(), 2.0 / 3.0, 1E-12);
    /// ```
    pub fn from_trials(trials: &TrialSet, seed: Option<u64>) -> Result<Self> {
        if trials.is_empty() {
            return Err(MontyError::EmptyTrialSet);
        }

        let report = Report {
            trials: trials.len(),
            seed,
            stay: Strategy::Stay.evaluate(trials),
            switch: Strategy::Switch.evaluate(trials),
        };
        tracing::debug!(
            trials = report.trials,
            p_stay = report.p_stay(),
            p_switch = report.p_switch(),
            "simulation complete"
        );
        Ok(report)
    }

    #[inline]
    pub fn trials(&self) -> usize {
        self.trials
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn estimate(&self, strategy: Strategy) -> &Estimate {
        match strategy {
            Strategy::Stay => &self.stay,
            Strategy::Switch => &self.switch,
        }
    }

    /// Empirical win probability of staying
    pub fn p_stay(&self) -> f64 {
        self.p(Strategy::Stay)
    }

    /// Empirical win probability of switching
    pub fn p_switch(&self) -> f64 {
        self.p(Strategy::Switch)
    }

    // A report always covers at least one trial, so `p` is defined
    fn p(&self, strategy: Strategy) -> f64 {
        self.estimate(strategy).p().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trials: {}", self.trials)?;
        if let Some(seed) = self.seed {
            write!(f, " (seed {})", seed)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<8} {:>10} {:>12} {:>19}",
            "strategy", "estimate", "theoretical", "95% interval"
        )?;
        for strategy in Strategy::ALL {
            let est = self.estimate(strategy);
            let (lo, hi) =
                est.conf_interval(Z_95).map_err(|_| fmt::Error)?;
            writeln!(
                f,
                "{:<8} {:>10.4} {:>12.4}    [{:.4}, {:.4}]",
                strategy.to_string(),
                self.p(strategy),
                strategy.theoretical_win_prob(),
                lo,
                hi
            )?;
        }
        Ok(())
    }
}
