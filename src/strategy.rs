//! Contestant strategies and their evaluation over a trial set
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::{P_STAY, P_SWITCH};
use crate::door::Door;
use crate::estimate::Estimate;
use crate::trial::{Trial, TrialSet};
use std::fmt;

/// What the contestant does after the host opens a goat door
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Keep the initial pick
    Stay,
    /// Take the one remaining unopened door
    Switch,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Stay, Strategy::Switch];

    /// The door the contestant ends the trial with
    #[inline]
    pub fn final_door(&self, trial: &Trial) -> Door {
        match self {
            Strategy::Stay => trial.pick,
            Strategy::Switch => trial.switched(),
        }
    }

    /// Whether the contestant wins `trial`
    #[inline]
    pub fn wins(&self, trial: &Trial) -> bool {
        self.final_door(trial) == trial.prize
    }

    /// Exact win probability under uniform prize placement
    pub fn theoretical_win_prob(&self) -> f64 {
        match self {
            Strategy::Stay => P_STAY,
            Strategy::Switch => P_SWITCH,
        }
    }

    /// Count the trials won by this strategy.
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::strategy::Strategy;
    /// # use monty::trial::TrialSet;
    /// let trials = TrialSet::from_indices(&[0, 1, 2], &[0, 0, 0]).unwrap();
    ///
    /// let stay = Strategy::Stay.evaluate(&trials);
    /// assert_eq!(stay.wins(), 1);
    ///
    /// let switch = Strategy::Switch.evaluate(&trials);
    /// assert_eq!(switch.wins(), 2);
    /// ```
    pub fn evaluate(&self, trials: &TrialSet) -> Estimate {
        let est = match self {
            Strategy::Stay => stay_estimate(trials),
            Strategy::Switch => switch_estimate(trials),
        };
        tracing::debug!(
            strategy = %self,
            wins = est.wins(),
            trials = est.trials(),
            "evaluated strategy"
        );
        est
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Stay => write!(f, "stay"),
            Strategy::Switch => write!(f, "switch"),
        }
    }
}

/// Elementwise comparison of the prize and pick columns
pub fn stay_estimate(trials: &TrialSet) -> Estimate {
    let prize = trials.prize_doors();
    let pick = trials.initial_picks();
    Estimate::from_outcomes(prize.iter().zip(pick.iter()).map(|(a, b)| a == b))
}

/// Resolve the switched door of every trial, then compare it with the
/// prize column
pub fn switch_estimate(trials: &TrialSet) -> Estimate {
    let prize = trials.prize_doors();
    let switched = trials.switched_picks();
    Estimate::from_outcomes(
        switched.iter().zip(prize.iter()).map(|(a, b)| a == b),
    )
}
