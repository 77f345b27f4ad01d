use thiserror::Error;

pub type Result<T> = std::result::Result<T, MontyError>;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MontyError {
    /// The number of trials must be at least one
    #[error("invalid trial count {0}: at least one trial is required")]
    InvalidTrialCount(usize),
    /// A probability was requested from zero trials
    #[error("probability is undefined over an empty trial set")]
    EmptyTrialSet,
    /// A door index outside of {0, 1, 2}
    #[error("invalid door index {0}: must be 0, 1, or 2")]
    InvalidDoor(usize),
    /// More wins were counted than trials were played
    #[error("{wins} wins exceed {trials} trials")]
    WinsExceedTrials { wins: usize, trials: usize },
    /// An estimate in a report covers a different number of trials
    #[error("trial count mismatch: expected {expected} trials, found {found}")]
    TrialCountMismatch { expected: usize, found: usize },
    /// The prize and pick columns have different lengths
    #[error("column length mismatch: {prize} prize doors, {pick} picks")]
    ColumnLengthMismatch { prize: usize, pick: usize },
}
