//! Game and simulation constants

/// Number of doors in the game
pub const N_DOORS: usize = 3;
/// Number of trials used when none is given
pub const DEFAULT_TRIALS: usize = 10_000;
/// Number of trials drawn from each RNG stream by seeded generation
pub const BATCH_SIZE: usize = 4_096;
/// Win probability of always keeping the initial pick, 1/3
pub const P_STAY: f64 = 1.0 / 3.0;
/// Win probability of always switching, 2/3
pub const P_SWITCH: f64 = 2.0 / 3.0;
/// Two-sided 95% standard normal quantile
pub const Z_95: f64 = 1.959_963_984_540_054;
