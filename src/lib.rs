//! Monte Carlo estimation of the Monty Hall stay and switch strategies.
//!
//! ```
//! use monty::prelude::*;
//!
//! let report = Simulation::new(10_000).with_seed(1).run().unwrap();
//! assert!((report.p_switch() - 2.0 / 3.0).abs() < 0.05);
//! ```
pub mod consts;
pub mod door;
pub mod estimate;
pub mod misc;
pub mod prelude;
pub mod result;
pub mod simulation;
pub mod strategy;
pub mod trial;

mod test;

pub use result::{MontyError, Result};
