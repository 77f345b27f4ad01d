//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::door::Door;
#[doc(no_inline)]
pub use crate::estimate::Estimate;
#[doc(no_inline)]
pub use crate::result::{MontyError, Result};
#[doc(no_inline)]
pub use crate::simulation::{Report, Simulation};
#[doc(no_inline)]
pub use crate::strategy::Strategy;
#[doc(no_inline)]
pub use crate::trial::{Trial, TrialSet};
