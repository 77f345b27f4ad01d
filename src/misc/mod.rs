//! Statistical utilities
mod x2;

pub use x2::{uniform_x2_test, x2_test};
