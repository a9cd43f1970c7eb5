//! Status effects: authored definitions and the per-participant set of live
//! instances.

mod config;
mod set;

pub use config::{ActionControl, PeriodicEffect, StatusConfig};
pub use set::{Status, StatusSet};
