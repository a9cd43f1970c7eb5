//! Collaborators consumed by the combat core: content, randomness and the
//! engine host.

mod catalog;
mod error;
mod host;
mod rng;

pub use catalog::{ConfigCatalog, ConfigOracle};
pub use error::ConfigError;
pub use host::{CombatHost, HostEvent, NullHost, RecordingHost};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
