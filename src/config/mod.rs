//! Configuration management
//!
//! Settings are layered with figment: embedded defaults, `porosity.*` files in
//! the working directory, an explicit `--config` file, `POROSITY_` environment
//! variables and finally command-line overrides.

pub mod core;
pub mod smart_load;
pub mod types;


pub use self::core::PorosityConfig;
pub use self::types::{ExecutionMode, SweepConfig};
