//! Sample keys parsed from source file names

pub mod key;

pub use key::{parse_key, Direction, SampleKey};
