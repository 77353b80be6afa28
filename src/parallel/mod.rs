//! Resource-aware execution strategy
//!
//! This module decides how many threads a fan-out may use. It knows about CPU
//! cores and user limits, never about images or thresholds.
//!
//! ```rust
//! use porosity_sweep::parallel::ExecutionStrategy;
//!
//! let max_workers = ExecutionStrategy::calculate_optimal_workers(0, 100);
//! let strategy = ExecutionStrategy::auto(256, 1, max_workers);
//! assert!(strategy.workers() >= 1);
//! ```

pub mod core;

pub use self::core::ExecutionStrategy;
