//! Pay policy configuration for the timekeeping engine.
//!
//! This module provides functionality to load the pay policy from a YAML
//! file: the daily overtime threshold, the overtime pay multiplier, and
//! the transition policy (lenient or strict).
//!
//! # Example
//!
//! ```no_run
//! use dtr_engine::config::PolicyLoader;
//!
//! let loader = PolicyLoader::load("./config/dtr").unwrap();
//! println!("Overtime multiplier: {}", loader.policy().overtime_multiplier);
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{PayPolicy, TransitionPolicy};
