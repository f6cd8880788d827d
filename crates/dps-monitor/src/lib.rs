#![warn(clippy::pedantic)]

pub mod keys;
pub mod monitor;

pub use keys::{KeyInfo, MONITORED_KEYS, default_expected_keys, describe_key};
pub use monitor::compute_coverage;
