#![warn(clippy::pedantic)]

pub mod coordinator;
pub mod fetch;

pub use coordinator::{Coordinator, CoordinatorConfig, CycleError, FetchFailure, PollState};
pub use fetch::{DemoFetcher, FetchError, ScriptedFetcher, SnapshotFetcher};
