//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "synthesize a project tree".

pub mod synth_service;

pub use synth_service::{SynthReport, SynthService};
