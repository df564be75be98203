//! Clipvault daemon: configuration, logging and wiring around the capture
//! pipeline.

pub mod bootstrap;
