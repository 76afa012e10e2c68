//! Backend worker: owns the tokio runtime and performs all network I/O.

pub mod commands;
pub mod runtime;
