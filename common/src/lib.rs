//! Shared models and policy for the plcprobe workspace.
//!
//! Holds everything both the scan engine and the CLI need to agree on:
//! target parsing, host addressing, the device record model, and the scan
//! configuration. No I/O happens here.

pub mod config;
pub mod network;

mod macros;

#[doc(hidden)]
pub use tracing as __tracing;
