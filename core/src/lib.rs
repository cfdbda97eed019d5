//! The plcprobe scan engine.
//!
//! Expands scan targets into hosts (via `plcprobe-common`), probes each
//! host for a reachable register service, sweeps the device unit space on
//! every open session, and decodes identity payloads into device records.
//!
//! The register protocol itself is consumed as a black box behind the
//! [`session::RegisterSession`] trait; everything above that seam is
//! transport-agnostic and runs unchanged against the fakes in the
//! integration test crate.

pub mod decode;
pub mod probe;
pub mod scanner;
pub mod session;
