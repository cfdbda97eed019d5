pub mod scan;

use std::time::Duration;

use clap::Parser;
use plcprobe_common::config::{DEFAULT_PORTS, ScanConfig};

#[derive(Parser)]
#[command(name = "plcprobe")]
#[command(about = "Discovers reachable Modbus controllers and reads their identity registers.")]
pub struct CommandLine {
    /// Target address, masked range (e.g. 192.168.1.0-24), CIDR block,
    /// comma-separated list, or path to a .txt target list
    pub target: String,

    /// Ports tried per host, in priority order
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_PORTS)]
    pub ports: Vec<u16>,

    /// First device unit id swept on a connected host
    #[arg(long, default_value_t = 1)]
    pub unit_start: u16,

    /// Last device unit id swept on a connected host (inclusive)
    #[arg(long, default_value_t = 600)]
    pub unit_end: u16,

    /// Maximum number of hosts scanned concurrently
    #[arg(long, default_value_t = 10)]
    pub workers: usize,

    /// Connect deadline per host:port, in milliseconds
    #[arg(long, default_value_t = 2_000)]
    pub connect_timeout_ms: u64,

    /// Response deadline per register read, in milliseconds
    #[arg(long, default_value_t = 2_000)]
    pub read_timeout_ms: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> ScanConfig {
        ScanConfig {
            ports: self.ports.clone(),
            unit_start: self.unit_start,
            unit_end: self.unit_end,
            max_workers: self.workers,
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }
}
