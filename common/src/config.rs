use std::ops::RangeInclusive;
use std::time::Duration;

/// Ports probed on every host, in priority order.
pub const DEFAULT_PORTS: [u16; 2] = [502, 102];

/// Runtime policy for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Ports tried per host; the first successful connect wins and the
    /// rest are skipped.
    pub ports: Vec<u16>,
    /// First unit id probed on a connected host.
    pub unit_start: u16,
    /// Last unit id probed on a connected host (inclusive).
    pub unit_end: u16,
    /// Upper bound on concurrently scanned hosts.
    pub max_workers: usize,
    /// Socket connect deadline. Unresponsive hosts otherwise stall a
    /// worker indefinitely.
    pub connect_timeout: Duration,
    /// Per-read response deadline.
    pub read_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ports: DEFAULT_PORTS.to_vec(),
            unit_start: 1,
            unit_end: 600,
            max_workers: 10,
            connect_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(2),
        }
    }
}

impl ScanConfig {
    /// Inclusive unit id sweep for a connected host.
    pub fn unit_ids(&self) -> RangeInclusive<u16> {
        self.unit_start..=self.unit_end
    }
}
