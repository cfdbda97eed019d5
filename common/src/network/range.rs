use std::net::{IpAddr, Ipv4Addr};

use crate::network::host::HostAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            return 0;
        }
        (end - start) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_iter(&self) -> impl Iterator<Item = HostAddr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(|ip| HostAddr::Ip(IpAddr::V4(Ipv4Addr::from(ip))))
    }
}

/// Expands a network block to its usable host range.
///
/// The network and broadcast addresses are excluded. /31 and /32 blocks
/// reserve neither and expand to every address they contain, so a single
/// address expands to itself.
pub fn usable_range(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<Ipv4Range> {
    let network = ipnetwork::Ipv4Network::new(ip, prefix)?;
    if prefix >= 31 {
        return Ok(Ipv4Range::new(network.network(), network.broadcast()));
    }

    let start = u32::from(network.network()) + 1;
    let end = u32::from(network.broadcast()) - 1;
    Ok(Ipv4Range::new(Ipv4Addr::from(start), Ipv4Addr::from(end)))
}

/// The full set of hosts one scan run will visit.
#[derive(Debug, Clone, Default)]
pub struct HostCollection {
    pub singles: Vec<HostAddr>,
    pub ranges: Vec<Ipv4Range>,
}

impl HostCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_single(&mut self, host: HostAddr) {
        self.singles.push(host);
    }

    pub fn add_range(&mut self, range: Ipv4Range) {
        self.ranges.push(range);
    }

    pub fn len(&self) -> usize {
        self.singles.len() + self.ranges.iter().map(Ipv4Range::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazily yields every host, singles first, then ranges in insertion
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = HostAddr> + '_ {
        self.singles
            .iter()
            .cloned()
            .chain(self.ranges.iter().flat_map(Ipv4Range::to_iter))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
