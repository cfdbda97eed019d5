//! # Scan Target Model
//!
//! Defines the possible inputs for a network scan.
//!
//! This module handles parsing and representing targets, which can be:
//! * A single IP address (host).
//! * A masked range (e.g., `192.168.1.0-24`), the shorthand where the part
//!   after the dash is a prefix length anchored at the start address.
//! * A CIDR block (e.g., `192.168.1.0/24`).
//! * A comma-separated list of any of the above.
//! * Any other literal, kept verbatim as a single named host.

use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::network::host::HostAddr;
use crate::network::range::{self, HostCollection, Ipv4Range};
use crate::success;

/// Represents a distinct target to be scanned.
#[derive(Clone, Debug)]
pub enum Target {
    /// Scan a single specific host.
    Host { addr: HostAddr },
    /// Scan the usable hosts of an IPv4 block.
    Range { ipv4_range: Ipv4Range },
    /// Holds a list of different targets.
    Multi { targets: Vec<Target> },
}

impl Target {
    /// Parses a string into a `Target`.
    ///
    /// Anything that is neither a valid address, masked range, nor CIDR
    /// block falls back to a literal single host, so parsing never fails.
    pub fn parse(s: &str) -> Self {
        parse_token(s.trim())
    }
}

impl FromStr for Target {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

fn parse_token(s: &str) -> Target {
    if s.contains(',') {
        return parse_commas(s);
    }

    if let Some(target) = parse_masked_range(s) {
        return target;
    }

    if let Some(target) = parse_cidr(s) {
        return target;
    }

    Target::Host {
        addr: HostAddr::parse(s),
    }
}

/// Parses a comma-separated list of targets (e.g., "192.168.1.5, 10.0.0.0/29").
fn parse_commas(s: &str) -> Target {
    let targets = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_token)
        .collect();

    Target::Multi { targets }
}

/// Parses `a-b` as the network `a/b` with host bits masked off, i.e. the
/// range shorthand is a proxy for CIDR expansion anchored at `a`.
fn parse_masked_range(s: &str) -> Option<Target> {
    let (start_str, prefix_str) = s.split_once('-')?;
    let start_addr = start_str.parse::<Ipv4Addr>().ok()?;
    let prefix = prefix_str.parse::<u8>().ok()?;
    let ipv4_range = range::usable_range(start_addr, prefix).ok()?;

    Some(Target::Range { ipv4_range })
}

/// Parses CIDR notation like `192.168.1.0/24`.
fn parse_cidr(s: &str) -> Option<Target> {
    let (ip_str, prefix_str) = s.split_once('/')?;
    let addr = ip_str.parse::<Ipv4Addr>().ok()?;
    let prefix = prefix_str.parse::<u8>().ok()?;
    let ipv4_range = range::usable_range(addr, prefix).ok()?;

    Some(Target::Range { ipv4_range })
}

fn resolve_target(target: Target, collection: &mut HostCollection) {
    match target {
        Target::Host { addr } => {
            collection.add_single(addr);
        }
        Target::Range { ipv4_range } => {
            collection.add_range(ipv4_range);
        }
        Target::Multi { targets } => {
            for target in targets {
                resolve_target(target, collection);
            }
        }
    }
}

/// Converts the parsed targets into the host collection for one scan run.
pub fn to_collection(targets: Vec<Target>) -> HostCollection {
    let mut collection = HostCollection::new();

    for target in targets {
        resolve_target(target, &mut collection);
    }

    let len: usize = collection.len();
    let unit: &str = if len == 1 {
        "host address has been"
    } else {
        "host addresses have been"
    };
    success!("{len} {unit} parsed successfully");

    collection
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
