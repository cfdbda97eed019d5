//! Host addressing for scan targets and results.

use std::cmp::Ordering;
use std::fmt;
use std::net::IpAddr;

/// One scannable network endpoint.
///
/// Targets that parse as IP addresses are kept as such; anything else is a
/// name literal left for the resolver at connect time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostAddr {
    Ip(IpAddr),
    Name(String),
}

impl HostAddr {
    /// Never fails: unparseable input becomes a `Name`.
    pub fn parse(s: &str) -> Self {
        match s.parse::<IpAddr>() {
            Ok(ip) => Self::Ip(ip),
            Err(_) => Self::Name(s.to_string()),
        }
    }
}

impl From<IpAddr> for HostAddr {
    fn from(ip: IpAddr) -> Self {
        Self::Ip(ip)
    }
}

impl fmt::Display for HostAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(ip) => ip.fmt(f),
            Self::Name(name) => name.fmt(f),
        }
    }
}

/// Addresses sort numerically and ahead of names, so a sorted report is
/// stable regardless of which worker finished first.
impl Ord for HostAddr {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Ip(a), Self::Ip(b)) => a.cmp(b),
            (Self::Ip(_), Self::Name(_)) => Ordering::Less,
            (Self::Name(_), Self::Ip(_)) => Ordering::Greater,
            (Self::Name(a), Self::Name(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for HostAddr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
