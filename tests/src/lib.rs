//! Instrumented fakes for exercising the scan engine without a network.
//!
//! [`FakeNet`] stands in for the session factory: listeners are keyed by
//! (host, port) and hold per-unit register images. Session counters make
//! the concurrency bound and the close discipline observable from tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use plcprobe_common::network::host::HostAddr;
use plcprobe_core::probe;
use plcprobe_core::session::{RegisterSession, SessionError, SessionFactory};

/// Register image for one fake device unit: (address, count) → payload.
pub type RegisterImage = HashMap<(u16, u16), Vec<u16>>;

/// Session lifecycle observations across one scan.
#[derive(Default)]
pub struct Counters {
    /// Successful connects.
    pub connects: AtomicUsize,
    /// `close()` calls.
    pub closes: AtomicUsize,
    /// Sessions currently open.
    pub active: AtomicUsize,
    /// High-water mark of concurrently open sessions.
    pub max_active: AtomicUsize,
}

/// A fake network of register servers.
#[derive(Default)]
pub struct FakeNet {
    listeners: HashMap<(HostAddr, u16), HashMap<u16, RegisterImage>>,
    pub counters: Arc<Counters>,
    /// Per-read delay, to force concurrent sessions to overlap in time.
    pub read_delay: Duration,
}

impl FakeNet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a listener with no responding units.
    pub fn listen(&mut self, host: &str, port: u16) {
        self.listeners
            .entry((HostAddr::parse(host), port))
            .or_default();
    }

    /// Installs a register image for one unit behind a listener.
    pub fn install(&mut self, host: &str, port: u16, unit_id: u16, image: RegisterImage) {
        self.listeners
            .entry((HostAddr::parse(host), port))
            .or_default()
            .insert(unit_id, image);
    }
}

#[async_trait]
impl SessionFactory for FakeNet {
    async fn connect(
        &self,
        host: &HostAddr,
        port: u16,
    ) -> anyhow::Result<Box<dyn RegisterSession>> {
        let Some(units) = self.listeners.get(&(host.clone(), port)) else {
            return Err(anyhow!("connection refused: {host}:{port}"));
        };

        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        let now_active = self.counters.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters
            .max_active
            .fetch_max(now_active, Ordering::SeqCst);

        Ok(Box::new(FakeSession {
            units: units.clone(),
            counters: Arc::clone(&self.counters),
            read_delay: self.read_delay,
        }))
    }
}

struct FakeSession {
    units: HashMap<u16, RegisterImage>,
    counters: Arc<Counters>,
    read_delay: Duration,
}

#[async_trait]
impl RegisterSession for FakeSession {
    async fn read_holding_registers(
        &mut self,
        address: u16,
        count: u16,
        unit_id: u16,
    ) -> Result<Vec<u16>, SessionError> {
        if !self.read_delay.is_zero() {
            tokio::time::sleep(self.read_delay).await;
        }

        self.units
            .get(&unit_id)
            .and_then(|image| image.get(&(address, count)))
            .cloned()
            .ok_or(SessionError::Timeout)
    }

    async fn close(&mut self) {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        self.counters.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Packs ASCII into big-endian registers, space-padded to `words`.
pub fn encode_padded(text: &str, words: usize) -> Vec<u16> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.resize(words * 2, b' ');
    bytes
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

/// A register image answering only the manufacturer read of the identity
/// plan.
pub fn identity_image(manufacturer: &str) -> RegisterImage {
    let mut image = RegisterImage::new();
    image.insert(
        (probe::MANUFACTURER_ADDR, 8),
        encode_padded(manufacturer, 8),
    );
    image
}
