//! Protocol session boundary.
//!
//! The scan engine consumes the register protocol through the
//! [`RegisterSession`] trait; the production implementation wraps a
//! `tokio-modbus` TCP context. Sessions come out of a [`SessionFactory`]
//! so the engine can run against instrumented fakes in tests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context as _, anyhow};
use async_trait::async_trait;
use thiserror::Error;
use tokio::net::lookup_host;
use tokio::time::timeout;
use tokio_modbus::client::{Client, Context, Reader, tcp};
use tokio_modbus::slave::{Slave, SlaveContext};
use tracing::debug;

use plcprobe_common::config::ScanConfig;
use plcprobe_common::network::host::HostAddr;

/// Why a register read produced no value.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("read timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("device exception: {0}")]
    Exception(String),
    /// The wire format carries unit ids in a single byte; sweeps beyond it
    /// fail per-read instead of aborting the host.
    #[error("unit id {0} exceeds the protocol's addressable range")]
    UnitOutOfRange(u16),
}

/// One live connection to one host:port, owned by one host scan.
#[async_trait]
pub trait RegisterSession: Send {
    /// Reads `count` holding registers starting at `address` from the
    /// device unit `unit_id` sharing this connection.
    async fn read_holding_registers(
        &mut self,
        address: u16,
        count: u16,
        unit_id: u16,
    ) -> Result<Vec<u16>, SessionError>;

    /// Releases the connection, best-effort. Called exactly once per
    /// successful connect.
    async fn close(&mut self);
}

/// Opens sessions; the seam between the scan engine and the network.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn connect(
        &self,
        host: &HostAddr,
        port: u16,
    ) -> anyhow::Result<Box<dyn RegisterSession>>;
}

/// Production factory dialing Modbus/TCP endpoints.
pub struct ModbusFactory {
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl ModbusFactory {
    pub fn new(cfg: &ScanConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout,
            read_timeout: cfg.read_timeout,
        }
    }
}

#[async_trait]
impl SessionFactory for ModbusFactory {
    async fn connect(
        &self,
        host: &HostAddr,
        port: u16,
    ) -> anyhow::Result<Box<dyn RegisterSession>> {
        let addr = resolve(host, port).await?;

        let ctx = match timeout(self.connect_timeout, tcp::connect(addr)).await {
            Ok(Ok(ctx)) => ctx,
            Ok(Err(err)) => return Err(anyhow!("connect to {addr} failed: {err}")),
            Err(_) => return Err(anyhow!("connect to {addr} timed out")),
        };

        Ok(Box::new(ModbusSession {
            ctx,
            read_timeout: self.read_timeout,
        }))
    }
}

async fn resolve(host: &HostAddr, port: u16) -> anyhow::Result<SocketAddr> {
    match host {
        HostAddr::Ip(ip) => Ok(SocketAddr::new(*ip, port)),
        HostAddr::Name(name) => lookup_host((name.as_str(), port))
            .await
            .with_context(|| format!("resolving {name}"))?
            .next()
            .ok_or_else(|| anyhow!("{name} resolved to no addresses")),
    }
}

struct ModbusSession {
    ctx: Context,
    read_timeout: Duration,
}

#[async_trait]
impl RegisterSession for ModbusSession {
    async fn read_holding_registers(
        &mut self,
        address: u16,
        count: u16,
        unit_id: u16,
    ) -> Result<Vec<u16>, SessionError> {
        let unit = u8::try_from(unit_id).map_err(|_| SessionError::UnitOutOfRange(unit_id))?;
        self.ctx.set_slave(Slave(unit));

        let read = self.ctx.read_holding_registers(address, count);
        match timeout(self.read_timeout, read).await {
            Ok(Ok(Ok(words))) => Ok(words),
            Ok(Ok(Err(exception))) => Err(SessionError::Exception(exception.to_string())),
            Ok(Err(err)) => Err(SessionError::Transport(err.to_string())),
            Err(_) => Err(SessionError::Timeout),
        }
    }

    async fn close(&mut self) {
        if let Err(err) = self.ctx.disconnect().await {
            debug!("disconnect failed: {err}");
        }
    }
}
