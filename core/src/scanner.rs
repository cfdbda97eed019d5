//! Host scanning and the bounded fan-out across all targets.
//!
//! One host scan owns one protocol session at most: ports are tried in
//! priority order, the first one that connects gets the full unit id
//! sweep, and the session is closed when the sweep finishes. The
//! orchestrator fans host scans out as tasks under a semaphore so no more
//! than the configured number of hosts are being probed at once.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info};

use plcprobe_common::config::ScanConfig;
use plcprobe_common::network::device::DeviceRecord;
use plcprobe_common::network::host::HostAddr;
use plcprobe_common::network::range::HostCollection;

use crate::probe;
use crate::session::SessionFactory;

/// Everything a scan found, one entry per responding device unit.
pub type ScanResult = Vec<(HostAddr, DeviceRecord)>;

/// Scans one host.
///
/// Tries the configured ports in priority order; on the first session that
/// opens, sweeps the whole unit id range and stops trying further ports.
/// A host where no port connects contributes nothing and raises nothing.
pub async fn scan_host(
    factory: &dyn SessionFactory,
    host: &HostAddr,
    cfg: &ScanConfig,
) -> ScanResult {
    for &port in &cfg.ports {
        let mut session = match factory.connect(host, port).await {
            Ok(session) => session,
            Err(err) => {
                debug!("no session on {host}:{port}: {err}");
                continue;
            }
        };

        info!("Found Modbus device at {host}:{port}");

        let mut records = ScanResult::new();
        for unit_id in cfg.unit_ids() {
            if let Some(record) = probe::probe_unit(session.as_mut(), unit_id).await {
                records.push((host.clone(), record));
            }
        }

        session.close().await;
        return records;
    }

    debug!("Connection to {host} failed. Check address or device availability.");
    ScanResult::new()
}

/// Fans [`scan_host`] out across every target host, bounded by the
/// configured worker limit, and returns the collected result sorted by
/// host address, then unit id.
pub async fn perform_scan(
    factory: Arc<dyn SessionFactory>,
    targets: &HostCollection,
    cfg: &ScanConfig,
) -> ScanResult {
    let cfg = Arc::new(cfg.clone());
    let semaphore = Arc::new(Semaphore::new(cfg.max_workers.max(1)));
    let mut tasks: JoinSet<ScanResult> = JoinSet::new();
    let mut results = ScanResult::new();

    for host in targets.iter() {
        // Acquire before spawning so a huge expansion cannot pile up tasks.
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let factory = Arc::clone(&factory);
        let cfg = Arc::clone(&cfg);
        tasks.spawn(async move {
            let _permit = permit;
            scan_host(factory.as_ref(), &host, &cfg).await
        });

        // Drain whatever already finished to keep memory flat.
        while let Some(finished) = tasks.try_join_next() {
            collect(&mut results, finished);
        }
    }

    while let Some(finished) = tasks.join_next().await {
        collect(&mut results, finished);
    }

    results.sort_by(|(host_a, rec_a), (host_b, rec_b)| {
        host_a.cmp(host_b).then(rec_a.unit_id.cmp(&rec_b.unit_id))
    });
    results
}

fn collect(results: &mut ScanResult, finished: Result<ScanResult, JoinError>) {
    match finished {
        Ok(records) => results.extend(records),
        // A panicked host scan loses only that host's records.
        Err(err) => error!("host scan task failed: {err}"),
    }
}
