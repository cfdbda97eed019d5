use std::sync::Arc;

use plcprobe_common::config::ScanConfig;
use plcprobe_common::network::target::{self, Target};
use plcprobe_common::{info, success};
use plcprobe_core::scanner;
use plcprobe_core::session::ModbusFactory;

use crate::terminal::print;

/// Runs one full scan: expansion, bounded fan-out, report.
pub async fn scan(targets: Vec<Target>, cfg: &ScanConfig) -> anyhow::Result<()> {
    let hosts = target::to_collection(targets);
    if hosts.is_empty() {
        info!("Nothing to scan.");
        return Ok(());
    }

    info!("Scanning {} host(s) on ports {:?}", hosts.len(), cfg.ports);

    let factory = Arc::new(ModbusFactory::new(cfg));
    let results = scanner::perform_scan(factory, &hosts, cfg).await;

    if results.is_empty() {
        info!("No PLCs found.");
        return Ok(());
    }

    success!("PLC(s) found:");
    print::report(&results);

    Ok(())
}
