//! End-to-end scans against the fake network.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use plcprobe_common::config::ScanConfig;
use plcprobe_common::network::host::HostAddr;
use plcprobe_common::network::range::HostCollection;
use plcprobe_common::network::target::{self, Target};
use plcprobe_core::scanner;
use plcprobe_integration_tests::{FakeNet, identity_image};

fn hosts(token: &str) -> HostCollection {
    target::to_collection(vec![Target::parse(token)])
}

fn small_sweep() -> ScanConfig {
    ScanConfig {
        unit_end: 5,
        ..ScanConfig::default()
    }
}

#[tokio::test]
async fn end_to_end_single_responder() {
    let mut net = FakeNet::new();
    net.install("10.0.0.5", 502, 3, identity_image("ACME"));
    let counters = Arc::clone(&net.counters);

    let results = scanner::perform_scan(Arc::new(net), &hosts("10.0.0.0/29"), &small_sweep()).await;

    // Exactly one device across six probed hosts and five swept units.
    assert_eq!(results.len(), 1);
    let (host, record) = &results[0];
    assert_eq!(*host, HostAddr::parse("10.0.0.5"));
    assert_eq!(record.unit_id, 3);
    assert_eq!(record.manufacturer, "ACME");
    assert!(record.model.is_empty());
    assert!(record.firmware_version.is_empty());

    // One session for the one listening host, closed exactly once.
    assert_eq!(counters.connects.load(Ordering::SeqCst), 1);
    assert_eq!(counters.closes.load(Ordering::SeqCst), 1);
    assert_eq!(counters.active.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn concurrency_stays_within_the_worker_bound() {
    let mut net = FakeNet::new();
    net.read_delay = Duration::from_millis(2);
    for i in 1..=32u8 {
        net.listen(&format!("10.1.0.{i}"), 502);
    }
    let counters = Arc::clone(&net.counters);

    let cfg = ScanConfig {
        max_workers: 4,
        unit_end: 2,
        ..ScanConfig::default()
    };
    let results = scanner::perform_scan(Arc::new(net), &hosts("10.1.0.0/26"), &cfg).await;

    // Listening hosts with no responsive units contribute nothing.
    assert!(results.is_empty());

    let max_active = counters.max_active.load(Ordering::SeqCst);
    assert!(max_active <= 4, "saw {max_active} concurrent sessions");
    assert!(max_active > 1, "scan never ran hosts concurrently");

    // One session per listening host, every one closed.
    assert_eq!(counters.connects.load(Ordering::SeqCst), 32);
    assert_eq!(counters.closes.load(Ordering::SeqCst), 32);
    assert_eq!(counters.active.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fallback_port_is_used_only_when_the_primary_refuses() {
    let mut net = FakeNet::new();
    // Only the alternate port answers on .2; both answer on .3.
    net.install("10.0.0.2", 102, 1, identity_image("FALLBACK"));
    net.install("10.0.0.3", 502, 1, identity_image("PRIMARY"));
    net.install("10.0.0.3", 102, 1, identity_image("SHADOWED"));
    let counters = Arc::clone(&net.counters);

    let results =
        scanner::perform_scan(Arc::new(net), &hosts("10.0.0.2, 10.0.0.3"), &small_sweep()).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, HostAddr::parse("10.0.0.2"));
    assert_eq!(results[0].1.manufacturer, "FALLBACK");
    assert_eq!(results[1].0, HostAddr::parse("10.0.0.3"));
    assert_eq!(results[1].1.manufacturer, "PRIMARY");

    // .2 connected once (102 after 502 refused); .3 connected once (502).
    assert_eq!(counters.connects.load(Ordering::SeqCst), 2);
    assert_eq!(counters.closes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn results_sort_by_host_then_unit() {
    let mut net = FakeNet::new();
    net.install("10.0.0.9", 502, 1, identity_image("NINE"));
    net.install("10.0.0.2", 502, 4, identity_image("TWO-FOUR"));
    net.install("10.0.0.2", 502, 2, identity_image("TWO-TWO"));

    // Deliberately worst-case target order.
    let results =
        scanner::perform_scan(Arc::new(net), &hosts("10.0.0.9, 10.0.0.2"), &small_sweep()).await;

    let summary: Vec<(HostAddr, u16)> = results
        .iter()
        .map(|(host, record)| (host.clone(), record.unit_id))
        .collect();
    assert_eq!(
        summary,
        vec![
            (HostAddr::parse("10.0.0.2"), 2),
            (HostAddr::parse("10.0.0.2"), 4),
            (HostAddr::parse("10.0.0.9"), 1),
        ]
    );
}

#[tokio::test]
async fn unreachable_hosts_do_not_drop_other_results() {
    let mut net = FakeNet::new();
    net.install("10.0.0.3", 502, 1, identity_image("ALIVE"));

    // Every other host in the block refuses both ports.
    let results = scanner::perform_scan(Arc::new(net), &hosts("10.0.0.0/28"), &small_sweep()).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1.manufacturer, "ALIVE");
}
