//! Discovery behaviour against a simulated SSDP network
//!
//! These tests drive `Discoverer` through scripted reply timings instead of a
//! real multicast socket, covering:
//! - Deduplication of repeated replies
//! - First-responder resolution and the timeout error
//! - Full-window collection and late arrivals
//! - Session teardown on every exit path

mod helpers;

use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

use helpers::{reply_without_location, roku_reply, SimulatedNetwork};
use roku_discovery::{DeviceAddress, Discoverer, DiscoveryError};
use rstest::rstest;

fn addr(ip: &str) -> DeviceAddress {
    DeviceAddress::parse(ip).unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_discover_all_deduplicates_repeat_replies() {
    let network = SimulatedNetwork::new()
        .reply_after(ms(10), roku_reply("192.168.1.10", "A"))
        .reply_after(ms(20), roku_reply("192.168.1.11", "B"))
        .reply_after(ms(30), roku_reply("192.168.1.10", "A"))
        .reply_after(ms(40), roku_reply("192.168.1.12", "C"))
        .reply_after(ms(50), roku_reply("192.168.1.11", "B"));

    let found = Discoverer::new()
        .discover_all_with(network, ms(200))
        .unwrap();

    assert_eq!(found.len(), 3, "duplicates must not be reported: {:?}", found);
    let found: HashSet<_> = found.into_iter().collect();
    let expected: HashSet<_> = ["192.168.1.10", "192.168.1.11", "192.168.1.12"]
        .into_iter()
        .map(addr)
        .collect();
    assert_eq!(found, expected);
}

#[rstest]
#[case(50, 1)]
#[case(120, 2)]
#[case(250, 3)]
fn test_discover_all_returns_replies_before_timeout(
    #[case] timeout_ms: u64,
    #[case] expected: usize,
) {
    let network = SimulatedNetwork::new()
        .reply_after(ms(20), roku_reply("10.0.0.1", "ONE"))
        .reply_after(ms(80), roku_reply("10.0.0.2", "TWO"))
        .reply_after(ms(160), roku_reply("10.0.0.3", "THREE"))
        .reply_after(ms(320), roku_reply("10.0.0.4", "FOUR"));

    let found = Discoverer::new()
        .discover_all_with(network, ms(timeout_ms))
        .unwrap();

    let expected: Vec<_> = ["10.0.0.1", "10.0.0.2", "10.0.0.3"]
        .into_iter()
        .take(expected)
        .map(addr)
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_discover_all_waits_for_full_window() {
    let network = SimulatedNetwork::new().reply_after(ms(5), roku_reply("10.0.0.1", "ONE"));

    let start = Instant::now();
    let found = Discoverer::new()
        .discover_all_with(network, ms(150))
        .unwrap();

    assert_eq!(found.len(), 1);
    assert!(start.elapsed() >= ms(150), "resolved early after {:?}", start.elapsed());
}

#[test]
fn test_discover_all_with_no_replies_is_empty() {
    let network = SimulatedNetwork::new();
    let probe = network.probe();

    let found = Discoverer::new().discover_all_with(network, ms(60)).unwrap();

    assert!(found.is_empty());
    assert!(probe.is_closed());
}

#[test]
fn test_discover_all_ignores_late_replies() {
    let network = SimulatedNetwork::new()
        .reply_after(ms(10), roku_reply("10.0.0.1", "ONE"))
        .reply_after(ms(150), roku_reply("10.0.0.2", "LATE"));

    let found = Discoverer::new().discover_all_with(network, ms(100)).unwrap();

    assert_eq!(found, vec![addr("10.0.0.1")]);
}

#[test]
fn test_discover_one_returns_first_reply() {
    let network = SimulatedNetwork::new()
        .reply_after(ms(20), roku_reply("192.168.1.50", "FIRST"))
        .reply_after(ms(60), roku_reply("192.168.1.51", "SECOND"))
        .reply_after(ms(70), roku_reply("192.168.1.50", "FIRST"));
    let probe = network.probe();

    let start = Instant::now();
    let found = Discoverer::new().discover_one_with(network, ms(500)).unwrap();

    assert_eq!(found, addr("192.168.1.50"));
    assert!(start.elapsed() < ms(500), "discover_one should not wait out the window");
    assert!(probe.is_closed(), "session must be torn down after success");
}

#[test]
fn test_discover_one_times_out_no_earlier_than_timeout() {
    let network = SimulatedNetwork::new();
    let probe = network.probe();

    let start = Instant::now();
    let result = Discoverer::new().discover_one_with(network, ms(100));

    match result {
        Err(DiscoveryError::Timeout(timeout)) => assert_eq!(timeout, ms(100)),
        other => panic!("Expected DiscoveryError::Timeout, got {:?}", other),
    }
    assert!(start.elapsed() >= ms(100));
    assert!(probe.is_closed(), "session must be torn down after timeout");
}

#[test]
fn test_discover_one_reply_after_timeout_is_timeout() {
    let network = SimulatedNetwork::new().reply_after(ms(200), roku_reply("10.0.0.9", "LATE"));

    let result = Discoverer::new().discover_one_with(network, ms(80));
    assert!(matches!(result, Err(DiscoveryError::Timeout(_))));
}

#[test]
fn test_reply_without_location_is_ignored() {
    let network = SimulatedNetwork::new()
        .reply_after(ms(5), reply_without_location())
        .reply_after(ms(25), roku_reply("10.1.1.1", "REAL"));

    let found = Discoverer::new().discover_one_with(network, ms(300)).unwrap();
    assert_eq!(found, addr("10.1.1.1"));
}

#[test]
fn test_only_location_replies_is_timeout() {
    let network = SimulatedNetwork::new()
        .reply_after(ms(5), reply_without_location())
        .reply_after(ms(10), reply_without_location());

    let result = Discoverer::new().discover_one_with(network, ms(60));
    assert!(matches!(result, Err(DiscoveryError::Timeout(_))));
}

#[test]
fn test_socket_error_propagates_and_closes_session() {
    let network = SimulatedNetwork::new()
        .reply_after(ms(5), roku_reply("10.0.0.1", "ONE"))
        .fail_on_recv(1);
    let probe = network.probe();

    let result = Discoverer::new().discover_all_with(network, ms(200));

    assert!(matches!(result, Err(DiscoveryError::Network(_))));
    assert!(probe.is_closed(), "session must be torn down after an error");
}

#[test]
fn test_one_search_per_call() {
    let network = SimulatedNetwork::new().reply_after(ms(5), roku_reply("10.0.0.1", "ONE"));
    let probe = network.probe();

    let _ = Discoverer::new().discover_all_with(network, ms(40)).unwrap();
    assert_eq!(probe.searches(), 1);
}

#[test]
fn test_concurrent_discoveries_do_not_interfere() {
    let discoverer = Discoverer::new();

    let handles: Vec<_> = (0..3)
        .map(|i| {
            let discoverer = discoverer.clone();
            thread::spawn(move || {
                let network = SimulatedNetwork::new()
                    .reply_after(ms(10), roku_reply(&format!("10.0.{}.1", i), "X"))
                    .reply_after(ms(20), roku_reply(&format!("10.0.{}.2", i), "Y"));
                discoverer.discover_all_with(network, ms(80)).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let found = handle.join().unwrap();
        assert_eq!(
            found,
            vec![addr(&format!("10.0.{}.1", i)), addr(&format!("10.0.{}.2", i))]
        );
    }
}
