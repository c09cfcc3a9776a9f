//! Error Fan-In and Line Logging Integration Tests
//!
//! Exercises the collaborator utilities together: worker threads report
//! errors into a shared sink, and a consumer drains the sink into
//! structured log lines.

mod common;

use std::sync::mpsc::sync_channel;
use std::thread;
use std::time::Duration;

use dynopt::{BoxError, ErrorSink, Fields, LineLogger, fields};

#[test]
fn test_workers_fan_in_through_forwarding() {
    common::init_logging();
    let sink = ErrorSink::new(100);

    // Each worker owns its sending side; the sink drains all of them.
    for worker in 0..4 {
        let (tx, rx) = sync_channel::<BoxError>(10);
        sink.drain_from(rx);
        thread::spawn(move || {
            tx.send(format!("worker {worker} failed").into()).unwrap();
        });
    }

    let mut drained = Vec::new();
    while drained.len() < 4 {
        let err = sink
            .errors()
            .recv_timeout(Duration::from_secs(5))
            .expect("expected forwarded error");
        drained.push(err.to_string());
    }
    drained.sort();
    assert_eq!(drained[0], "worker 0 failed");
    assert_eq!(drained[3], "worker 3 failed");
}

#[test]
fn test_drained_errors_become_log_records() {
    common::init_logging();
    let sink = ErrorSink::new(10);
    sink.trace("listener refused");
    sink.push("backend unreachable");

    let logger = LineLogger::new(Vec::new())
        .with_field("ts", "2006-01-01T00:00:00Z")
        .with_field("level", "error");
    for err in sink.errors().try_iter() {
        logger.fields(fields! { "msg" => err.to_string() });
    }

    let out = String::from_utf8(logger.into_inner()).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("listener refused"));
    assert!(lines[0].contains("fanin_logging_test.rs:"));
    assert!(lines[1].contains("\"level\":\"error\""));
}

#[test]
fn test_sender_handles_feed_concurrently() {
    common::init_logging();
    let sink = ErrorSink::new(1000);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let tx = sink.sender();
            thread::spawn(move || {
                for n in 0..50 {
                    let _ = tx.try_send(format!("thread {i} error {n}").into());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let drained: Vec<_> = sink.errors().try_iter().collect();
    assert_eq!(drained.len(), 400);
}

#[test]
fn test_template_fields_survive_caller_records() {
    common::init_logging();
    let logger = LineLogger::new(Vec::new())
        .with_field("ts", "2006-01-01T00:00:00Z")
        .with_field("service", "gateway");

    logger.fields(fields! { "msg" => "up" });
    logger.fields(Fields::new());

    let out = String::from_utf8(logger.into_inner()).unwrap();
    for line in out.lines() {
        assert!(line.contains("\"service\":\"gateway\""));
        assert!(line.contains("\"ts\":\"2006-01-01T00:00:00Z\""));
    }
}
