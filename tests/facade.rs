//! End-to-end behaviour of the logging facade against real files and an
//! in-memory event sink.

mod common;
use common::*;

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use tracefile::router::SinkRouter;
use tracefile::{loggable, Caller, EventClass, Fault, Logger, Origin, SinkMode};

fn origin() -> Origin {
    Origin::new("shop::orders", "place")
}

#[test]
fn info_message_appends_one_line_to_the_user_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), SinkMode::File);
    let expected_path = SinkRouter::destination(&config, "alice");
    let (logger, _) = memory_logger(config);

    logger.info_message(&origin(), Caller::new("alice", 1), "start");

    assert_eq!(log_files(dir.path(), "alice"), vec![expected_path]);
    let text = read_user_log(dir.path(), "alice").unwrap();
    assert!(text.starts_with("Time-"), "{text}");
    assert!(
        text.ends_with(",Type-Information,Message-shop::orders:place:start\n"),
        "{text}"
    );
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn depth_above_threshold_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));

    logger.info_message(&origin(), Caller::new("alice", 2), "start");

    assert_eq!(read_user_log(dir.path(), "alice"), None);
}

#[test]
fn rank_above_level_skips_the_file_but_not_the_event_sink() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, events) = memory_logger(config(dir.path(), SinkMode::Both));

    logger.warning(&origin(), Caller::new("alice", 1), "slow");
    logger.debug(&origin(), Caller::new("alice", 1), "details");

    assert_eq!(read_user_log(dir.path(), "alice"), None);
    let texts: Vec<String> = events.events().into_iter().map(|e| e.text).collect();
    assert_eq!(
        texts,
        vec![
            "shop::orders:place:slow".to_string(),
            "shop::orders:place:details".to_string()
        ]
    );
}

#[test]
fn error_is_within_level_two() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, events) = memory_logger(config(dir.path(), SinkMode::Both));

    logger.error(&origin(), Caller::new("alice", 0), "declined");

    let text = read_user_log(dir.path(), "alice").unwrap();
    assert!(text.contains(",Type-Error,Message-shop::orders:place:declined\n"));
    assert_eq!(count_class(&events, EventClass::Error), 1);
}

#[test]
fn disabled_trace_produces_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), SinkMode::Both);
    config.trace = false;
    let (logger, events) = memory_logger(config);

    logger.info(&origin(), Caller::new("alice", 0));
    logger.error(&origin(), Caller::new("alice", 0), "x");
    logger.success(&origin(), Caller::new("alice", 0));

    assert_eq!(read_user_log(dir.path(), "alice"), None);
    assert!(events.events().is_empty());
    assert!(events.registrations().is_empty());
}

#[test]
fn success_and_bare_info() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));

    logger.info(&origin(), Caller::new("alice", 1));
    logger.success(&origin(), Caller::new("alice", 1));

    let text = read_user_log(dir.path(), "alice").unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(",Type-Information,Message-shop::orders:place"));
    assert!(lines[1].ends_with(",Type-Information,Message-shop::orders:place:Command Succeeded"));
}

struct Line {
    sku: &'static str,
    qty: u32,
}

loggable!(Line { sku, qty });

struct Order {
    id: u64,
    lines: Vec<Line>,
}

loggable!(Order { id, lines });

#[test]
fn structured_payload_becomes_detail_lines() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));
    let order = Order {
        id: 7,
        lines: vec![Line { sku: "A-1", qty: 2 }],
    };

    logger.info_payload(&origin(), Caller::new("alice", 1), &order);

    let text = read_user_log(dir.path(), "alice").unwrap();
    let (header, details) = text.split_once("\"Details-").unwrap();
    assert!(header.ends_with(",Type-Information,Message-shop::orders:place,"));
    assert_eq!(details, "id:7\nlines#Line#0_sku:A-1\nlines#Line#0_qty:2\n\"\n");
}

#[test]
fn scalar_payload_extends_the_message() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));

    logger.info_payload(&origin(), Caller::new("alice", 1), "order-7");
    logger.info_payload(&origin(), Caller::new("alice", 1), &42u32);

    let text = read_user_log(dir.path(), "alice").unwrap();
    assert!(!text.contains("Details-"));
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].ends_with("Message-shop::orders:place:order-7"));
    assert!(lines[1].ends_with("Message-shop::orders:place:42"));
}

#[test]
fn raw_mapping_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));
    let mut data = BTreeMap::new();
    data.insert("region", "eu");
    data.insert("tier", "gold");

    logger.info_with(&origin(), Caller::new("alice", 1), "routing", &data);
    logger.info_data(&origin(), Caller::new("alice", 1), [("attempt", 2)]);
    logger.info_with(&origin(), Caller::new("alice", 1), "nothing", Vec::<(String, String)>::new());

    let text = read_user_log(dir.path(), "alice").unwrap();
    assert!(text.contains("Message-shop::orders:place:routing,\"Details-region:eu\ntier:gold\n\"\n"));
    assert!(text.contains("Message-shop::orders:place,\"Details-attempt:2\n\"\n"));
    assert!(text.ends_with("Message-shop::orders:place:nothing\n"));
}

#[derive(Debug)]
struct SaveError(std::io::Error);

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("could not save order")
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn exception_report_writes_one_block_per_cause() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), SinkMode::File);
    // reports do not depend on the enable flag
    config.trace = false;
    let (logger, events) = memory_logger(config);
    let error = SaveError(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));

    logger.report_exception(&error, "bob").unwrap();

    let text = read_user_log(dir.path(), "bob").unwrap();
    assert_eq!(text.matches("StackTrace-").count(), 2);
    assert_eq!(text.matches("Message-").count(), 2);
    assert!(text.contains(",Type-Critical,Message-could not save order,\"Details-\n"));
    assert!(text.contains("Inner Exception-\nMessage-disk full,Details-\n"));

    let reported = events.events();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].class, EventClass::Error);
    assert_eq!(reported[0].source, SOURCE);
    assert_eq!(reported[0].text.matches("Message-").count(), 2);
}

#[test]
fn hand_built_fault_keeps_its_details() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, events) = memory_logger(config(dir.path(), SinkMode::Event));
    let fault = Fault::new("payment declined")
        .with_source("billing")
        .with_data("order", 7)
        .with_help_link("https://example.invalid/declined");

    logger.report_fault(&fault, "bob").unwrap();

    assert_eq!(read_user_log(dir.path(), "bob"), None);
    let text = &events.events()[0].text;
    assert!(text.contains("Source-billing\n"));
    assert!(text.contains("Data-order:7\n"));
    assert!(text.contains("HelpLink-https://example.invalid/declined\n"));
}

#[test]
fn reported_fault_error_keeps_its_details() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, events) = memory_logger(config(dir.path(), SinkMode::Event));
    let fault = Fault::new("payment declined")
        .with_source("billing")
        .with_data("order", 7)
        .with_target_site("charge");

    logger.report_exception(&fault, "bob").unwrap();

    let text = &events.events()[0].text;
    assert!(text.contains("Message-payment declined\n"));
    assert!(text.contains("Source-billing\n"));
    assert!(text.contains("Data-order:7\n"));
    assert!(text.contains("TargetSite-charge\n"));
}

struct Account {
    owner: &'static str,
    balance: RefCell<i64>,
    limit: i64,
}

loggable!(Account { owner, balance, limit });

#[test]
fn unreadable_member_is_omitted_and_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, events) = memory_logger(config(dir.path(), SinkMode::Both));
    let account = Account {
        owner: "bob",
        balance: RefCell::new(10),
        limit: 500,
    };
    let _writer = account.balance.borrow_mut();

    logger.info_payload(&origin(), Caller::new("alice", 1), &account);

    let text = read_user_log(dir.path(), "alice").unwrap();
    assert!(text.contains("\"Details-owner:bob\nlimit:500\n\"\n"));
    assert!(!text.contains("balance"));
    assert_eq!(text.matches(",Type-Critical,").count(), 1);
    assert_eq!(count_class(&events, EventClass::Error), 1);
    assert_eq!(count_class(&events, EventClass::Information), 1);
}

struct Node {
    name: &'static str,
    next: RefCell<Option<Rc<Node>>>,
}

loggable!(Node { name, next });

#[test]
fn cyclic_payload_terminates_with_marker() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));
    let node = Rc::new(Node {
        name: "loop",
        next: RefCell::new(None),
    });
    *node.next.borrow_mut() = Some(Rc::clone(&node));

    logger.info_payload(&origin(), Caller::new("alice", 1), &node);

    let text = read_user_log(dir.path(), "alice").unwrap();
    assert!(text.contains("\"Details-name:loop\nnext:<cycle>\n\"\n"), "{text}");
    node.next.borrow_mut().take();
}

#[test]
fn file_failure_is_redirected_to_the_event_sink() {
    let dir = tempfile::tempdir().unwrap();
    // a plain file where the user directory should be
    std::fs::write(dir.path().join("carol"), "blocked").unwrap();
    let (logger, events) = memory_logger(config(dir.path(), SinkMode::Both));

    logger.info_message(&origin(), Caller::new("carol", 1), "start");

    assert_eq!(count_class(&events, EventClass::Information), 1);
    let errors: Vec<String> = events
        .events()
        .into_iter()
        .filter(|e| e.class == EventClass::Error)
        .map(|e| e.text)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Message-failed to create log directory"));
}

#[test]
fn report_fails_only_when_no_sink_accepts_it() {
    let dir = tempfile::tempdir().unwrap();

    let logger = Logger::with_event_sink(config(dir.path(), SinkMode::Event), Arc::new(FailingEventSink));
    let err = logger.report_fault(&Fault::new("boom"), "bob").unwrap_err();
    assert!(err.file.is_none());

    let logger = Logger::with_event_sink(config(dir.path(), SinkMode::Both), Arc::new(FailingEventSink));
    logger.report_fault(&Fault::new("boom"), "bob").unwrap();
    assert!(read_user_log(dir.path(), "bob").unwrap().contains("Message-boom,"));

    // ordinary logging never surfaces the failure
    logger.info_message(&origin(), Caller::new("bob", 1), "still fine");
}

#[test]
fn shutdown_stops_logging() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));

    logger.info_message(&origin(), Caller::new("alice", 1), "before");
    logger.shutdown();
    logger.info_message(&origin(), Caller::new("alice", 1), "after");

    assert!(!logger.is_enabled());
    let text = read_user_log(dir.path(), "alice").unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("before"));
}

#[test]
fn each_thread_gets_its_own_file() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));
    let logger = Arc::new(logger);

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let logger = Arc::clone(&logger);
            scope.spawn(move || {
                for i in 0..10 {
                    logger.info_message(
                        &origin(),
                        Caller::new("alice", 1),
                        &format!("worker {worker} step {i}"),
                    );
                }
            });
        }
    });

    let files = log_files(dir.path(), "alice");
    assert_eq!(files.len(), 4);
    for file in files {
        let text = std::fs::read_to_string(file).unwrap();
        assert_eq!(text.lines().count(), 10);
    }
}
