//! `tracing` events routed into the facade through `BridgeLayer`.

mod common;
use common::*;

use std::sync::Arc;
use tracefile::layer::{BridgeConfig, BridgeLayer};
use tracefile::{EventClass, Logger, SinkMode};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

fn with_bridge<F: FnOnce()>(logger: Arc<Logger>, config: BridgeConfig, f: F) {
    let subscriber = Registry::default().with(BridgeLayer::with_config(logger, config));
    tracing::subscriber::with_default(subscriber, f);
}

#[test]
fn events_become_records() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, events) = memory_logger(config(dir.path(), SinkMode::Both));

    with_bridge(Arc::new(logger), BridgeConfig::default(), || {
        let span = tracing::info_span!("checkout");
        let _entered = span.enter();
        tracing::info!(user = "erin", depth = 1, order = 7, paid = true, "placed");
        tracing::warn!(user = "erin", "retrying");
    });

    let text = read_user_log(dir.path(), "erin").unwrap();
    assert!(
        text.contains(",Type-Information,Message-bridge:checkout:placed,\"Details-order:7\npaid:true\n\"\n"),
        "{text}"
    );
    assert_eq!(count_class(&events, EventClass::Warning), 1);
    assert_eq!(events.events()[1].text, "bridge:checkout:retrying");
}

#[test]
fn defaults_apply_to_bare_events() {
    let dir = tempfile::tempdir().unwrap();
    let (logger, _) = memory_logger(config(dir.path(), SinkMode::File));
    let defaults = BridgeConfig {
        default_user: "svc".to_string(),
        default_depth: 5,
    };

    with_bridge(Arc::new(logger), defaults, || {
        tracing::error!("outside any span");
        tracing::error!(depth = 0, "shallow");
    });

    let text = read_user_log(dir.path(), "svc").unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with(",Type-Error,Message-bridge:event:shallow\n"));
}

#[test]
fn own_event_sink_output_is_not_bridged_back() {
    let dir = tempfile::tempdir().unwrap();
    // default logger: its event sink re-emits entries as tracing events
    let logger = Arc::new(Logger::new(config(dir.path(), SinkMode::Both)));

    with_bridge(logger, BridgeConfig::default(), || {
        tracing::info!(user = "frank", depth = 1, "once");
    });

    let text = read_user_log(dir.path(), "frank").unwrap();
    assert_eq!(text.lines().count(), 1);
}
