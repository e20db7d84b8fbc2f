use std::sync::Arc;
use std::time::Instant;

use tracefile::noop_sink::NoopEventSink;
use tracefile::{loggable, origin, Caller, Config, Logger, SinkMode};

struct Tick {
    iteration: u64,
    tags: Vec<&'static str>,
}

loggable!(Tick { iteration, tags });

fn main() {
    let dir = std::env::temp_dir().join("tracefile-load");
    let config = Config {
        trace: true,
        log_path: dir.clone(),
        destination: SinkMode::File,
        level: 4,
        depth: 4,
        ..Config::default()
    };
    let logger = Logger::with_event_sink(config, Arc::new(NoopEventSink));
    let caller = Caller::new("load", 1);
    let here = origin!();

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        let tick = Tick {
            iteration: i,
            tags: vec!["load", "default"],
        };
        logger.info_payload(&here, caller, &tick);
    }

    let elapsed = start.elapsed();
    println!(
        "default config: wrote {} records to {} in {:?} (~{:.0} rec/s)",
        n,
        dir.display(),
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
