//! Live reload of the file-driven logging configuration.
//!
//! The file-driven chain must be the first subscriber installed in the
//! process, so everything runs in one test function in this binary: the
//! other test binaries install the default chain and would race it.

use std::time::{Duration, Instant};

use fleet_api::{ApiHost, GatewaySequence, HostError, PrimaryServerSet, ServerRegistry};
use tracing::Level;

mod common;

fn empty_registry() -> ServerRegistry {
    ServerRegistry::new(PrimaryServerSet::new(), GatewaySequence::new())
}

fn trace_enabled_within(deadline: Duration) -> bool {
    let until = Instant::now() + deadline;
    loop {
        if tracing::enabled!(Level::TRACE) {
            return true;
        }
        if Instant::now() >= until {
            return false;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
}

#[test]
fn file_edits_change_the_active_filter_without_restart() {
    let path = common::write_logging_config("live", "filter = \"error\"\n");

    let mut config = common::localhost_config();
    config.logging_config = Some(path.clone());

    let mut host = ApiHost::build_with(config, empty_registry()).unwrap();
    host.start().unwrap();

    assert!(
        !tracing::enabled!(Level::TRACE),
        "initial filter admits errors only"
    );

    // Raise verbosity through the file; the watcher applies it live.
    std::fs::write(&path, "filter = \"trace\"\n").unwrap();
    assert!(
        trace_enabled_within(Duration::from_secs(5)),
        "file edit must take effect without a restart"
    );

    // A bad edit keeps the current filter.
    std::fs::write(&path, "filter = \"broken==\"\n").unwrap();
    std::thread::sleep(Duration::from_millis(500));
    assert!(
        tracing::enabled!(Level::TRACE),
        "bad edit keeps the previous filter"
    );

    // A second file-driven chain cannot be installed in this process: its
    // directives could never take effect, so build refuses.
    let other_path = common::write_logging_config("second", "filter = \"debug\"\n");
    let mut other_config = common::localhost_config();
    other_config.logging_config = Some(other_path);
    let err = ApiHost::build_with(other_config, empty_registry()).unwrap_err();
    assert!(matches!(err, HostError::Configuration(_)));

    // The default chain is still tolerated alongside the installed one.
    ApiHost::build_with(common::localhost_config(), empty_registry()).unwrap();

    host.shutdown().unwrap();
}
