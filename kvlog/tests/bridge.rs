#![expect(missing_docs, reason = "tests")]

use std::sync::Arc;

use indoc::indoc;
use kvlog::test_helpers::SharedBuffer;
use kvlog::{Level, Logger, Output};
use pretty_assertions::assert_eq;

// Installing a `log` logger is once per process, so this file holds a single test.
#[test]
fn log_records_are_forwarded() {
    let buffer = SharedBuffer::default();
    let logger = Logger::builder()
        .output(Output::writer(buffer.clone()))
        .level(Level::Info)
        .prefix("oven")
        .build();

    kvlog::bridge::init(Arc::new(logger)).unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    log::trace!("filtered");
    log::debug!("filtered");
    log::info!(target: "oven::door", "door {}", "closed");
    log::warn!(target: "oven::fan", "fan at {}%", 80);
    log::error!(target: "", "no target");

    assert_eq!(
        buffer.contents(),
        indoc! {"
            INFO oven: door closed target=oven::door
            WARN oven: fan at 80% target=oven::fan
            ERROR oven: no target
        "}
    );

    assert!(kvlog::bridge::init(Arc::new(Logger::new())).is_err());
}
