//! Logs a small baking session to stderr with call sites and timestamps.
//!
//! Run with `OVEN_LOG=debug` to see the debug entries.

use kvlog::{Level, Logger, Output, debug, info, keyvals, warn};

fn start_oven(logger: &Logger, degree: u32) {
    logger.helper();
    logger.info("Starting oven", keyvals!(degree, "unit" = "celsius"));
}

fn main() {
    let logger = Logger::builder()
        .output(Output::Stderr)
        .level(Level::Info)
        .level_from_env("OVEN_LOG")
        .report_caller(true)
        .report_timestamp(true)
        .prefix("oven")
        .build();

    start_oven(&logger, 400);

    let baker = logger.with(keyvals!(baker = "Hugo", shift = 2));
    debug!(logger: baker, "Weighing flour", grams = 500);
    info!(logger: baker, "Mixing", "ingredients" = "flour, sugar, eggs");
    warn!(
        logger: baker,
        "Recipe has notes",
        notes = "preheat first\nuse the middle rack\ndo not open the door"
    );

    let err = std::io::Error::other("door sensor not responding");
    baker.error("Door check failed", keyvals!(err = err.to_string()));
}
