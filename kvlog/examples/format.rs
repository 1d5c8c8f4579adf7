//! Shows the text and JSON output of the same entries.

use std::time::Duration;

use kvlog::{Formatter, Logger, Output, keyvals};

fn main() {
    let logger = Logger::builder()
        .output(Output::Stdout)
        .report_timestamp(true)
        .time_format("%H:%M:%S%.3f")
        .build();

    for formatter in [Formatter::Text, Formatter::Json] {
        logger.set_formatter(formatter);
        for item in ["bread", "cake"] {
            for percent in [0, 50, 100] {
                logger.info(format!("Baking {item}"), keyvals!(percent, "ready" = percent == 100));
                std::thread::sleep(Duration::from_millis(10));
            }
        }
    }

    logger.print("Done", &[]);
}
