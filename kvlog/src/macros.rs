//! Macros for leveled logging with inline key/value pairs.
//!
//! # Logging Macros
//!
//! - `log!`: Generic logging macro that accepts a level
//! - `debug!`, `info!`, `warn!`, `error!`: Leveled logging
//! - `fatal!`: Logs at the fatal level and terminates the process
//!
//! Every logging macro writes to the default logger unless a `logger: <expr>,` argument comes first.
//!
//! # Key/Value Handling
//!
//! - `keyvals!`: Creates a flat slice of keys and values
//!
//! Pairs are written as `key = value`, `"quoted key" = value`, or just `key` to capture a variable of the same
//! name.

/// Logs a message at the given level.
///
/// Unlike [`fatal!`](crate::fatal), logging at [`Level::Fatal`](crate::Level::Fatal) through this macro does not
/// terminate the process.
///
/// # Examples
///
/// ```rust
/// use kvlog::{Level, Logger, log};
///
/// let logger = Logger::builder().output(kvlog::Output::Discard).build();
/// let port = 8080;
/// log!(logger: logger, Level::Info, "Server listening", port, "protocol" = "HTTP");
/// log!(Level::Debug, "Using the default logger");
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $msg:expr $(, $($kvs:tt)*)?) => {
        $logger.log($level, $msg, $crate::keyvals!($($($kvs)*)?))
    };
    ($level:expr, $msg:expr $(, $($kvs:tt)*)?) => {
        $crate::log!(logger: $crate::global::default_logger(), $level, $msg $(, $($kvs)*)?)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_method {
    ($method:ident, $logger:expr, $msg:expr $(, $($kvs:tt)*)?) => {
        $logger.$method($msg, $crate::keyvals!($($($kvs)*)?))
    };
}

/// Logs a debug-level message.
///
/// # Examples
///
/// ```rust
/// use kvlog::debug;
///
/// let request_id = "req-123";
/// debug!("Function entry", function = "process_request", request_id);
/// ```
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($args:tt)*) => {
        $crate::__log_method!(debug, $logger, $($args)*)
    };
    ($($args:tt)*) => {
        $crate::__log_method!(debug, $crate::global::default_logger(), $($args)*)
    };
}

/// Logs an info-level message.
///
/// # Examples
///
/// ```rust
/// use kvlog::{Logger, info};
///
/// let logger = Logger::builder().output(kvlog::Output::Discard).build();
/// let version = "1.0.0";
/// info!(logger: logger, "Application started", version);
/// ```
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($args:tt)*) => {
        $crate::__log_method!(info, $logger, $($args)*)
    };
    ($($args:tt)*) => {
        $crate::__log_method!(info, $crate::global::default_logger(), $($args)*)
    };
}

/// Logs a warn-level message.
///
/// # Examples
///
/// ```rust
/// use kvlog::warn;
///
/// let usage = 85.5;
/// warn!("Memory usage high", usage_percent = usage, "threshold" = 80);
/// ```
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $($args:tt)*) => {
        $crate::__log_method!(warn, $logger, $($args)*)
    };
    ($($args:tt)*) => {
        $crate::__log_method!(warn, $crate::global::default_logger(), $($args)*)
    };
}

/// Logs an error-level message.
///
/// # Examples
///
/// ```rust
/// use kvlog::error;
///
/// let error_code = 404;
/// error!("Request failed", error_code, "path" = "/api/users");
/// ```
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($args:tt)*) => {
        $crate::__log_method!(error, $logger, $($args)*)
    };
    ($($args:tt)*) => {
        $crate::__log_method!(error, $crate::global::default_logger(), $($args)*)
    };
}

/// Logs a fatal-level message and terminates the process with exit code 1.
///
/// # Examples
///
/// ```rust,no_run
/// use kvlog::fatal;
///
/// fatal!("Configuration missing", "path" = "/etc/oven.toml");
/// ```
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $($args:tt)*) => {
        $crate::__log_method!(fatal, $logger, $($args)*)
    };
    ($($args:tt)*) => {
        $crate::__log_method!(fatal, $crate::global::default_logger(), $($args)*)
    };
}

/// Constructs a flat slice of keys and values.
///
/// # Examples
///
/// ```rust
/// use kvlog::{Value, keyvals};
///
/// let user_id = 123;
/// let flat = keyvals!(user_id, "status" = "active", http.method = "GET");
/// assert_eq!(
///     flat,
///     [
///         Value::from("user_id"),
///         Value::from(123),
///         Value::from("status"),
///         Value::from("active"),
///         Value::from("http.method"),
///         Value::from("GET"),
///     ]
/// );
///
/// let empty = keyvals!();
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! keyvals {
    ({ $($kvs:tt)* }) => {
        $crate::keyvals_inner!(@ { }, { $($kvs)* })
    };
    ($($kvs:tt)*) => {
        $crate::keyvals_inner!(@ { }, { $($kvs)* })
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! keyvals_inner {
    // Base case, remaining tokens is empty.
    (@ { $($val:expr,)* }, { } ) => {
        &[ $($val,)* ] as &[$crate::Value<'_>]
    };

    // Take one pair, add key and value to the output, and recurse on the remaining tokens.
    (@ { $($out:expr,)* }, { $($key:ident).+ $(, $($rest:tt)*)? }) => {
        $crate::keyvals_inner!(
            @ { $($out,)* $crate::Value::from(::core::stringify!($($key).+)), $crate::Value::from($($key).+), },
            { $($($rest)*)? }
        )
    };
    (@ { $($out:expr,)* }, { $($key:ident).+ = $value:expr $(, $($rest:tt)*)? }) => {
        $crate::keyvals_inner!(
            @ { $($out,)* $crate::Value::from(::core::stringify!($($key).+)), $crate::Value::from($value), },
            { $($($rest)*)? }
        )
    };
    (@ { $($out:expr,)* }, { $key:literal = $value:expr $(, $($rest:tt)*)? }) => {
        $crate::keyvals_inner!(
            @ { $($out,)* $crate::Value::from($key), $crate::Value::from($value), },
            { $($($rest)*)? }
        )
    };
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_helpers::SharedBuffer;
    use crate::{Level, Logger, Output, Value};

    #[test]
    fn keyvals_forms() {
        let temperature = 180;
        let flat = keyvals!(temperature, unit = "C", "oven id" = 3u8, probe.depth = 2.5);
        assert_eq!(
            flat,
            [
                Value::from("temperature"),
                Value::from(180),
                Value::from("unit"),
                Value::from("C"),
                Value::from("oven id"),
                Value::from(3u8),
                Value::from("probe.depth"),
                Value::from(2.5),
            ]
        );
        assert!(keyvals!().is_empty());
    }

    #[test]
    fn logging_macros() {
        let buffer = SharedBuffer::default();
        let logger = Logger::builder()
            .output(Output::writer(buffer.clone()))
            .level(Level::Debug)
            .build();

        debug!(logger: logger, "preheating", target = 200);
        info!(logger: logger, "ready");
        warn!(logger: logger, "hot", "celsius" = 250,);
        error!(logger: logger, format!("burnt {} cakes", 2));
        log!(logger: logger, Level::Fatal, "not fatal");

        assert_eq!(
            buffer.contents(),
            indoc::indoc! {r#"
                DEBUG preheating target=200
                INFO ready
                WARN hot celsius=250
                ERROR burnt 2 cakes
                FATAL not fatal
            "#}
        );
    }
}
