//! Call-site resolution.
//!
//! The logger reports the location of the code that called it.
//! Functions that wrap the logger can mark themselves as helpers with [`Logger::helper`](crate::Logger::helper),
//! after which the reported location is the first frame above every helper.
//!
//! Stack capture goes through the [`CaptureFrames`] trait so the walking strategy can be swapped out,
//! [`BacktraceFrames`] is the native implementation.

use std::fmt;
use std::sync::Arc;

use dashmap::DashSet;

/// Maximum number of frames inspected when resolving a caller.
pub const MAX_STACK_DEPTH: usize = 50;

/// One resolved stack frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Demangled function path, without the symbol hash.
    pub function: String,
    /// Source file, with `/` separators.
    pub file: String,
    /// Source line.
    pub line: u32,
}

impl Frame {
    /// Creates a frame.
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: normalize_path(&file.into()),
            line,
        }
    }
}

impl fmt::Display for Frame {
    /// Writes the shortened `file:line` form used in log output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", trim_caller_path(&self.file), self.line)
    }
}

/// Source of stack frames.
pub trait CaptureFrames: fmt::Debug + Send + Sync {
    /// Passes frames to `visit`, most recent first, until it returns `false` or the stack ends.
    ///
    /// The first frame passed is the first one outside of the logging machinery after dropping `skip` more
    /// frames.
    fn walk(&self, skip: usize, visit: &mut dyn FnMut(Frame) -> bool);

    /// Returns up to `max` frames, most recent first, starting like [`walk`](CaptureFrames::walk).
    fn capture(&self, skip: usize, max: usize) -> Vec<Frame> {
        let mut frames = Vec::new();
        if max > 0 {
            self.walk(skip, &mut |frame| {
                frames.push(frame);
                frames.len() < max
            });
        }
        frames
    }
}

/// Walks the native stack with the `backtrace` crate.
///
/// Every resolved symbol, including inlined ones, counts as a frame.
/// Symbols without file information (system libraries, stripped binaries) are ignored.
/// Tracing stops as soon as the visitor is done, symbols further down the stack are never resolved.
#[derive(Debug, Default)]
pub struct BacktraceFrames(());

impl BacktraceFrames {
    /// A `const` version of `BacktraceFrames::default()`.
    pub const DEFAULT: Self = BacktraceFrames(());
}

impl CaptureFrames for BacktraceFrames {
    fn walk(&self, skip: usize, visit: &mut dyn FnMut(Frame) -> bool) {
        let mut machinery = LeadingMachinery::default();
        let mut skip = skip;
        let mut done = false;

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if done {
                    return;
                }
                let (Some(name), Some(file)) = (symbol.name(), symbol.filename()) else {
                    return;
                };
                let function = format!("{name:#}");
                if !machinery.is_past(&function) {
                    return;
                }
                if skip > 0 {
                    skip -= 1;
                    return;
                }
                done = !visit(Frame::new(
                    function,
                    file.to_string_lossy(),
                    symbol.lineno().unwrap_or_default(),
                ));
            });
            !done
        });
    }
}

/// Tracks the run of machinery frames at the top of a stack walk.
///
/// Only the first run counts: a log call nested in another one, from a `Display` impl or a writer for example,
/// reports its own call site and not the one of the outer call.
#[derive(Debug, Default)]
struct LeadingMachinery {
    seen: bool,
    past: bool,
}

impl LeadingMachinery {
    /// Feeds the next frame, returns `true` once the frames are past the leading run.
    ///
    /// Frames above the first machinery frame, and language shims inside the run, are not part of the caller's
    /// stack.
    fn is_past(&mut self, function: &str) -> bool {
        if !self.past {
            if is_machinery(function) {
                self.seen = true;
            } else if self.seen && !is_shim(function) {
                self.past = true;
            }
        }
        self.past
    }
}

/// Whether `function` belongs to the stack walker or to the logger itself.
fn is_machinery(function: &str) -> bool {
    let function = function.trim_start_matches('<');
    function.starts_with("backtrace::")
        || function.starts_with("log::")
        || (function.starts_with("kvlog::") && !function.contains("::tests::"))
}

/// Whether `function` is a closure or trait shim from `core` or `alloc` that can sit between machinery frames.
fn is_shim(function: &str) -> bool {
    let function = function.trim_start_matches('<');
    function.starts_with("core::")
        || function.starts_with("alloc::")
        || function.contains(" as core::ops::function::Fn")
}

/// Set of function identities marked as helpers.
///
/// Append-only, insertion is idempotent and safe from any thread.
#[derive(Clone, Debug, Default)]
pub struct HelperSet(DashSet<String>);

impl HelperSet {
    /// Marks `function` as a helper. Returns `false` if it already was one.
    pub fn insert(&self, function: &str) -> bool {
        if self.0.contains(function) {
            return false;
        }
        self.0.insert(function.to_owned())
    }

    /// Returns `true` if `function` is marked as a helper.
    pub fn contains(&self, function: &str) -> bool {
        self.0.contains(function)
    }

    /// Number of marked functions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no function is marked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Finds the call site of a log call, skipping helper frames.
#[derive(Clone, Debug)]
pub struct CallerResolver {
    helpers: HelperSet,
    frames: Arc<dyn CaptureFrames>,
}

impl Default for CallerResolver {
    fn default() -> Self {
        Self::new(Arc::new(BacktraceFrames::DEFAULT))
    }
}

impl CallerResolver {
    /// Creates a resolver reading frames from `frames`, with no helpers marked.
    pub fn new(frames: Arc<dyn CaptureFrames>) -> Self {
        Self {
            helpers: HelperSet::default(),
            frames,
        }
    }

    /// Returns a resolver with a copy of the current helper set.
    ///
    /// Helpers marked on either resolver afterwards are not seen by the other.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// The functions marked as helpers.
    pub fn helpers(&self) -> &HelperSet {
        &self.helpers
    }

    /// Resolves the first non-helper frame, `skip` frames above the caller of the logger.
    ///
    /// Returns the last inspected frame when every frame is a helper and `None` if no frame could be captured.
    pub fn resolve(&self, skip: usize) -> Option<Frame> {
        let mut inspected = 0;
        let mut last = None;
        self.frames.walk(skip, &mut |frame| {
            inspected += 1;
            let helper = self.helpers.contains(&frame.function);
            last = Some(frame);
            helper && inspected < MAX_STACK_DEPTH
        });
        last
    }

    /// Marks the function `skip` frames above the caller of the logger as a helper.
    pub fn mark_helper(&self, skip: usize) {
        if let Some(frame) = self.frames.capture(skip, 1).into_iter().next() {
            self.helpers.insert(&frame.function);
        }
    }
}

/// Rewrites Windows path separators to `/`.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Keeps the last two segments of `path`, the directory and the file name.
///
/// Paths with fewer than two separators are returned unchanged.
pub fn trim_caller_path(path: &str) -> &str {
    let Some(last) = path.rfind('/') else {
        return path;
    };
    match path[..last].rfind('/') {
        Some(penultimate) => &path[penultimate + 1..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::{
        BacktraceFrames, CallerResolver, CaptureFrames, Frame, HelperSet, LeadingMachinery, is_machinery,
        is_shim, trim_caller_path,
    };
    use crate::test_helpers::ScriptedFrames;

    fn oven_stack() -> Arc<ScriptedFrames> {
        Arc::new(ScriptedFrames(vec![
            Frame::new("oven::log_degrees", "src/oven/log.rs", 12),
            Frame::new("oven::start_oven", "src/oven/mod.rs", 30),
            Frame::new("oven::main", "src/main.rs", 7),
            Frame::new("std::rt::lang_start", "library/std/src/rt.rs", 195),
        ]))
    }

    #[test_case("/home/user/project/src/main.rs", "src/main.rs"; "absolute")]
    #[test_case("src/main.rs", "src/main.rs"; "one separator")]
    #[test_case("main.rs", "main.rs"; "file only")]
    #[test_case("a/b/c", "b/c"; "two separators")]
    #[test_case("", ""; "empty")]
    fn trims_to_two_segments(path: &str, expected: &str) {
        assert_eq!(trim_caller_path(path), expected);
    }

    #[test]
    fn windows_paths_are_normalized() {
        let frame = Frame::new("f", r"C:\work\oven\src\main.rs", 3);
        assert_eq!(frame.file, "C:/work/oven/src/main.rs");
        assert_eq!(frame.to_string(), "src/main.rs:3");
    }

    #[test]
    fn first_frame_without_helpers() {
        let resolver = CallerResolver::new(oven_stack());
        assert_eq!(
            resolver.resolve(0).map(|frame| frame.to_string()),
            Some("oven/log.rs:12".to_owned())
        );
        assert_eq!(
            resolver.resolve(1).map(|frame| frame.function),
            Some("oven::start_oven".to_owned())
        );
    }

    #[test]
    fn stacked_helpers_are_skipped() {
        let resolver = CallerResolver::new(oven_stack());
        resolver.mark_helper(0);
        resolver.mark_helper(1);

        assert_eq!(
            resolver.resolve(0),
            Some(Frame::new("oven::main", "src/main.rs", 7))
        );
    }

    #[test]
    fn all_helpers_resolve_to_last_frame() {
        let resolver = CallerResolver::new(oven_stack());
        for skip in 0..4 {
            resolver.mark_helper(skip);
        }

        assert_eq!(
            resolver.resolve(0).map(|frame| frame.function),
            Some("std::rt::lang_start".to_owned())
        );
        assert_eq!(resolver.resolve(10), None);
    }

    #[test]
    fn marking_is_idempotent() {
        let helpers = HelperSet::default();
        assert!(helpers.is_empty());
        assert!(helpers.insert("oven::start_oven"));
        assert!(!helpers.insert("oven::start_oven"));
        assert_eq!(helpers.len(), 1);
    }

    #[test]
    fn snapshot_is_independent() {
        let resolver = CallerResolver::new(oven_stack());
        resolver.mark_helper(0);

        let derived = resolver.snapshot();
        derived.mark_helper(1);

        assert_eq!(resolver.helpers().len(), 1);
        assert_eq!(derived.helpers().len(), 2);
    }

    #[test_case("backtrace::trace", true; "walker")]
    #[test_case("kvlog::logger::Logger::info", true; "logger")]
    #[test_case("<kvlog::caller::BacktraceFrames as kvlog::caller::CaptureFrames>::capture", true; "trait impl")]
    #[test_case("log::__private_api::log", true; "log facade")]
    #[test_case("kvlog::caller::tests::native_stack", false; "unit test")]
    #[test_case("oven::main", false; "application")]
    fn machinery(function: &str, expected: bool) {
        assert_eq!(is_machinery(function), expected);
    }

    #[test_case("core::ops::function::FnOnce::call_once", true; "core")]
    #[test_case("alloc::boxed::Box<F,A>::call", true; "alloc")]
    #[test_case("<&mut F as core::ops::function::FnMut<A>>::call_mut", true; "closure reference")]
    #[test_case("std::rt::lang_start", false; "runtime")]
    #[test_case("<oven::Door as core::fmt::Display>::fmt", false; "application impl")]
    fn shims(function: &str, expected: bool) {
        assert_eq!(is_shim(function), expected);
    }

    fn past_machinery(functions: &[&str]) -> Vec<String> {
        let mut machinery = LeadingMachinery::default();
        functions
            .iter()
            .filter(|function| machinery.is_past(function))
            .map(|function| function.to_string())
            .collect()
    }

    #[test]
    fn leading_machinery_is_dropped() {
        assert_eq!(
            past_machinery(&[
                "__rust_probestack",
                "backtrace::trace",
                "<&mut F as core::ops::function::FnMut<A>>::call_mut",
                "kvlog::caller::CallerResolver::resolve",
                "kvlog::logger::Logger::info",
                "oven::main",
                "std::rt::lang_start",
            ]),
            ["oven::main", "std::rt::lang_start"]
        );
    }

    #[test]
    fn nested_log_call_keeps_its_own_site() {
        assert_eq!(
            past_machinery(&[
                "backtrace::trace",
                "kvlog::logger::Logger::info",
                "<oven::Door as core::fmt::Display>::fmt",
                "alloc::string::ToString::to_string",
                "kvlog::entry::assemble",
                "kvlog::logger::Logger::info",
                "oven::main",
            ]),
            [
                "<oven::Door as core::fmt::Display>::fmt",
                "alloc::string::ToString::to_string",
                "kvlog::entry::assemble",
                "kvlog::logger::Logger::info",
                "oven::main",
            ]
        );
    }

    #[derive(Debug)]
    struct CountingFrames {
        frames: Vec<Frame>,
        visited: AtomicUsize,
    }

    impl CaptureFrames for CountingFrames {
        fn walk(&self, skip: usize, visit: &mut dyn FnMut(Frame) -> bool) {
            for frame in self.frames.iter().skip(skip) {
                self.visited.fetch_add(1, Ordering::Relaxed);
                if !visit(frame.clone()) {
                    break;
                }
            }
        }
    }

    #[test]
    fn resolve_stops_at_first_caller() {
        let frames = Arc::new(CountingFrames {
            frames: oven_stack().0.clone(),
            visited: AtomicUsize::new(0),
        });
        let resolver = CallerResolver::new(frames.clone());
        resolver.mark_helper(0);
        assert_eq!(frames.visited.swap(0, Ordering::Relaxed), 1);

        assert_eq!(
            resolver.resolve(0).map(|frame| frame.function),
            Some("oven::start_oven".to_owned())
        );
        assert_eq!(frames.visited.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn capture_is_bounded() {
        let frames = oven_stack();
        assert_eq!(frames.capture(1, 2).len(), 2);
        assert_eq!(frames.capture(3, 5).len(), 1);
        assert!(frames.capture(0, 0).is_empty());
    }

    #[inline(never)]
    fn resolve_here(resolver: &CallerResolver) -> Option<Frame> {
        resolver.resolve(0)
    }

    #[test]
    fn native_stack() {
        let resolver = CallerResolver::new(Arc::new(BacktraceFrames::DEFAULT));
        let line = line!() + 1;
        let frame = resolve_here(&resolver).expect("debug info is available in tests");

        assert!(frame.function.ends_with("resolve_here"), "{frame:?}");
        assert!(frame.file.ends_with("src/caller.rs"), "{frame:?}");
        assert!(frame.line < line, "{frame:?}");
    }
}
