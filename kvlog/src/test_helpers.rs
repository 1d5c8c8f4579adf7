use std::io::{self, Write};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use parking_lot::Mutex;

use crate::caller::{CaptureFrames, Frame};

/// In-memory writer whose clones share one buffer, for inspecting what a logger wrote.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A time function pinned to the Unix epoch.
pub fn zero_time() -> DateTime<FixedOffset> {
    DateTime::UNIX_EPOCH.fixed_offset()
}

/// Replays a fixed stack, most recent frame first.
#[derive(Debug, Default)]
pub struct ScriptedFrames(pub Vec<Frame>);

impl CaptureFrames for ScriptedFrames {
    fn walk(&self, skip: usize, visit: &mut dyn FnMut(Frame) -> bool) {
        for frame in self.0.iter().skip(skip) {
            if !visit(frame.clone()) {
                break;
            }
        }
    }
}
