//! A small pool of reusable string buffers.
//!
//! Escaping needs a scratch buffer only for the rare strings that contain something to escape.
//! Buffers are handed out as [`PooledBuffer`] guards which go back to the pool when dropped, on every exit path.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

/// Pool of scratch [`String`]s.
///
/// Each acquisition is exclusive: a buffer is never shared between two guards.
#[derive(Debug)]
pub struct ScratchPool {
    idle: Mutex<Vec<String>>,
    max_idle: usize,
    max_capacity: usize,
}

impl ScratchPool {
    /// Creates an empty pool that keeps at most `max_idle` buffers of at most `max_capacity` bytes each.
    pub const fn new(max_idle: usize, max_capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            max_capacity,
        }
    }

    /// Takes an empty buffer from the pool, allocating a new one if none is idle.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let mut buffer = self.idle.lock().pop().unwrap_or_default();
        buffer.clear();
        PooledBuffer { pool: self, buffer }
    }

    /// Number of buffers currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, buffer: String) {
        // Oversized buffers are not retained.
        if buffer.capacity() > self.max_capacity {
            return;
        }

        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(buffer);
        }
    }
}

/// Exclusive access to a pooled buffer, returned to its [`ScratchPool`] on drop.
#[derive(Debug)]
pub struct PooledBuffer<'pool> {
    pool: &'pool ScratchPool,
    buffer: String,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(core::mem::take(&mut self.buffer));
    }
}
