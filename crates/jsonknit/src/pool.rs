//! Reusable-buffer pool shared across encoder and decoder instances.
//!
//! The pool is the only state shared between otherwise-independent codec
//! instances, and the only concurrency-sensitive piece of the crate. It is an
//! explicitly constructed, injectable object rather than a hidden singleton:
//! [`Encoder::with_pool`](crate::Encoder::with_pool) and
//! [`Decoder::with_pool`](crate::Decoder::with_pool) accept any pool, while
//! the plain constructors fall back to [`Pool::shared`].

use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use crate::buffer::ByteBuffer;

static SHARED: LazyLock<Arc<Pool>> = LazyLock::new(|| Arc::new(Pool::new()));

/// A thread-safe free list of [`ByteBuffer`]s.
///
/// An acquired buffer is unreachable from the pool until released again, and
/// release clears the buffer, so [`Pool::acquire`] always hands out a
/// logically-empty buffer.
#[derive(Debug, Default)]
pub struct Pool {
    free: Mutex<Vec<ByteBuffer>>,
}

impl Pool {
    /// Returns an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the process-wide default pool.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Hands out an empty buffer, constructing one when the free list is
    /// exhausted.
    #[must_use]
    pub fn acquire(&self) -> ByteBuffer {
        self.lock().pop().unwrap_or_else(ByteBuffer::new)
    }

    /// Clears `buf` and makes it available to a future [`Pool::acquire`].
    pub fn release(&self, mut buf: ByteBuffer) {
        buf.clear();
        self.lock().push(buf);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ByteBuffer>> {
        // A panic while holding the lock leaves nothing inconsistent worse
        // than a stale free list, so poisoning is absorbed.
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
