//! Animation state handle and the lock every access goes through.
//!
//! The host owns the face animation state and advances it every frame on its
//! main thread. Scripts read and write the same state from other threads, so
//! all access is funnelled through [`AnimStateLock`]: callers get a scoped
//! [`AnimStateGuard`] and the lock is released when the guard drops, on every
//! exit path.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::channels::ChannelKind;
use crate::error::ChannelError;

/// Read/write contract of one actor's face animation state.
///
/// Host adapters implement this over the engine's own structure. Values are
/// normalized floats; range checks and percent conversion happen in
/// [`crate::accessor`], never here.
pub trait FaceChannels: Send {
    /// Currently populated values of a kind. The length is the live count,
    /// which may be lower than the kind's fixed capacity.
    fn values(&self, kind: ChannelKind) -> &[f32];

    /// Set a phoneme target.
    fn set_phoneme(&mut self, id: usize, value: f32);

    /// Set a modifier target.
    fn set_modifier(&mut self, id: usize, value: f32);

    /// Write the override value for a mood.
    fn set_expression_override(&mut self, mood: u32, value: f32);

    fn expression_override_enabled(&self) -> bool;

    fn set_expression_override_enabled(&mut self, enabled: bool);

    /// Host primitive: drop any expression override and return to the natural blend.
    fn clear_expression_override(&mut self);

    /// Host primitive: zero every channel and restart the blend.
    fn reset(&mut self);
}

/// Mutual exclusion around a [`FaceChannels`] implementation.
pub struct AnimStateLock {
    inner: Mutex<Box<dyn FaceChannels>>,
    acquisitions: AtomicU64,
}

impl AnimStateLock {
    pub fn new<C: FaceChannels + 'static>(channels: C) -> Self {
        Self {
            inner: Mutex::new(Box::new(channels)),
            acquisitions: AtomicU64::new(0),
        }
    }

    /// Convenience for the common case of a state shared between host and scripts.
    pub fn shared<C: FaceChannels + 'static>(channels: C) -> Arc<Self> {
        Arc::new(Self::new(channels))
    }

    /// Acquire the lock. A poisoned lock is reported instead of recovered: the
    /// writer that panicked may have left an override sequence half applied.
    pub fn lock(&self) -> Result<AnimStateGuard<'_>, ChannelError> {
        let guard = self.inner.lock().map_err(|_| ChannelError::LockPoisoned)?;
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
        Ok(AnimStateGuard { guard })
    }

    /// Number of successful acquisitions so far.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for AnimStateLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimStateLock")
            .field("acquisitions", &self.acquisitions())
            .finish_non_exhaustive()
    }
}

/// Scoped access to a locked animation state.
pub struct AnimStateGuard<'a> {
    guard: MutexGuard<'a, Box<dyn FaceChannels>>,
}

impl Deref for AnimStateGuard<'_> {
    type Target = dyn FaceChannels;

    fn deref(&self) -> &Self::Target {
        &**self.guard
    }
}

impl DerefMut for AnimStateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut **self.guard
    }
}
