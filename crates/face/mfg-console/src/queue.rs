//! Main-thread task queue.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use log::{debug, warn};

use crate::config::Config;
use crate::error::MfgError;
use crate::task::FaceTask;

/// Host facility that runs tasks on the main thread, in enqueue order.
///
/// `add_task` must not block on execution: success means "queued", nothing
/// more. There is no completion signal and no cancellation.
pub trait MainThreadTaskQueue: Send + Sync {
    fn add_task(&self, task: FaceTask) -> Result<(), MfgError>;
}

/// Bounded FIFO the host drains once per frame with [`LocalTaskQueue::run_pending`].
#[derive(Debug)]
pub struct LocalTaskQueue {
    pending: Mutex<VecDeque<FaceTask>>,
    capacity: usize,
}

impl LocalTaskQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.task_queue_capacity)
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    /// Run every task queued before this call, oldest first. Tasks queued
    /// while these run wait for the next call. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        // Take the batch first so running tasks never hold the queue lock.
        let batch = std::mem::take(&mut *self.queue());
        let count = batch.len();
        for task in batch {
            task.run();
        }
        if count > 0 {
            debug!("LocalTaskQueue :: ran {count} task(s)");
        }
        count
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<FaceTask>> {
        // Queued records are plain values; a panic elsewhere cannot leave one half built.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LocalTaskQueue {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl MainThreadTaskQueue for LocalTaskQueue {
    fn add_task(&self, task: FaceTask) -> Result<(), MfgError> {
        let mut queue = self.queue();
        if queue.len() >= self.capacity {
            warn!(
                "LocalTaskQueue :: queue full (max={}), dropping {}",
                self.capacity,
                task.operation()
            );
            return Err(MfgError::QueueFull {
                capacity: self.capacity,
            });
        }
        queue.push_back(task);
        Ok(())
    }
}
