//! Single-slot cancellable tasks and per-key debouncing.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct SlotTask {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

/// Holds at most one live task. Installing a new one cancels its predecessor.
#[derive(Default)]
pub struct TaskSlot {
    current: Mutex<Option<SlotTask>>,
}

impl TaskSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` into the slot, cancelling whatever ran there before.
    ///
    /// `token` is the one `task` observes.
    pub fn spawn<F>(&self, token: CancellationToken, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.take() {
            previous.token.cancel();
        }
        *current = Some(SlotTask {
            token,
            handle: Some(tokio::spawn(task)),
        });
    }

    /// Register work the caller runs inline, cancelling the predecessor.
    pub fn claim(&self, token: CancellationToken) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.take() {
            previous.token.cancel();
        }
        *current = Some(SlotTask {
            token,
            handle: None,
        });
    }

    pub fn cancel(&self) {
        if let Some(previous) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            previous.token.cancel();
        }
    }

    /// Whether the slot holds a task that is neither cancelled nor finished.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| {
                !task.token.is_cancelled()
                    && task.handle.as_ref().is_none_or(|handle| !handle.is_finished())
            })
    }
}

impl std::fmt::Debug for TaskSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSlot")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Run `task` after `delay` unless `token` is cancelled first.
pub async fn delayed<F>(token: CancellationToken, delay: Duration, task: F)
where
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => {}
        () = tokio::time::sleep(delay) => task.await,
    }
}

/// Trailing-edge debouncer: one pending task per key, each new schedule
/// restarts the key's timer.
pub struct Debouncer<K> {
    delay: Duration,
    slots: Mutex<HashMap<K, TaskSlot>>,
}

impl<K: Eq + Hash + Clone> Debouncer<K> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slots: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `work` for `key` once the delay elapses, replacing any task
    /// already pending for the same key. `work` receives the token it must
    /// honour; the token is a child of `parent`.
    pub fn schedule<F, Fut>(&self, key: K, parent: &CancellationToken, work: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = parent.child_token();
        let task = delayed(token.clone(), self.delay, work(token.clone()));
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.retain(|_, slot| slot.is_active());
        slots.entry(key).or_default().spawn(token, task);
    }

    pub fn cancel(&self, key: &K) {
        if let Some(slot) = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
        {
            slot.cancel();
        }
    }

    pub fn cancel_all(&self) {
        let slots: Vec<TaskSlot> = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, slot)| slot)
            .collect();
        for slot in slots {
            slot.cancel();
        }
    }

    /// Keys with a live pending task.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.is_active())
            .count()
    }
}

impl<K> std::fmt::Debug for Debouncer<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
