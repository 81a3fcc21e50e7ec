use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::task::AbortHandle;
use tokio::time::sleep;

struct Pending {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Default)]
struct Slots {
    next_generation: u64,
    pending: HashMap<String, Pending>,
}

/// Delays note writes until edits settle. A new edit for the same key
/// aborts the write still waiting on its timer; once the timer fires the
/// write runs on its own task and is no longer cancellable.
#[derive(Clone)]
pub struct NotesDebouncer {
    delay: Duration,
    slots: Arc<Mutex<Slots>>,
}

impl NotesDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slots: Arc::new(Mutex::new(Slots::default())),
        }
    }

    pub fn schedule<F>(&self, key: impl Into<String>, commit: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let key = key.into();
        let mut slots = lock(&self.slots);
        slots.next_generation += 1;
        let generation = slots.next_generation;

        let delay = self.delay;
        let registry = Arc::clone(&self.slots);
        let timer_key = key.clone();
        let timer = tokio::spawn(async move {
            sleep(delay).await;
            {
                let mut slots = lock(&registry);
                if slots
                    .pending
                    .get(&timer_key)
                    .is_some_and(|pending| pending.generation == generation)
                {
                    slots.pending.remove(&timer_key);
                }
            }
            tokio::spawn(commit);
        });

        let replaced = slots.pending.insert(
            key,
            Pending {
                generation,
                handle: timer.abort_handle(),
            },
        );
        if let Some(previous) = replaced {
            previous.handle.abort();
        }
    }

    /// Number of writes still waiting on their timer.
    pub fn pending(&self) -> usize {
        lock(&self.slots).pending.len()
    }
}

fn lock(slots: &Mutex<Slots>) -> std::sync::MutexGuard<'_, Slots> {
    // a panic while holding the lock leaves the map itself consistent
    slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn only_last_edit_is_committed() {
        let debouncer = NotesDebouncer::new(Duration::from_millis(60));
        let committed = Arc::new(Mutex::new(Vec::new()));

        for text in ["h", "he", "hello"] {
            let committed = Arc::clone(&committed);
            debouncer.schedule("task-1", async move {
                committed.lock().unwrap().push(text.to_string());
            });
            sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(debouncer.pending(), 1);

        sleep(Duration::from_millis(250)).await;
        assert_eq!(*committed.lock().unwrap(), vec!["hello".to_string()]);
        assert_eq!(debouncer.pending(), 0);
    }

    #[tokio::test]
    async fn separate_keys_do_not_cancel_each_other() {
        let debouncer = NotesDebouncer::new(Duration::from_millis(30));
        let count = Arc::new(AtomicUsize::new(0));

        for key in ["task-1", "task-2"] {
            let count = Arc::clone(&count);
            debouncer.schedule(key, async move {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
