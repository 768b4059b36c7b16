use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

type Queue = Arc<Mutex<VecDeque<usize>>>;

fn lock(queue: &Queue) -> MutexGuard<'_, VecDeque<usize>> {
    // The critical sections never panic mid-update, so a poisoned queue is still consistent.
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Producer half. Not `Clone`: the sampling loop is the only writer.
#[derive(Debug)]
pub struct EventSender {
    queue: Queue,
}

/// Consumer half. Not `Clone`: the consumer is the only reader.
#[derive(Debug)]
pub struct EventReceiver {
    queue: Queue,
    poll_interval: Duration,
}

/// Creates an unbounded FIFO bridge. Readiness is detected by polling every `poll_interval`.
pub fn channel(poll_interval: Duration) -> (EventSender, EventReceiver) {
    let queue: Queue = Arc::new(Mutex::new(VecDeque::new()));
    (
        EventSender { queue: queue.clone() },
        EventReceiver {
            queue,
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        },
    )
}

impl EventSender {
    pub fn push(&self, index: usize) {
        lock(&self.queue).push_back(index);
    }
}

impl EventReceiver {
    pub fn len(&self) -> usize {
        lock(&self.queue).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pop_front(&self) -> Option<usize> {
        lock(&self.queue).pop_front()
    }

    /// Resolves once at least one event is queued. May wait forever.
    pub async fn wait_non_empty(&self) {
        let mut cadence = tokio::time::interval(self.poll_interval);
        cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            // First tick completes immediately, so a non-empty queue returns without sleeping.
            cadence.tick().await;
            if !self.is_empty() {
                return;
            }
        }
    }

    /// Waits for, then removes, the oldest event.
    pub async fn recv(&mut self) -> usize {
        loop {
            self.wait_non_empty().await;
            // Only this receiver pops, so the queue cannot drain in between.
            if let Some(index) = self.pop_front() {
                return index;
            }
        }
    }
}
