//! Background task plumbing
//!
//! Futures run on the tokio runtime; their outputs come back over a channel
//! and are applied by the owner on the UI thread, so model state never needs
//! a lock.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

/// Called after a task finishes so the UI can schedule a frame
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Where background work runs and how the UI is woken afterwards
#[derive(Clone)]
pub struct Spawner {
    handle: Handle,
    waker: Option<Waker>,
}

impl Spawner {
    pub fn new(handle: Handle) -> Self {
        Self { handle, waker: None }
    }

    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self
    }
}

/// Queue of in-flight futures whose outputs are collected on the owner's thread
pub struct TaskQueue<T> {
    spawner: Spawner,
    tx: Sender<T>,
    rx: Receiver<T>,
    in_flight: usize,
}

impl<T: Send + 'static> TaskQueue<T> {
    pub fn new(spawner: Spawner) -> Self {
        let (tx, rx) = unbounded();
        Self {
            spawner,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Run `future` in the background; its output is delivered by `try_next`
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        let waker = self.spawner.waker.clone();

        self.spawner.handle.spawn(async move {
            let output = future.await;
            // The owner may already be gone; nothing to deliver to then
            let _ = tx.send(output);
            if let Some(waker) = waker {
                waker();
            }
        });
    }

    /// Take one finished output without blocking
    pub fn try_next(&mut self) -> Option<T> {
        let output = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(output)
    }

    /// Block until one output arrives or the deadline passes
    pub fn next_before(&mut self, deadline: Instant) -> Option<T> {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match self.rx.recv_timeout(timeout) {
            Ok(output) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(output)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }
}

/// Deadline helper for `settle`-style loops
pub(crate) fn deadline_after(timeout: Duration) -> Instant {
    Instant::now() + timeout
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_outputs_delivered_and_counted() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let spawner = Spawner::new(runtime.handle().clone())
            .with_waker(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        let mut queue = TaskQueue::new(spawner);
        queue.spawn(async { 1 });
        queue.spawn(async { 2 });
        assert!(!queue.is_idle());

        let deadline = deadline_after(Duration::from_secs(5));
        let mut outputs = vec![
            queue.next_before(deadline).unwrap(),
            queue.next_before(deadline).unwrap(),
        ];
        outputs.sort();

        assert_eq!(outputs, vec![1, 2]);
        assert!(queue.is_idle());
        assert!(queue.try_next().is_none());

        // The waker fires just after the send
        while wakes.load(Ordering::SeqCst) < 2 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }
}
