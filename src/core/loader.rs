use crate::utils::error::Result;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Lifecycle of one dataset load. `Ready` and `Failed` are terminal; nothing
/// transitions out of them within one page lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Ready(_) | LoadState::Failed(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

/// The one slot a dataset's loader writes into. Concurrent loads never share
/// a slot, so there is nothing to contend over beyond the commit itself.
#[derive(Debug)]
pub struct LoadSlot<T> {
    state: Arc<RwLock<LoadState<T>>>,
}

impl<T> Clone for LoadSlot<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for LoadSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LoadSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(LoadState::Idle)),
        }
    }

    fn set(&self, next: LoadState<T>) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }
}

impl<T: Clone> LoadSlot<T> {
    pub fn snapshot(&self) -> LoadState<T> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Set when the consuming view is torn down. A load checks it at commit time
/// and throws a late result away instead of mutating a dead view's state.
#[derive(Debug, Clone, Default)]
pub struct CancelGuard {
    cancelled: Arc<AtomicBool>,
}

impl CancelGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Runs one load to its terminal state: `Loading` while the future is in
/// flight, then `Ready` on success with a non-empty payload or `Failed` with
/// a human-readable message. Errors are committed, never rethrown; the slot
/// is the only output.
pub async fn drive<T, Fut>(slot: LoadSlot<T>, guard: CancelGuard, load: Fut)
where
    Fut: Future<Output = Result<T>>,
{
    slot.set(LoadState::Loading);

    let outcome = load.await;

    if guard.is_cancelled() {
        tracing::debug!("consumer gone before load finished; result discarded");
        return;
    }

    match outcome {
        Ok(payload) => slot.set(LoadState::Ready(payload)),
        Err(e) => {
            tracing::warn!("load failed: {}", e);
            slot.set(LoadState::Failed(e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::IngestError;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_successful_load_commits_ready() {
        let slot: LoadSlot<u32> = LoadSlot::new();
        assert_eq!(slot.snapshot(), LoadState::Idle);

        drive(slot.clone(), CancelGuard::new(), async { Ok(42) }).await;

        assert_eq!(slot.snapshot(), LoadState::Ready(42));
        assert!(slot.snapshot().is_terminal());
    }

    #[tokio::test]
    async fn test_failed_load_commits_message() {
        let slot: LoadSlot<u32> = LoadSlot::new();

        drive(slot.clone(), CancelGuard::new(), async {
            Err(IngestError::EmptyResult {
                dataset: "energy_oil".to_string(),
            })
        })
        .await;

        match slot.snapshot() {
            LoadState::Failed(message) => assert!(message.contains("energy_oil")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cancelled_consumer_never_sees_late_result() {
        let slot: LoadSlot<u32> = LoadSlot::new();
        let guard = CancelGuard::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let handle = tokio::spawn(drive(slot.clone(), guard.clone(), async move {
            Ok(rx.await.unwrap())
        }));

        // Give the loader a chance to enter Loading, then tear down.
        tokio::task::yield_now().await;
        assert_eq!(slot.snapshot(), LoadState::Loading);
        guard.cancel();

        // Result arrives after teardown; it must not be committed.
        tx.send(42).unwrap();
        handle.await.unwrap();

        assert_eq!(slot.snapshot(), LoadState::Loading);
    }
}
