//! Observable list state shared by the page controllers.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use installment_core::error::Result;
use installment_core::fetch::{FetchOptions, FetchState, FetchTicket};
use installment_core::view::{Viewport, preserve_scroll};
use tracing::{debug, error};

/// Called with a snapshot after every state change.
pub type PageObserver<T> = Arc<dyn Fn(&FetchState<T>) + Send + Sync>;

/// The data a page displays, its loading flag, and the ordering of its
/// fetches.
///
/// The lock is only held for in-memory updates, never across an `.await`.
/// Observers run after the lock is released.
pub struct PageState<T> {
    name: &'static str,
    state: Mutex<FetchState<T>>,
    observers: Mutex<Vec<PageObserver<T>>>,
    mounted: AtomicBool,
}

impl<T: Clone + Send> PageState<T> {
    pub fn new(name: &'static str, data: T) -> Self {
        Self {
            name,
            state: Mutex::new(FetchState::new(data)),
            observers: Mutex::new(Vec::new()),
            mounted: AtomicBool::new(true),
        }
    }

    pub fn subscribe(&self, observer: PageObserver<T>) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.lock().clone()
    }

    pub fn data(&self) -> T {
        self.lock().data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// After unmounting, responses still in flight are discarded.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Runs one fetch under the ordering and loading rules.
    ///
    /// Returns `Ok(true)` when the response was applied, `Ok(false)` when it
    /// was stale or the page was unmounted, and the error when the request
    /// failed. On failure the previous data stays in place. `loading` is
    /// cleared on every path, before the viewport is restored.
    pub async fn fetch_with<F>(
        &self,
        options: FetchOptions,
        viewport: &dyn Viewport,
        request: F,
    ) -> Result<bool>
    where
        F: Future<Output = Result<T>>,
    {
        let operation = async {
            let guard = self.begin(options);
            match request.await {
                Ok(data) => Ok(self.apply(&guard, data)),
                Err(e) => {
                    error!("[{}] Fetch failed: {}", self.name, e);
                    Err(e)
                }
            }
        };

        if options.preserve_scroll {
            preserve_scroll(viewport, operation).await
        } else {
            operation.await
        }
    }

    fn begin(&self, options: FetchOptions) -> LoadingGuard<'_, T> {
        let ticket = self.update(|state| state.begin(options));
        LoadingGuard { page: self, ticket }
    }

    fn apply(&self, guard: &LoadingGuard<'_, T>, data: T) -> bool {
        if !self.is_mounted() {
            debug!("[{}] Discarding response for unmounted page", self.name);
            return false;
        }
        let applied = self.update(|state| state.apply(guard.ticket, data));
        if !applied {
            debug!("[{}] Discarding stale response #{}", self.name, guard.ticket.seq());
        }
        applied
    }

    fn update<R>(&self, f: impl FnOnce(&mut FetchState<T>) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.lock();
            let result = f(&mut state);
            (result, state.clone())
        };
        self.notify(&snapshot);
        result
    }

    fn notify(&self, snapshot: &FetchState<T>) {
        let observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in observers {
            observer(snapshot);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FetchState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ends a fetch when dropped, whichever way the fetch finished.
struct LoadingGuard<'a, T: Clone + Send> {
    page: &'a PageState<T>,
    ticket: FetchTicket,
}

impl<T: Clone + Send> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        let ticket = self.ticket;
        self.page.update(|state| state.finish(ticket));
    }
}
