//! Loan applications page.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use installment_core::application::{ApplicationAction, ApplicationRepository, LoanApplication};
use installment_core::error::{AdminError, Result};
use installment_core::fetch::{FetchOptions, FetchState};
use installment_core::query::ListFilters;
use installment_core::view::{FixedViewport, Viewport};
use tracing::{error, info, warn};

use super::{InlineMessage, PageState};

pub const STATUS_UPDATE_FAILED_MESSAGE: &str = "Could not update the application status.";

pub struct ApplicationsPage {
    repo: Arc<dyn ApplicationRepository>,
    state: PageState<Vec<LoanApplication>>,
    filters: Mutex<ListFilters>,
    /// Rows with a status mutation in flight.
    updating: Mutex<HashSet<i64>>,
    error: InlineMessage,
    viewport: Arc<dyn Viewport>,
}

impl ApplicationsPage {
    pub fn new(repo: Arc<dyn ApplicationRepository>) -> Self {
        Self {
            repo,
            state: PageState::new("Applications", Vec::new()),
            filters: Mutex::new(ListFilters::default()),
            updating: Mutex::new(HashSet::new()),
            error: InlineMessage::default(),
            viewport: Arc::new(FixedViewport),
        }
    }

    pub fn with_viewport(mut self, viewport: Arc<dyn Viewport>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn state(&self) -> &PageState<Vec<LoanApplication>> {
        &self.state
    }

    pub fn snapshot(&self) -> FetchState<Vec<LoanApplication>> {
        self.state.snapshot()
    }

    pub fn applications(&self) -> Vec<LoanApplication> {
        self.state.data()
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn filters(&self) -> ListFilters {
        self.filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_filters(&self, filters: ListFilters) {
        *self.filters.lock().unwrap_or_else(PoisonError::into_inner) = filters;
    }

    /// Updates one filter field by its form name.
    pub fn set_filter(&self, name: &str, value: &str) -> bool {
        self.filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set(name, value)
    }

    pub async fn fetch(&self, options: FetchOptions) -> Result<bool> {
        let filters = self.filters();
        self.state
            .fetch_with(options, self.viewport.as_ref(), self.repo.list(&filters))
            .await
    }

    /// Filter form submission: a full, non-silent reload.
    pub async fn submit_filters(&self) -> Result<bool> {
        self.fetch(FetchOptions::full()).await
    }

    pub fn is_updating(&self, id: i64) -> bool {
        self.updating
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }

    /// Approves or rejects application `id`.
    ///
    /// `action` must be `approve` or `reject`, and the displayed row must
    /// still be pending; otherwise nothing is sent. After a successful
    /// mutation the list is refreshed silently with the scroll position
    /// kept. A failed refresh keeps the current rows.
    pub async fn apply_action(&self, id: i64, action: &str) -> Result<()> {
        self.error.clear();
        let result = self.try_apply_action(id, action).await;
        if let Err(e) = &result {
            self.error.set(e.user_message(STATUS_UPDATE_FAILED_MESSAGE));
        }
        result
    }

    async fn try_apply_action(&self, id: i64, action: &str) -> Result<()> {
        let action = ApplicationAction::parse(action).inspect_err(|e| {
            warn!("[Applications] Refusing action on {}: {}", id, e);
        })?;
        let target = action.target_status();

        let row = self
            .applications()
            .into_iter()
            .find(|app| app.id == id)
            .ok_or_else(|| AdminError::not_found("application", id.to_string()))?;
        if !row.parsed_status().is_some_and(|s| s.can_transition_to(target)) {
            return Err(AdminError::invalid_transition(format!(
                "application {} is {} and cannot be moved to {}",
                row.code, row.status, target
            )));
        }

        let _marker = self.mark_updating(id)?;

        if let Err(e) = self.repo.update_status(id, target).await {
            error!("[Applications] Failed to {} application {}: {}", action, id, e);
            return Err(e);
        }
        info!("[Applications] Application {} -> {}", id, target);

        if let Err(e) = self.fetch(FetchOptions::optimistic()).await {
            warn!("[Applications] Refresh after updating {} failed, keeping rows: {}", id, e);
        }
        Ok(())
    }

    fn mark_updating(&self, id: i64) -> Result<UpdatingMarker<'_>> {
        let mut updating = self.updating.lock().unwrap_or_else(PoisonError::into_inner);
        if !updating.insert(id) {
            return Err(AdminError::invalid_transition(format!(
                "application {} is already being updated",
                id
            )));
        }
        Ok(UpdatingMarker { page: self, id })
    }
}

/// Clears a row's updating marker when dropped.
struct UpdatingMarker<'a> {
    page: &'a ApplicationsPage,
    id: i64,
}

impl Drop for UpdatingMarker<'_> {
    fn drop(&mut self) {
        self.page
            .updating
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
