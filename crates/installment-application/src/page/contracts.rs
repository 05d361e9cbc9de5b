//! Contracts page.

use std::sync::{Arc, Mutex, PoisonError};

use installment_core::contract::{Contract, ContractDetail, ContractRepository, merge_detail};
use installment_core::error::Result;
use installment_core::fetch::{FetchOptions, FetchState};
use installment_core::query::ListFilters;
use installment_core::view::{FixedViewport, Viewport};
use tracing::error;

use super::PageState;

pub struct ContractsPage {
    repo: Arc<dyn ContractRepository>,
    state: PageState<Vec<Contract>>,
    filters: Mutex<ListFilters>,
    selected: Mutex<Option<ContractDetail>>,
    /// Contract whose detail is being fetched.
    detail_loading: Mutex<Option<i64>>,
    viewport: Arc<dyn Viewport>,
}

impl ContractsPage {
    pub fn new(repo: Arc<dyn ContractRepository>) -> Self {
        Self {
            repo,
            state: PageState::new("Contracts", Vec::new()),
            filters: Mutex::new(ListFilters::default()),
            selected: Mutex::new(None),
            detail_loading: Mutex::new(None),
            viewport: Arc::new(FixedViewport),
        }
    }

    pub fn with_viewport(mut self, viewport: Arc<dyn Viewport>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn state(&self) -> &PageState<Vec<Contract>> {
        &self.state
    }

    pub fn snapshot(&self) -> FetchState<Vec<Contract>> {
        self.state.snapshot()
    }

    pub fn contracts(&self) -> Vec<Contract> {
        self.state.data()
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

    pub fn selected(&self) -> Option<ContractDetail> {
        self.selected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn close_detail(&self) {
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn detail_loading(&self) -> Option<i64> {
        *self
            .detail_loading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the detail of contract `id` and overlays it on its list row.
    ///
    /// A contract that is not in the displayed list is merged onto an empty
    /// row. Failures are logged and yield `None`, leaving any previously
    /// selected detail in place.
    pub async fn view_detail(&self, id: i64) -> Option<ContractDetail> {
        let row = self
            .contracts()
            .into_iter()
            .find(|c| c.id == Some(id))
            .unwrap_or_else(|| Contract {
                id: Some(id),
                ..Contract::default()
            });

        self.set_detail_loading(Some(id));
        let merged = match self.repo.detail(id).await {
            Ok(detail) => merge_detail(&row, detail),
            Err(e) => Err(e),
        };
        self.set_detail_loading(None);

        match merged {
            Ok(detail) => {
                *self.selected.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some(detail.clone());
                Some(detail)
            }
            Err(e) => {
                error!("[Contracts] Failed to load contract {} detail: {}", id, e);
                None
            }
        }
    }

    fn set_detail_loading(&self, id: Option<i64>) {
        *self
            .detail_loading
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = id;
    }
}
