//! Installment plans page.

use std::sync::{Arc, Mutex, PoisonError};

use installment_core::error::Result;
use installment_core::fetch::{FetchOptions, FetchState};
use installment_core::plan::{Plan, PlanForm, PlanRepository};
use installment_core::view::{FixedViewport, Viewport};
use tracing::{error, info, warn};

use super::{InlineMessage, PageState};

pub const PLAN_SAVE_FAILED_MESSAGE: &str = "Could not save the installment plan.";

pub struct PlansPage {
    repo: Arc<dyn PlanRepository>,
    state: PageState<Vec<Plan>>,
    form: Mutex<PlanForm>,
    /// Id of the plan being edited; `None` while creating.
    editing: Mutex<Option<i64>>,
    error: InlineMessage,
    viewport: Arc<dyn Viewport>,
}

impl PlansPage {
    pub fn new(repo: Arc<dyn PlanRepository>) -> Self {
        Self {
            repo,
            state: PageState::new("Plans", Vec::new()),
            form: Mutex::new(PlanForm::default()),
            editing: Mutex::new(None),
            error: InlineMessage::default(),
            viewport: Arc::new(FixedViewport),
        }
    }

    pub fn with_viewport(mut self, viewport: Arc<dyn Viewport>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn state(&self) -> &PageState<Vec<Plan>> {
        &self.state
    }

    pub fn snapshot(&self) -> FetchState<Vec<Plan>> {
        self.state.snapshot()
    }

    pub fn plans(&self) -> Vec<Plan> {
        self.state.data()
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub async fn fetch(&self, options: FetchOptions) -> Result<bool> {
        self.state
            .fetch_with(options, self.viewport.as_ref(), self.repo.list())
            .await
    }

    pub fn form(&self) -> PlanForm {
        self.form.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_form(&self, form: PlanForm) {
        *self.form.lock().unwrap_or_else(PoisonError::into_inner) = form;
    }

    /// Prefills the form from `plan` and switches to editing it.
    pub fn edit(&self, plan: &Plan) {
        self.set_form(PlanForm::from_plan(plan));
        *self.editing.lock().unwrap_or_else(PoisonError::into_inner) = Some(plan.id);
    }

    pub fn cancel_edit(&self) {
        self.set_form(PlanForm::default());
        *self.editing.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn editing(&self) -> Option<i64> {
        *self.editing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates or updates a plan from the current form.
    ///
    /// An invalid form is refused without a network call. On success the
    /// code and name are cleared and the list is reloaded; on failure the
    /// inline message carries the server's message or a default.
    pub async fn submit(&self) -> Result<Plan> {
        self.error.clear();
        let form = self.form();
        let editing = self.editing();

        if let Err(e) = form.validate() {
            self.error.set(e.user_message(PLAN_SAVE_FAILED_MESSAGE));
            return Err(e);
        }

        let saved = match editing {
            Some(id) => self.repo.update(id, &form).await,
            None => self.repo.create(&form).await,
        };

        match saved {
            Ok(plan) => {
                info!("[Plans] Saved plan {} ({})", plan.code, plan.id);
                {
                    let mut current = self.form.lock().unwrap_or_else(PoisonError::into_inner);
                    current.reset_identity();
                }
                *self.editing.lock().unwrap_or_else(PoisonError::into_inner) = None;
                self.reload_after_save().await;
                Ok(plan)
            }
            Err(e) => {
                error!("[Plans] Failed to save plan {}: {}", form.code, e);
                self.error.set(e.user_message(PLAN_SAVE_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    async fn reload_after_save(&self) {
        if let Err(e) = self.fetch(FetchOptions::full()).await {
            warn!("[Plans] Reload after save failed, keeping the list: {}", e);
        }
    }

    /// Soft-deactivates a plan, then reloads the list.
    pub async fn deactivate(&self, id: i64) -> Result<Plan> {
        match self.repo.deactivate(id).await {
            Ok(plan) => {
                info!("[Plans] Deactivated plan {}", id);
                self.reload_after_save().await;
                Ok(plan)
            }
            Err(e) => {
                error!("[Plans] Failed to deactivate plan {}: {}", id, e);
                Err(e)
            }
        }
    }
}
