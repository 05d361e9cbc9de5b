//! In-memory collaborators for the application tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use installment_application::SessionController;
use installment_core::application::{ApplicationRepository, ApplicationStatus, LoanApplication};
use installment_core::auth::{AuthRepository, LoginRequest, LoginResponse};
use installment_core::contract::{Contract, ContractRepository};
use installment_core::error::{AdminError, Result};
use installment_core::plan::{Plan, PlanForm, PlanRepository};
use installment_core::query::ListFilters;
use installment_core::session::AuthUser;
use installment_core::storage::KeyValueStorage;
use installment_core::view::Viewport;
use installment_infrastructure::{MemoryStorage, StorageSessionStore};
use serde_json::{Map, Value, json};
use tokio::sync::Notify;

pub const PASSWORD: &str = "123";

#[derive(Default)]
pub struct MockAuth {
    pub fail_logout: AtomicBool,
    pub logout_tokens: Mutex<Vec<String>>,
    /// Parks the remote logout until `logout_release` fires.
    pub hold_logout: AtomicBool,
    pub logout_started: Notify,
    pub logout_release: Notify,
}

#[async_trait]
impl AuthRepository for MockAuth {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse> {
        if request.password != PASSWORD {
            return Err(AdminError::remote(
                401,
                Some("Invalid email or password".to_string()),
            ));
        }
        Ok(LoginResponse {
            access_token: format!("token-for-{}", request.email),
            user: Some(AuthUser::with_email(request.email.clone())),
        })
    }

    async fn logout(&self, token: &str) -> Result<()> {
        self.logout_tokens.lock().unwrap().push(token.to_string());
        if self.hold_logout.load(Ordering::SeqCst) {
            self.logout_started.notify_one();
            self.logout_release.notified().await;
        }
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(AdminError::transport("connection reset"));
        }
        Ok(())
    }
}

/// A session controller over a shared in-memory store.
pub struct SessionFixture {
    pub storage: Arc<MemoryStorage>,
    pub auth: Arc<MockAuth>,
    pub session: Arc<SessionController>,
}

impl SessionFixture {
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    pub fn with_storage(storage: Arc<MemoryStorage>) -> Self {
        let auth = Arc::new(MockAuth::default());
        let session = Arc::new(SessionController::new(
            Arc::new(StorageSessionStore::new(storage.clone())),
            auth.clone(),
        ));
        Self {
            storage,
            auth,
            session,
        }
    }

    /// A second controller reading the same storage, as after a restart.
    pub fn reopen(&self) -> SessionFixture {
        Self::with_storage(self.storage.clone())
    }

    pub fn raw_stored(&self) -> Option<Value> {
        self.storage
            .get_item(installment_core::storage::SESSION_STORAGE_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }
}

pub fn application(id: i64, status: &str) -> LoanApplication {
    serde_json::from_value(json!({
        "id": id,
        "code": format!("HS-{}", id),
        "customerName": format!("Customer {}", id),
        "productName": "iPhone 15",
        "status": status,
    }))
    .unwrap()
}

#[derive(Default)]
pub struct MockApplications {
    pub rows: Mutex<Vec<LoanApplication>>,
    pub list_calls: Mutex<Vec<ListFilters>>,
    pub updates: Mutex<Vec<(i64, ApplicationStatus)>>,
    pub fail_list: AtomicBool,
    pub fail_update: AtomicBool,
    /// Makes every list call after the next successful update fail.
    pub fail_list_after_update: AtomicBool,
}

impl MockApplications {
    pub fn with_rows(rows: Vec<LoanApplication>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn network_calls(&self) -> usize {
        self.list_calls.lock().unwrap().len() + self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl ApplicationRepository for MockApplications {
    async fn list(&self, filters: &ListFilters) -> Result<Vec<LoanApplication>> {
        self.list_calls.lock().unwrap().push(filters.clone());
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(AdminError::Timeout { secs: 15 });
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn update_status(&self, id: i64, status: ApplicationStatus) -> Result<()> {
        self.updates.lock().unwrap().push((id, status));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(AdminError::remote(
                409,
                Some("Application already processed".to_string()),
            ));
        }
        for row in self.rows.lock().unwrap().iter_mut() {
            if row.id == id {
                row.status = status.to_string();
            }
        }
        if self.fail_list_after_update.load(Ordering::SeqCst) {
            self.fail_list.store(true, Ordering::SeqCst);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockPlans {
    pub plans: Mutex<Vec<Plan>>,
    pub created: Mutex<Vec<PlanForm>>,
    pub fail_create: AtomicBool,
}

fn plan_from(id: i64, form: &PlanForm) -> Plan {
    Plan {
        id,
        code: form.code.clone(),
        name: form.name.clone(),
        partner_id: Some(form.partner_id),
        partner_name: None,
        min_price: form.min_price,
        down_payment_percent: form.down_payment_percent,
        interest_rate: form.interest_rate,
        allowed_tenors: form.allowed_tenors.clone(),
        active: form.active,
    }
}

#[async_trait]
impl PlanRepository for MockPlans {
    async fn list(&self) -> Result<Vec<Plan>> {
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn create(&self, form: &PlanForm) -> Result<Plan> {
        self.created.lock().unwrap().push(form.clone());
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AdminError::remote(
                400,
                Some(format!("Plan code {} already exists", form.code)),
            ));
        }
        let mut plans = self.plans.lock().unwrap();
        let plan = plan_from(plans.len() as i64 + 1, form);
        plans.push(plan.clone());
        Ok(plan)
    }

    async fn update(&self, id: i64, form: &PlanForm) -> Result<Plan> {
        let mut plans = self.plans.lock().unwrap();
        let slot = plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AdminError::remote(404, None))?;
        *slot = plan_from(id, form);
        Ok(slot.clone())
    }

    async fn deactivate(&self, id: i64) -> Result<Plan> {
        let mut plans = self.plans.lock().unwrap();
        let slot = plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AdminError::remote(404, None))?;
        slot.active = false;
        Ok(slot.clone())
    }
}

#[derive(Default)]
pub struct MockContracts {
    pub rows: Vec<Contract>,
    pub details: Mutex<Vec<(i64, Value)>>,
}

#[async_trait]
impl ContractRepository for MockContracts {
    async fn list(&self, _filters: &ListFilters) -> Result<Vec<Contract>> {
        Ok(self.rows.clone())
    }

    async fn detail(&self, id: i64) -> Result<Map<String, Value>> {
        let details = self.details.lock().unwrap();
        match details.iter().find(|(detail_id, _)| *detail_id == id) {
            Some((_, Value::Object(map))) => Ok(map.clone()),
            _ => Err(AdminError::remote(404, Some("Contract not found".to_string()))),
        }
    }
}

/// A viewport that logs captures and restores into a shared event list.
pub struct RecordingViewport {
    pub offset: AtomicUsize,
    pub events: Arc<Mutex<Vec<String>>>,
}

impl RecordingViewport {
    pub fn new(offset: usize, events: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            offset: AtomicUsize::new(offset),
            events,
        }
    }
}

impl Viewport for RecordingViewport {
    fn scroll_offset(&self) -> usize {
        let offset = self.offset.load(Ordering::SeqCst);
        self.events.lock().unwrap().push(format!("capture {}", offset));
        offset
    }

    fn restore_scroll(&self, offset: usize) {
        self.events.lock().unwrap().push(format!("restore {}", offset));
        self.offset.store(offset, Ordering::SeqCst);
    }
}
