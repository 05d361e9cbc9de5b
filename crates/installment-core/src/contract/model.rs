//! Contract models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schedule::{PaymentScheduleItem, RepaymentProgress};
use crate::serde_util::null_as_default;

/// A contract row as listed by `GET /contracts`.
///
/// Fields the client does not read are kept in `extra`, so a row can be
/// overlaid with its detail record without losing anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_loan: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contract {
    pub fn status_label(&self) -> &str {
        contract_status_label(&self.status)
    }
}

/// A contract together with its normalized payment schedule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContractDetail {
    pub contract: Contract,
    pub payment_schedule: Vec<PaymentScheduleItem>,
}

impl ContractDetail {
    pub fn progress(&self) -> RepaymentProgress {
        RepaymentProgress::of(&self.payment_schedule)
    }
}

/// Human label for a remote contract status; unknown values pass through.
pub fn contract_status_label(status: &str) -> &str {
    match status {
        "ACTIVE" => "Active",
        "CLOSED" => "Settled",
        "OVERDUE" => "Overdue",
        other => other,
    }
}
