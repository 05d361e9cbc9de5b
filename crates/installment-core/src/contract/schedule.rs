//! Payment schedule normalization.
//!
//! The contract service is not consistent about schedule entries: the period
//! may be `period`, `periodNumber` or absent, and statuses arrive in any case
//! (`PAID`, `paid`, `PLANNED`, ...). Everything is folded into one shape here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
    Overdue,
}

impl PaymentStatus {
    /// Case-insensitive mapping; missing and unrecognized values are
    /// `Unpaid`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return PaymentStatus::Unpaid;
        };
        match raw.trim().to_ascii_uppercase().as_str() {
            "PAID" => PaymentStatus::Paid,
            "OVERDUE" => PaymentStatus::Overdue,
            _ => PaymentStatus::Unpaid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Overdue => "Overdue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleItem {
    pub period: u64,
    pub due_date: Option<String>,
    pub amount: Option<f64>,
    pub principal_amount: Option<f64>,
    pub interest_amount: Option<f64>,
    pub status: PaymentStatus,
}

impl PaymentScheduleItem {
    /// Normalizes one raw entry found at `index` in the schedule array.
    pub fn from_raw(index: usize, raw: &Value) -> Self {
        let field = |name: &str| raw.get(name).filter(|v| !v.is_null());

        let period = field("period")
            .or_else(|| field("periodNumber"))
            .and_then(as_period)
            .unwrap_or(index as u64 + 1);

        Self {
            period,
            due_date: field("dueDate").and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }),
            amount: field("amount").and_then(Value::as_f64),
            principal_amount: field("principalAmount").and_then(Value::as_f64),
            interest_amount: field("interestAmount").and_then(Value::as_f64),
            status: PaymentStatus::normalize(field("status").and_then(Value::as_str)),
        }
    }
}

fn as_period(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Normalizes a raw schedule array. Non-array input is an empty schedule.
pub fn normalize_schedule(raw: &Value) -> Vec<PaymentScheduleItem> {
    raw.as_array()
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| PaymentScheduleItem::from_raw(index, item))
                .collect()
        })
        .unwrap_or_default()
}

/// How much of a schedule has been repaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepaymentProgress {
    pub paid: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent; 0 for an empty schedule.
    pub percent: u8,
}

impl RepaymentProgress {
    pub fn of(schedule: &[PaymentScheduleItem]) -> Self {
        let total = schedule.len();
        let paid = schedule
            .iter()
            .filter(|item| item.status == PaymentStatus::Paid)
            .count();
        let percent = if total == 0 {
            0
        } else {
            ((paid as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            paid,
            total,
            percent,
        }
    }
}
