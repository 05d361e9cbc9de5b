//! Loan application models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{AdminError, Result};
use crate::serde_util::null_as_default;

/// Remote status of an application.
///
/// Mirrors the service's state machine: `PENDING → APPROVED` and
/// `PENDING → REJECTED`. The service is the authority; the client only
/// refuses to ask for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending review",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Whether the client may request a move from `self` to `next`.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (ApplicationStatus::Pending, ApplicationStatus::Approved)
                | (ApplicationStatus::Pending, ApplicationStatus::Rejected)
        )
    }
}

/// Operator action on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ApplicationAction {
    Approve,
    Reject,
}

impl ApplicationAction {
    /// Maps a UI action name to an action. Anything but `approve` and
    /// `reject` is refused.
    pub fn parse(action: &str) -> Result<Self> {
        action
            .parse::<ApplicationAction>()
            .map_err(|_| AdminError::InvalidAction(action.to_string()))
    }

    /// The remote status this action requests.
    pub fn target_status(self) -> ApplicationStatus {
        match self {
            ApplicationAction::Approve => ApplicationStatus::Approved,
            ApplicationAction::Reject => ApplicationStatus::Rejected,
        }
    }
}

/// Body of `PUT /applications/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// A customer's installment application as listed by `GET /applications`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(default)]
    pub product_price: Option<f64>,
    #[serde(default)]
    pub loan_amount: Option<f64>,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    /// Raw status string; unknown values are displayed verbatim.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl LoanApplication {
    pub fn parsed_status(&self) -> Option<ApplicationStatus> {
        self.status.parse().ok()
    }

    /// Only pending applications offer approve/reject.
    pub fn is_actionable(&self) -> bool {
        self.parsed_status() == Some(ApplicationStatus::Pending)
    }

    pub fn status_label(&self) -> &str {
        match self.parsed_status() {
            Some(status) => status.label(),
            None => &self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_mapping() {
        assert_eq!(
            ApplicationAction::parse("approve").unwrap().target_status(),
            ApplicationStatus::Approved
        );
        assert_eq!(
            ApplicationAction::parse("reject").unwrap().target_status(),
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn test_unknown_actions_are_refused() {
        for input in ["pending", "APPROVE", "", "delete", " approve"] {
            let err = ApplicationAction::parse(input).unwrap_err();
            assert_eq!(err, AdminError::InvalidAction(input.to_string()));
        }
    }

    #[test]
    fn test_status_wire_format() {
        let body = StatusUpdate {
            status: ApplicationStatus::Approved,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"APPROVED"}"#
        );
        assert_eq!(ApplicationStatus::Rejected.to_string(), "REJECTED");
        assert_eq!(
            "PENDING".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Pending
        );
    }

    #[test]
    fn test_transitions() {
        use ApplicationStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_unknown_status_is_not_actionable() {
        let app: LoanApplication =
            serde_json::from_str(r#"{"id":3,"status":"CANCELLED"}"#).unwrap();
        assert!(!app.is_actionable());
        assert_eq!(app.status_label(), "CANCELLED");

        let pending: LoanApplication =
            serde_json::from_str(r#"{"id":4,"status":"PENDING"}"#).unwrap();
        assert!(pending.is_actionable());
        assert_eq!(pending.status_label(), "Pending review");
    }
}
