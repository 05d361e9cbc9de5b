//! List filters shared by the applications and contracts pages.

use serde::{Deserialize, Serialize};

/// Filter form state: a status select and a free-text search box.
///
/// The form keeps empty strings; `to_query` turns them into omitted
/// parameters so the gateway never receives `status=` or `q=`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilters {
    pub status: String,
    pub q: String,
}

/// Query-string form of [`ListFilters`]; `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ListFilters {
    pub fn new(status: impl Into<String>, q: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            q: q.into(),
        }
    }

    /// Updates one field by its form name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match name {
            "status" => self.status = value.into(),
            "q" => self.q = value.into(),
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.status.trim().is_empty() && self.q.trim().is_empty()
    }

    pub fn to_query(&self) -> ListQuery {
        fn non_empty(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        ListQuery {
            status: non_empty(&self.status),
            q: non_empty(&self.q),
        }
    }
}

impl ListQuery {
    /// `(name, value)` pairs for the fields that are set.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status.as_deref() {
            pairs.push(("status", status));
        }
        if let Some(q) = self.q.as_deref() {
            pairs.push(("q", q));
        }
        pairs
    }
}
