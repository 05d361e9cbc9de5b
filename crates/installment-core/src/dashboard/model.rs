//! Dashboard overview model.
//!
//! The overview endpoint has changed shape a few times, so decoding is
//! lenient: missing or null figures are zero, chart points accept either
//! `monthLabel` or `label`, and the recent-pending list is read from
//! `recentPendingApplications` or the older `recentPendingApps`.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::serde_util::null_as_default;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outstanding_debt: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overdue_contracts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_contracts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_applications: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub approved_applications: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending_applications: u64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub revenue_growth_percent: f64,
    #[serde(default, deserialize_with = "lenient_list")]
    pub revenue_chart: Option<Vec<RevenuePoint>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub recent_pending_applications: Option<Vec<PendingSummary>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing)]
    pub recent_pending_apps: Option<Vec<PendingSummary>>,
}

/// One bar of the monthly revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub name: String,
    pub revenue: f64,
}

impl<'de> Deserialize<'de> for RevenuePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            #[serde(default)]
            month_label: Option<String>,
            #[serde(default)]
            label: Option<String>,
            #[serde(default)]
            name: Option<String>,
            #[serde(default, deserialize_with = "null_as_default")]
            revenue: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(RevenuePoint {
            name: raw
                .month_label
                .or(raw.label)
                .or(raw.name)
                .unwrap_or_else(|| "N/A".to_string()),
            revenue: raw.revenue,
        })
    }
}

/// A pending application as summarized on the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSummary {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PendingSummary {
    /// Plan name, else product name, else a dash.
    pub fn subject(&self) -> &str {
        self.plan_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.product_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("-")
    }
}

impl DashboardOverview {
    pub fn revenue_points(&self) -> &[RevenuePoint] {
        self.revenue_chart.as_deref().unwrap_or(&[])
    }

    pub fn recent_pending(&self) -> &[PendingSummary] {
        self.recent_pending_applications
            .as_deref()
            .or(self.recent_pending_apps.as_deref())
            .unwrap_or(&[])
    }

    /// `"+12.5% vs last month"`; the sign is shown for non-negative growth.
    pub fn growth_label(&self) -> String {
        let sign = if self.revenue_growth_percent >= 0.0 {
            "+"
        } else {
            ""
        };
        format!("{}{:.1}% vs last month", sign, self.revenue_growth_percent)
    }

    /// Share of applications that were approved, in percent.
    pub fn approval_rate(&self) -> f64 {
        if self.total_applications == 0 {
            0.0
        } else {
            self.approved_applications as f64 / self.total_applications as f64 * 100.0
        }
    }
}

fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(0.0))
}

/// `Some` only for arrays; elements that fail to decode are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let overview: DashboardOverview =
            serde_json::from_value(json!({"totalRevenue": null, "activeContracts": 12})).unwrap();
        assert_eq!(overview.total_revenue, 0.0);
        assert_eq!(overview.active_contracts, 12);
        assert_eq!(overview.revenue_growth_percent, 0.0);
        assert!(overview.revenue_points().is_empty());
        assert!(overview.recent_pending().is_empty());
    }

    #[test]
    fn test_growth_label() {
        let mut overview = DashboardOverview {
            revenue_growth_percent: 12.345,
            ..DashboardOverview::default()
        };
        assert_eq!(overview.growth_label(), "+12.3% vs last month");
        overview.revenue_growth_percent = -4.0;
        assert_eq!(overview.growth_label(), "-4.0% vs last month");

        let text: DashboardOverview =
            serde_json::from_value(json!({"revenueGrowthPercent": "n/a"})).unwrap();
        assert_eq!(text.growth_label(), "+0.0% vs last month");
    }

    #[test]
    fn test_chart_labels() {
        let overview: DashboardOverview = serde_json::from_value(json!({
            "revenueChart": [
                {"monthLabel": "T1", "revenue": 40000000},
                {"label": "T2", "revenue": null},
                {"revenue": 5}
            ]
        }))
        .unwrap();
        let names: Vec<&str> = overview.revenue_points().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["T1", "T2", "N/A"]);
        assert_eq!(overview.revenue_points()[1].revenue, 0.0);
    }

    #[test]
    fn test_recent_pending_alias() {
        let legacy: DashboardOverview = serde_json::from_value(json!({
            "recentPendingApps": [{"customerName": "An", "productName": "iPhone 15"}]
        }))
        .unwrap();
        assert_eq!(legacy.recent_pending().len(), 1);
        assert_eq!(legacy.recent_pending()[0].subject(), "iPhone 15");

        let both: DashboardOverview = serde_json::from_value(json!({
            "recentPendingApplications": [{"customerName": "Binh", "planName": "FE 0%"}],
            "recentPendingApps": [{"customerName": "An"}]
        }))
        .unwrap();
        assert_eq!(both.recent_pending()[0].customer_name.as_deref(), Some("Binh"));

        let not_a_list: DashboardOverview =
            serde_json::from_value(json!({"recentPendingApplications": "oops"})).unwrap();
        assert!(not_a_list.recent_pending().is_empty());
    }

    #[test]
    fn test_approval_rate() {
        let overview = DashboardOverview {
            total_applications: 8,
            approved_applications: 2,
            ..DashboardOverview::default()
        };
        assert_eq!(overview.approval_rate(), 25.0);
        assert_eq!(DashboardOverview::default().approval_rate(), 0.0);
    }
}
