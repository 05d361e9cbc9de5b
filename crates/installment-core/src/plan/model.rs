//! Installment plan models.

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, Result};
use crate::serde_util::null_as_default;

/// A financing partner that plans can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partner {
    pub id: i64,
    pub name: &'static str,
}

/// Partners offered in the plan form.
pub const PARTNERS: [Partner; 2] = [
    Partner {
        id: 1,
        name: "FE Credit",
    },
    Partner {
        id: 2,
        name: "Home Credit",
    },
];

impl Partner {
    pub fn find(id: i64) -> Option<Partner> {
        PARTNERS.iter().copied().find(|p| p.id == id)
    }
}

/// An installment plan as returned by `GET /plans`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub partner_id: Option<i64>,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub down_payment_percent: f64,
    /// Monthly interest rate, in percent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub interest_rate: f64,
    /// Comma-separated tenors in months, e.g. `"3,6,12"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_tenors: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
}

/// Illustrative repayment figures for one tenor of a plan, computed on the
/// plan's minimum price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenorQuote {
    pub months: u32,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub monthly_payment: f64,
}

impl Plan {
    pub fn partner_label(&self) -> &str {
        if let Some(name) = self.partner_name.as_deref() {
            return name;
        }
        self.partner_id
            .and_then(Partner::find)
            .map(|p| p.name)
            .unwrap_or("-")
    }

    /// One quote per parseable tenor; malformed entries are skipped.
    pub fn quotes(&self) -> Vec<TenorQuote> {
        let down_payment = self.min_price * self.down_payment_percent / 100.0;
        let loan_amount = self.min_price - down_payment;
        let monthly_rate = self.interest_rate / 100.0;

        self.allowed_tenors
            .split(',')
            .filter_map(|t| t.trim().parse::<u32>().ok())
            .filter(|months| *months > 0)
            .map(|months| TenorQuote {
                months,
                down_payment,
                loan_amount,
                monthly_payment: loan_amount / f64::from(months) + loan_amount * monthly_rate,
            })
            .collect()
    }
}

/// Body of `POST /plans` and `PUT /plans/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanForm {
    pub code: String,
    pub name: String,
    pub partner_id: i64,
    pub min_price: f64,
    pub down_payment_percent: f64,
    pub interest_rate: f64,
    pub allowed_tenors: String,
    pub active: bool,
}

impl Default for PlanForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            partner_id: 1,
            min_price: 3_000_000.0,
            down_payment_percent: 20.0,
            interest_rate: 1.8,
            allowed_tenors: "3,6,12".to_string(),
            active: true,
        }
    }
}

impl PlanForm {
    /// Prefills the form from an existing plan, for editing.
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            code: plan.code.clone(),
            name: plan.name.clone(),
            partner_id: plan.partner_id.unwrap_or(1),
            min_price: plan.min_price,
            down_payment_percent: plan.down_payment_percent,
            interest_rate: plan.interest_rate,
            allowed_tenors: plan.allowed_tenors.clone(),
            active: plan.active,
        }
    }

    /// Checks the form before it is sent.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(AdminError::validation("plan code is required"));
        }
        if self.name.trim().is_empty() {
            return Err(AdminError::validation("plan name is required"));
        }
        if !self.min_price.is_finite() || self.min_price < 0.0 {
            return Err(AdminError::validation("minimum price must be a non-negative number"));
        }
        if !(0.0..=100.0).contains(&self.down_payment_percent) {
            return Err(AdminError::validation(
                "down payment percent must be between 0 and 100",
            ));
        }
        if !self.interest_rate.is_finite() || self.interest_rate < 0.0 {
            return Err(AdminError::validation("interest rate must be a non-negative number"));
        }
        parse_tenors(&self.allowed_tenors)?;
        Ok(())
    }

    /// Clears the identifying fields after a successful create, keeping the
    /// financial defaults for the next entry.
    pub fn reset_identity(&mut self) {
        self.code.clear();
        self.name.clear();
    }
}

/// Parses `"3,6,12"` into `[3, 6, 12]`.
pub fn parse_tenors(raw: &str) -> Result<Vec<u32>> {
    let tenors = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| match t.parse::<u32>() {
            Ok(months) if months > 0 => Ok(months),
            _ => Err(AdminError::validation(format!("invalid tenor '{}'", t))),
        })
        .collect::<Result<Vec<_>>>()?;

    if tenors.is_empty() {
        return Err(AdminError::validation("at least one tenor is required"));
    }
    Ok(tenors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan {
        Plan {
            id: 1,
            code: "FE-0".to_string(),
            name: "FE Credit 0%".to_string(),
            partner_id: Some(1),
            partner_name: None,
            min_price: 10_000_000.0,
            down_payment_percent: 20.0,
            interest_rate: 1.0,
            allowed_tenors: "3, 6,x,12".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_quotes_skip_malformed_tenors() {
        let quotes = plan().quotes();
        assert_eq!(
            quotes.iter().map(|q| q.months).collect::<Vec<_>>(),
            vec![3, 6, 12]
        );
        let q6 = quotes[1];
        assert_eq!(q6.down_payment, 2_000_000.0);
        assert_eq!(q6.loan_amount, 8_000_000.0);
        let expected = 8_000_000.0 / 6.0 + 80_000.0;
        assert!((q6.monthly_payment - expected).abs() < 1e-6);
    }

    #[test]
    fn test_partner_label_falls_back_to_catalog() {
        assert_eq!(plan().partner_label(), "FE Credit");
        let mut named = plan();
        named.partner_name = Some("Home Credit".to_string());
        assert_eq!(named.partner_label(), "Home Credit");
    }

    #[test]
    fn test_form_validation() {
        let mut form = PlanForm {
            code: "HC-12".to_string(),
            name: "Home Credit 12".to_string(),
            ..PlanForm::default()
        };
        assert!(form.validate().is_ok());

        form.down_payment_percent = 120.0;
        assert!(form.validate().is_err());

        form.down_payment_percent = 30.0;
        form.allowed_tenors = "3,zero".to_string();
        assert!(form.validate().is_err());

        form.allowed_tenors = "3,6".to_string();
        form.code = "  ".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_form_serializes_camel_case() {
        let value = serde_json::to_value(PlanForm::default()).unwrap();
        assert_eq!(value["partnerId"], 1);
        assert_eq!(value["downPaymentPercent"], 20.0);
        assert_eq!(value["allowedTenors"], "3,6,12");
    }

    #[test]
    fn test_reset_identity_keeps_defaults() {
        let mut form = PlanForm {
            code: "X".to_string(),
            name: "Y".to_string(),
            interest_rate: 2.5,
            ..PlanForm::default()
        };
        form.reset_identity();
        assert!(form.code.is_empty() && form.name.is_empty());
        assert_eq!(form.interest_rate, 2.5);
    }
}
