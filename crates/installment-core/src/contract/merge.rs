//! Overlay of a contract list row with its detail record.

use serde_json::{Map, Value};

use super::model::{Contract, ContractDetail};
use super::schedule::normalize_schedule;
use crate::error::{AdminError, Result};

const SCHEDULE_KEY: &str = "paymentSchedule";
const SCHEDULE_ALIAS_KEY: &str = "schedule";

/// Combines a list row with the detail record fetched for it.
///
/// Detail fields win on key collision; fields only the row carries are
/// kept. The schedule is the first array found in `detail.paymentSchedule`,
/// `detail.schedule`, then the row's own `paymentSchedule`, and is
/// normalized entry by entry.
///
/// A field whose value has an unexpected type is left at its default and
/// its raw value stays in `extra`.
pub fn merge_detail(row: &Contract, detail: Map<String, Value>) -> Result<ContractDetail> {
    let Value::Object(mut merged) = serde_json::to_value(row)? else {
        return Err(AdminError::internal("contract row did not serialize to an object"));
    };

    let raw_schedule = [
        detail.get(SCHEDULE_KEY),
        detail.get(SCHEDULE_ALIAS_KEY),
        merged.get(SCHEDULE_KEY),
    ]
    .into_iter()
    .flatten()
    .find(|v| v.is_array())
    .cloned()
    .unwrap_or(Value::Array(Vec::new()));

    for (key, value) in detail {
        merged.insert(key, value);
    }
    merged.remove(SCHEDULE_KEY);
    merged.remove(SCHEDULE_ALIAS_KEY);

    Ok(ContractDetail {
        contract: overlay_to_contract(merged),
        payment_schedule: normalize_schedule(&raw_schedule),
    })
}

fn overlay_to_contract(mut fields: Map<String, Value>) -> Contract {
    Contract {
        id: take(&mut fields, "id"),
        code: take(&mut fields, "code"),
        application_code: take(&mut fields, "applicationCode"),
        customer_name: take(&mut fields, "customerName"),
        product_name: take(&mut fields, "productName"),
        plan_name: take(&mut fields, "planName"),
        total_loan: take(&mut fields, "totalLoan"),
        remaining_amount: take(&mut fields, "remainingAmount"),
        status: take(&mut fields, "status"),
        extra: fields,
    }
}

/// Moves `key` out of `fields` as a `T`. Null or absent reads as the
/// default; a value that does not decode is put back.
fn take<T: serde::de::DeserializeOwned + Default>(fields: &mut Map<String, Value>, key: &str) -> T {
    let Some(value) = fields.remove(key) else {
        return T::default();
    };
    if value.is_null() {
        return T::default();
    }
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => decoded,
        Err(_) => {
            fields.insert(key.to_string(), value);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::PaymentStatus;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_detail_overlays_row() {
        let row: Contract =
            serde_json::from_value(json!({"id": 1, "code": "C1", "planName": "P"})).unwrap();
        let detail = object(json!({
            "code": "C1",
            "totalLoan": 1000,
            "paymentSchedule": [{"status": "PAID"}]
        }));

        let merged = merge_detail(&row, detail).unwrap();

        assert_eq!(merged.contract.total_loan, Some(1000.0));
        assert_eq!(merged.contract.plan_name.as_deref(), Some("P"));
        assert_eq!(merged.contract.id, Some(1));
        assert_eq!(merged.payment_schedule.len(), 1);
        assert_eq!(merged.payment_schedule[0].status, PaymentStatus::Paid);
        assert_eq!(merged.payment_schedule[0].period, 1);
    }

    #[test]
    fn test_detail_wins_on_collision() {
        let row: Contract = serde_json::from_value(
            json!({"id": 2, "code": "C2", "status": "ACTIVE", "note": "row"}),
        )
        .unwrap();
        let detail = object(json!({"status": "CLOSED", "note": "detail"}));

        let merged = merge_detail(&row, detail).unwrap();
        assert_eq!(merged.contract.status, "CLOSED");
        assert_eq!(merged.contract.extra.get("note"), Some(&json!("detail")));
    }

    #[test]
    fn test_mistyped_detail_fields_do_not_fail_the_merge() {
        let row: Contract =
            serde_json::from_value(json!({"id": 1, "code": "C1", "planName": "P"})).unwrap();
        let detail = object(json!({
            "code": 12345,
            "totalLoan": "1000",
            "remainingAmount": 250,
            "paymentSchedule": [{"status": "PAID"}]
        }));

        let merged = merge_detail(&row, detail).unwrap();

        assert_eq!(merged.contract.id, Some(1));
        assert_eq!(merged.contract.plan_name.as_deref(), Some("P"));
        assert_eq!(merged.contract.remaining_amount, Some(250.0));
        assert_eq!(merged.contract.total_loan, None);
        assert_eq!(merged.contract.code, "");
        assert_eq!(merged.contract.extra.get("totalLoan"), Some(&json!("1000")));
        assert_eq!(merged.contract.extra.get("code"), Some(&json!(12345)));
        assert_eq!(merged.payment_schedule.len(), 1);
    }

    #[test]
    fn test_null_detail_field_reads_as_default() {
        let row: Contract =
            serde_json::from_value(json!({"id": 4, "code": "C4", "status": "ACTIVE"})).unwrap();
        let merged = merge_detail(&row, object(json!({"status": null}))).unwrap();
        assert_eq!(merged.contract.status, "");
        assert!(!merged.contract.extra.contains_key("status"));
    }

    #[test]
    fn test_schedule_fallback_order() {
        let row: Contract = serde_json::from_value(json!({
            "id": 3,
            "paymentSchedule": [{"status": "PAID"}, {"status": "PAID"}]
        }))
        .unwrap();

        let from_alias = merge_detail(
            &row,
            object(json!({"schedule": [{"periodNumber": 5, "status": "OVERDUE"}]})),
        )
        .unwrap();
        assert_eq!(from_alias.payment_schedule.len(), 1);
        assert_eq!(from_alias.payment_schedule[0].period, 5);
        assert_eq!(from_alias.payment_schedule[0].status, PaymentStatus::Overdue);

        let from_row = merge_detail(&row, object(json!({"paymentSchedule": null}))).unwrap();
        assert_eq!(from_row.payment_schedule.len(), 2);
        assert!(!from_row.contract.extra.contains_key("paymentSchedule"));

        let empty = merge_detail(&Contract::default(), Map::new()).unwrap();
        assert!(empty.payment_schedule.is_empty());
    }
}
