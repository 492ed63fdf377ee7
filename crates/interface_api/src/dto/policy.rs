//! Policy DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use core_kernel::{PaymentMethodId, PolicyId, VehicleId};
use domain_schedule::{PolicyStatus, ScheduleState};
use infra_db::PolicyRow;

use crate::error::ApiError;

/// Full-representation body for policy create and update
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PolicyWriteRequest {
    pub policy_number: Option<String>,
    #[validate(length(min = 1))]
    pub coverage_type: String,
    #[validate(length(min = 1))]
    pub insurer: String,
    /// Classification for standalone policies not tied to a vehicle
    pub policy_type: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[validate(custom(function = "non_negative"))]
    pub total_premium: Decimal,
    #[validate(range(min = 1))]
    pub installment_count: i32,
    #[validate(range(min = 1, max = 28))]
    pub charge_day: Option<i32>,
    pub payment_method_id: Option<Uuid>,
    /// Defaults to `active` on create
    pub status: Option<PolicyStatus>,
    pub notes: Option<String>,
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

/// Query-string filters for the policy listing
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PolicyListQuery {
    pub vehicle_id: Option<Uuid>,
    pub status: Option<PolicyStatus>,
}

/// Policy representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct PolicyResponse {
    pub policy_id: PolicyId,
    pub policy_number: Option<String>,
    pub coverage_type: String,
    pub insurer: String,
    pub policy_type: Option<String>,
    pub vehicle_id: Option<VehicleId>,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub total_premium: Decimal,
    pub installment_count: i32,
    pub charge_day: Option<i32>,
    pub payment_method_id: Option<PaymentMethodId>,
    pub status: PolicyStatus,
    pub schedule_state: ScheduleState,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PolicyResponse {
    /// Maps a database row, surfacing corrupt status tokens as 500s
    pub fn from_row(row: PolicyRow) -> Result<Self, ApiError> {
        let status = row.policy_status()?;
        let schedule_state = row.regen_state()?;
        Ok(Self {
            policy_id: row.policy_id.into(),
            policy_number: row.policy_number,
            coverage_type: row.coverage_type,
            insurer: row.insurer,
            policy_type: row.policy_type,
            vehicle_id: row.vehicle_id.map(Into::into),
            start_date: row.start_date,
            expiry_date: row.expiry_date,
            total_premium: row.total_premium,
            installment_count: row.installment_count,
            charge_day: row.charge_day,
            payment_method_id: row.payment_method_id.map(Into::into),
            status,
            schedule_state,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request_json(premium: &str, count: i32, charge_day: Option<i32>) -> String {
        let day = charge_day.map_or("null".to_string(), |d| d.to_string());
        format!(
            r#"{{
                "coverage_type": "comprehensive",
                "insurer": "Shield Mutual",
                "total_premium": "{premium}",
                "installment_count": {count},
                "charge_day": {day}
            }}"#
        )
    }

    #[test]
    fn test_valid_request_passes() {
        let req: PolicyWriteRequest =
            serde_json::from_str(&request_json("7200.00", 12, Some(10))).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.total_premium, dec!(7200.00));
    }

    #[test]
    fn test_zero_installments_rejected() {
        let req: PolicyWriteRequest =
            serde_json::from_str(&request_json("7200.00", 0, None)).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_premium_rejected() {
        let req: PolicyWriteRequest =
            serde_json::from_str(&request_json("-1.00", 12, None)).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_charge_day_29_rejected() {
        let req: PolicyWriteRequest =
            serde_json::from_str(&request_json("7200.00", 12, Some(29))).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_status_token_deserializes() {
        let json = r#"{
            "coverage_type": "liability",
            "insurer": "Shield Mutual",
            "total_premium": 1200,
            "installment_count": 1,
            "status": "frozen"
        }"#;
        let req: PolicyWriteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, Some(PolicyStatus::Frozen));
    }
}
