//! Schedule and payment DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{InstallmentId, PaymentMethodId, PaymentRecordId, PolicyId};
use domain_schedule::{
    installment_overdue, record_overdue, InstallmentStatus, PaymentRecordStatus,
};
use infra_db::{InstallmentRow, PaymentRecordRow};

use crate::error::ApiError;

/// Schedule item returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct InstallmentResponse {
    pub installment_id: InstallmentId,
    pub policy_id: PolicyId,
    pub installment_number: i32,
    pub charge_date: Option<NaiveDate>,
    pub charge_month: Option<String>,
    pub amount: Decimal,
    pub status: InstallmentStatus,
    pub payment_method_id: Option<PaymentMethodId>,
    pub notes: Option<String>,
    /// Computed at query time: planned and due on or before today
    pub overdue: bool,
}

impl InstallmentResponse {
    /// Maps a database row, classifying overdue against the business date
    pub fn from_row(row: InstallmentRow, today: NaiveDate) -> Result<Self, ApiError> {
        let status = row.item_status()?;
        Ok(Self {
            installment_id: row.installment_id.into(),
            policy_id: row.policy_id.into(),
            installment_number: row.installment_number,
            overdue: installment_overdue(status, row.charge_date, today),
            charge_date: row.charge_date,
            charge_month: row.charge_month,
            amount: row.amount,
            status,
            payment_method_id: row.payment_method_id.map(Into::into),
            notes: row.notes,
        })
    }
}

/// Operator edit of a single schedule item; omitted fields keep their value
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InstallmentUpdateRequest {
    pub charge_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub status: Option<InstallmentStatus>,
    pub payment_method_id: Option<Uuid>,
    pub notes: Option<String>,
}

/// Body for the operator-curated bulk replace, bypassing the generator
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkReplaceRequest {
    pub policy_id: Uuid,
    #[validate(nested)]
    pub items: Vec<BulkReplaceItem>,
}

/// One operator-supplied schedule item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkReplaceItem {
    #[validate(range(min = 1))]
    pub installment_number: i32,
    pub charge_date: Option<NaiveDate>,
    pub amount: Decimal,
    /// Defaults to `planned`
    pub status: Option<InstallmentStatus>,
    pub payment_method_id: Option<Uuid>,
    pub notes: Option<String>,
}

/// Expected-payment record returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRecordResponse {
    pub payment_id: PaymentRecordId,
    pub policy_id: PolicyId,
    pub payment_number: i32,
    pub charge_date: Option<NaiveDate>,
    pub expected_amount: Decimal,
    pub actual_amount: Option<Decimal>,
    pub actual_date: Option<NaiveDate>,
    pub status: PaymentRecordStatus,
    /// Computed at query time: open and due on or before today
    pub overdue: bool,
}

impl PaymentRecordResponse {
    /// Maps a database row, classifying overdue against the business date
    pub fn from_row(row: PaymentRecordRow, today: NaiveDate) -> Result<Self, ApiError> {
        let status = row.record_status()?;
        Ok(Self {
            payment_id: row.payment_id.into(),
            policy_id: row.policy_id.into(),
            payment_number: row.payment_number,
            overdue: record_overdue(status, row.charge_date, today),
            charge_date: row.charge_date,
            expected_amount: row.expected_amount,
            actual_amount: row.actual_amount,
            actual_date: row.actual_date,
            status,
        })
    }
}

/// Body for settling a payment record
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkPaidRequest {
    #[validate(custom(function = "positive_amount"))]
    pub actual_amount: Decimal,
    pub actual_payment_date: NaiveDate,
}

fn positive_amount(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_amount"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bulk_replace_deserializes() {
        let json = r#"{
            "policy_id": "8f0c2ffc-1f9f-4f80-9f53-7b0f1c2d3e4a",
            "items": [
                {"installment_number": 1, "charge_date": "2025-02-01", "amount": "600.00"},
                {"installment_number": 2, "charge_date": "2025-03-01", "amount": 600.0, "status": "charged"}
            ]
        }"#;
        let req: BulkReplaceRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.items.len(), 2);
        assert_eq!(req.items[0].amount, dec!(600.00));
        assert_eq!(req.items[1].status, Some(InstallmentStatus::Charged));
    }

    #[test]
    fn test_bulk_replace_rejects_zero_number() {
        let json = r#"{
            "policy_id": "8f0c2ffc-1f9f-4f80-9f53-7b0f1c2d3e4a",
            "items": [{"installment_number": 0, "amount": "600.00"}]
        }"#;
        let req: BulkReplaceRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_mark_paid_rejects_negative_amount() {
        let req = MarkPaidRequest {
            actual_amount: dec!(-5),
            actual_payment_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        };
        assert!(req.validate().is_err());
    }
}
