use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{blank_as_none, null_as_default, validate_timestamp, FormSchema};

closed_set! {
    pub enum PaymentType {
        Lesson => "lesson",
        Subscription => "subscription",
        Package => "package",
        Other => "other",
    }
}

closed_set! {
    pub enum PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

closed_set! {
    pub enum PaymentPlatform {
        Cash => "cash",
        Check => "check",
        Card => "card",
        Venmo => "venmo",
        Zelle => "zelle",
        Other => "other",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Payment {
    pub user_id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(range(min = 1, message = "Amount is required"))]
    pub amount_cents: i64,
    pub payment_type: PaymentType,
    pub payment_status: PaymentStatus,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub payment_platform: Option<PaymentPlatform>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_timestamp"))]
    pub paid_at: Option<String>,
}

impl FormSchema for Payment {
    const LABEL: &'static str = "payment";
    const PLURAL: &'static str = "payments";
    const TABLE: &'static str = "payments";

    fn required_message(field: &str) -> &'static str {
        match field {
            "user_id" => "Payer is required",
            "amount_cents" => "Amount is required",
            "payment_type" => "Payment type is required",
            "payment_status" => "Payment status is required",
            _ => crate::validation::REQUIRED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_form;
    use serde_json::json;

    #[test]
    fn test_zero_amount_is_rejected() {
        let errors = validate_form::<Payment>(&json!({
            "user_id": Uuid::new_v4(),
            "amount_cents": 0,
            "payment_type": "lesson",
            "payment_status": "completed"
        }))
        .unwrap_err();

        assert_eq!(errors.first("amount_cents"), Some("Amount is required"));
    }

    #[test]
    fn test_valid_payment_is_accepted_unchanged() {
        let input = json!({
            "user_id": Uuid::new_v4(),
            "amount_cents": 500,
            "payment_type": "lesson",
            "payment_status": "completed"
        });

        let payment = validate_form::<Payment>(&input).unwrap();

        assert_eq!(payment.amount_cents, 500);
        assert_eq!(payment.payment_type, PaymentType::Lesson);
        assert_eq!(payment.payment_status, PaymentStatus::Completed);
        assert_eq!(serde_json::to_value(&payment).unwrap(), input);
    }

    #[test]
    fn test_platform_outside_closed_set_is_rejected() {
        let errors = validate_form::<Payment>(&json!({
            "user_id": Uuid::new_v4(),
            "amount_cents": 500,
            "payment_type": "lesson",
            "payment_status": "completed",
            "payment_platform": "bitcoin"
        }))
        .unwrap_err();

        assert!(errors.contains("payment_platform"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_unselected_platform_reads_as_absent() {
        let payment = validate_form::<Payment>(&json!({
            "user_id": Uuid::new_v4(),
            "amount_cents": 2500,
            "payment_type": "package",
            "payment_status": "pending",
            "payment_platform": "",
            "paid_at": "2026-10-01T14:30:00Z"
        }))
        .unwrap();

        assert_eq!(payment.payment_platform, None);
        assert_eq!(payment.paid_at.as_deref(), Some("2026-10-01T14:30:00Z"));
    }

    #[test]
    fn test_type_and_status_errors_are_both_collected() {
        let errors = validate_form::<Payment>(&json!({
            "user_id": Uuid::new_v4(),
            "amount_cents": 500,
            "payment_type": "tip",
            "payment_status": "done"
        }))
        .unwrap_err();

        assert!(errors.contains("payment_type"));
        assert!(errors.contains("payment_status"));
    }
}
