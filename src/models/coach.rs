use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::{
    blank_as_none, invalid, null_as_default, parse_date, validate_date, FormSchema,
};

/// Prepaid block of hours a coach sells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CoachPackage {
    pub coach_id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Package name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Package must include at least 1 hour"))]
    pub num_hours: i32,
    #[validate(range(min = 0, message = "Price must be zero or more"))]
    pub price_cents: i64,
}

impl FormSchema for CoachPackage {
    const LABEL: &'static str = "package";
    const PLURAL: &'static str = "packages";
    const TABLE: &'static str = "coach_packages";

    fn required_message(field: &str) -> &'static str {
        match field {
            "coach_id" => "Coach is required",
            "num_hours" => "Number of hours is required",
            "price_cents" => "Price is required",
            _ => crate::validation::REQUIRED,
        }
    }
}

/// Payroll run for one coach over a closed date range. Amounts are computed
/// by the backend from the lessons taught in the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_period"))]
pub struct CoachPayout {
    pub coach_id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, message = "Period start is required"),
        custom(function = "validate_date")
    )]
    pub period_start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, message = "Period end is required"),
        custom(function = "validate_date")
    )]
    pub period_end: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn validate_period(payout: &CoachPayout) -> Result<(), ValidationError> {
    match (parse_date(&payout.period_start), parse_date(&payout.period_end)) {
        (Some(start), Some(end)) if end < start => Err(invalid(
            "period",
            "Period end must be on or after period start",
        )),
        _ => Ok(()),
    }
}

impl FormSchema for CoachPayout {
    const LABEL: &'static str = "payout";
    const PLURAL: &'static str = "payouts";
    const TABLE: &'static str = "coach_payouts";

    fn required_message(field: &str) -> &'static str {
        match field {
            "coach_id" => "Coach is required",
            _ => crate::validation::REQUIRED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_form, FORM_KEY};
    use serde_json::json;

    #[test]
    fn test_package_floors_differ_per_field() {
        let errors = validate_form::<CoachPackage>(&json!({
            "coach_id": Uuid::new_v4(),
            "name": "10 hour pack",
            "num_hours": 0,
            "price_cents": 0
        }))
        .unwrap_err();

        assert_eq!(errors.first("num_hours"), Some("Package must include at least 1 hour"));
        assert!(!errors.contains("price_cents"));
    }

    #[test]
    fn test_payout_requires_both_dates() {
        let errors = validate_form::<CoachPayout>(&json!({
            "coach_id": Uuid::new_v4(),
            "period_start": "2026-09-01"
        }))
        .unwrap_err();

        assert_eq!(errors.first("period_end"), Some("Period end is required"));
    }

    #[test]
    fn test_payout_period_must_not_be_inverted() {
        let errors = validate_form::<CoachPayout>(&json!({
            "coach_id": Uuid::new_v4(),
            "period_start": "2026-09-30",
            "period_end": "2026-09-01"
        }))
        .unwrap_err();

        assert_eq!(
            errors.first(FORM_KEY),
            Some("Period end must be on or after period start")
        );
    }

    #[test]
    fn test_missing_coach_uses_coach_message() {
        let errors = validate_form::<CoachPayout>(&json!({
            "period_start": "2026-09-01",
            "period_end": "2026-09-30"
        }))
        .unwrap_err();

        assert_eq!(errors.first("coach_id"), Some("Coach is required"));
    }
}
