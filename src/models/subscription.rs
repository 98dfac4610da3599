use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::{
    blank_as_none, invalid, null_as_default, parse_date, validate_date, FormSchema,
};

closed_set! {
    pub enum SubscriptionStatus {
        Active => "active",
        Paused => "paused",
        Cancelled => "cancelled",
        Expired => "expired",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_term"))]
pub struct Subscription {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Subscription name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Price must be zero or more"))]
    pub price_cents: i64,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Lessons per month must be at least 1"))]
    pub lessons_per_month: Option<i32>,
    /// Parent account billed for the subscription.
    pub user_id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, message = "Start date is required"),
        custom(function = "validate_date")
    )]
    pub starts_at: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_date"))]
    pub ends_at: Option<String>,
    pub status: SubscriptionStatus,
}

fn validate_term(subscription: &Subscription) -> Result<(), ValidationError> {
    let start = parse_date(&subscription.starts_at);
    let end = subscription.ends_at.as_deref().and_then(parse_date);
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(invalid(
            "term",
            "End date must be on or after the start date",
        )),
        _ => Ok(()),
    }
}

impl FormSchema for Subscription {
    const LABEL: &'static str = "subscription";
    const PLURAL: &'static str = "subscriptions";
    const TABLE: &'static str = "subscriptions";

    fn required_message(field: &str) -> &'static str {
        match field {
            "user_id" => "Parent is required",
            "price_cents" => "Price is required",
            _ => crate::validation::REQUIRED,
        }
    }
}
