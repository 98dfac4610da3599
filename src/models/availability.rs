use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{
    blank_as_none, ends_after, invalid, null_as_default, validate_date, validate_time, FormSchema,
};

/// A window in which a coach can be booked. Recurring windows repeat every
/// week on `day_of_week` (0 = Sunday); one-off windows name `specific_date`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_window"))]
pub struct Availability {
    #[validate(range(min = 0, max = 6, message = "Day of week must be between 0 and 6"))]
    pub day_of_week: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, message = "Start time is required"),
        custom(function = "validate_time")
    )]
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, message = "End time is required"),
        custom(function = "validate_time")
    )]
    pub end_time: String,
    pub is_recurring: bool,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_date"))]
    pub specific_date: Option<String>,
}

fn validate_window(availability: &Availability) -> Result<(), ValidationError> {
    if ends_after(&availability.start_time, &availability.end_time) {
        Ok(())
    } else {
        Err(invalid("window", "End time must be after start time"))
    }
}

impl FormSchema for Availability {
    const LABEL: &'static str = "availability";
    const PLURAL: &'static str = "availability slots";
    const TABLE: &'static str = "coach_availability";

    fn required_message(field: &str) -> &'static str {
        match field {
            "day_of_week" => "Day of week is required",
            _ => crate::validation::REQUIRED,
        }
    }
}
