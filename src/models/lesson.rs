use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::student::SkillLevel;
use crate::validation::{
    blank_as_none, ends_after, invalid, null_as_default, validate_date, validate_time, FormSchema,
};

closed_set! {
    /// Set by the backend on creation and by the coach afterwards, never by
    /// the requesting parent.
    pub enum LessonRequestStatus {
        Pending => "pending",
        Approved => "approved",
        Declined => "declined",
        Cancelled => "cancelled",
    }
}

/// Weekly lesson slot; instances are generated from it by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_slot"))]
pub struct LessonTemplate {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Lesson name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub coach_id: Uuid,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub court_id: Option<Uuid>,
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
    #[validate(range(min = 1, message = "At least 1 student is required"))]
    pub max_students: i32,
    #[validate(range(min = 0, message = "Price must be zero or more"))]
    pub price_cents: i64,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<SkillLevel>,
}

fn validate_slot(template: &LessonTemplate) -> Result<(), ValidationError> {
    if ends_after(&template.start_time, &template.end_time) {
        Ok(())
    } else {
        Err(invalid("slot", "End time must be after start time"))
    }
}

impl FormSchema for LessonTemplate {
    const LABEL: &'static str = "lesson template";
    const PLURAL: &'static str = "lesson templates";
    const TABLE: &'static str = "lesson_templates";

    fn required_message(field: &str) -> &'static str {
        match field {
            "coach_id" => "Coach is required",
            _ => crate::validation::REQUIRED,
        }
    }
}

/// A parent's request for a private lesson.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LessonRequest {
    pub student_id: Uuid,
    pub coach_id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, message = "Preferred date is required"),
        custom(function = "validate_date")
    )]
    pub preferred_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, message = "Preferred time is required"),
        custom(function = "validate_time")
    )]
    pub preferred_time: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FormSchema for LessonRequest {
    const LABEL: &'static str = "lesson request";
    const PLURAL: &'static str = "lesson requests";
    const TABLE: &'static str = "lesson_requests";

    fn required_message(field: &str) -> &'static str {
        match field {
            "student_id" => "Student is required",
            "coach_id" => "Coach is required",
            _ => crate::validation::REQUIRED,
        }
    }
}

/// Coach response to a pending request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LessonRequestDecision {
    #[validate(custom(function = "validate_decision"))]
    pub status: LessonRequestStatus,
}

fn validate_decision(status: &LessonRequestStatus) -> Result<(), ValidationError> {
    match status {
        LessonRequestStatus::Pending => Err(invalid(
            "decision",
            "A request cannot be moved back to pending",
        )),
        _ => Ok(()),
    }
}

impl FormSchema for LessonRequestDecision {
    const LABEL: &'static str = "lesson request";
    const PLURAL: &'static str = "lesson requests";
    const TABLE: &'static str = "lesson_requests";
}
