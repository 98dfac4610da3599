use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{blank_as_none, null_as_default, validate_date, FormSchema};

closed_set! {
    pub enum SkillLevel {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
        Elite => "elite",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Student {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_date"))]
    pub dob: Option<String>,
    pub skill_level: SkillLevel,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub medical_notes: Option<String>,
    pub parent_id: Uuid,
}

impl FormSchema for Student {
    const LABEL: &'static str = "student";
    const PLURAL: &'static str = "students";
    const TABLE: &'static str = "students";

    fn required_message(field: &str) -> &'static str {
        match field {
            "parent_id" => "Parent is required",
            "skill_level" => "Skill level is required",
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
    fn test_missing_parent_is_reported() {
        let errors = validate_form::<Student>(&json!({
            "first_name": "Ana",
            "last_name": "Silva",
            "skill_level": "beginner"
        }))
        .unwrap_err();

        assert_eq!(errors.first("parent_id"), Some("Parent is required"));
    }

    #[test]
    fn test_unselected_parent_picker_reads_as_required() {
        let errors = validate_form::<Student>(&json!({
            "first_name": "Ana",
            "last_name": "Silva",
            "skill_level": "elite",
            "parent_id": ""
        }))
        .unwrap_err();

        assert_eq!(errors.first("parent_id"), Some("Parent is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_bad_dob_and_blank_names_collect_every_message() {
        let errors = validate_form::<Student>(&json!({
            "first_name": "",
            "last_name": "",
            "dob": "12/05/2015",
            "skill_level": "advanced",
            "parent_id": Uuid::new_v4()
        }))
        .unwrap_err();

        assert_eq!(errors.first("first_name"), Some("First name is required"));
        assert_eq!(errors.first("last_name"), Some("Last name is required"));
        assert_eq!(errors.first("dob"), Some("Use the YYYY-MM-DD format"));
    }

    #[test]
    fn test_valid_student_keeps_optional_fields_absent() {
        let parent_id = Uuid::new_v4();
        let student = validate_form::<Student>(&json!({
            "first_name": "Ana",
            "last_name": "Silva",
            "dob": "2015-05-12",
            "skill_level": "intermediate",
            "parent_id": parent_id
        }))
        .unwrap();

        assert_eq!(student.parent_id, parent_id);
        assert_eq!(student.medical_notes, None);
        let out = serde_json::to_value(&student).unwrap();
        assert!(out.get("medical_notes").is_none());
    }
}
