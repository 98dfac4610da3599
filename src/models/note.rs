use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{blank_as_none, null_as_default, FormSchema};

/// Coach note on a student, optionally tied to the lesson it was written
/// after. Private notes are hidden from parents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct StudentNote {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Note content is required"))]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_private: bool,
    pub student_id: Uuid,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub lesson_instance_id: Option<Uuid>,
}

impl FormSchema for StudentNote {
    const LABEL: &'static str = "note";
    const PLURAL: &'static str = "notes";
    const TABLE: &'static str = "student_notes";

    fn required_message(field: &str) -> &'static str {
        match field {
            "student_id" => "Student is required",
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
    fn test_empty_note_is_rejected() {
        let errors = validate_form::<StudentNote>(&json!({
            "content": "",
            "is_private": true,
            "student_id": Uuid::new_v4()
        }))
        .unwrap_err();

        assert_eq!(errors.first("content"), Some("Note content is required"));
    }

    #[test]
    fn test_note_links_to_lesson_instance() {
        let lesson = Uuid::new_v4();
        let note = validate_form::<StudentNote>(&json!({
            "content": "Great topspin today",
            "student_id": Uuid::new_v4(),
            "lesson_instance_id": lesson
        }))
        .unwrap();

        assert!(!note.is_private);
        assert_eq!(note.lesson_instance_id, Some(lesson));
    }
}
