use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{blank_as_none, null_as_default, FormSchema};

closed_set! {
    pub enum CourtStatus {
        Active => "active",
        Maintenance => "maintenance",
        Inactive => "inactive",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Court {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Court name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Surface type is required"))]
    pub surface_type: String, // "hard", "clay", "grass", ...
    pub is_indoor: bool,
    pub status: CourtStatus,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FormSchema for Court {
    const LABEL: &'static str = "court";
    const PLURAL: &'static str = "courts";
    const TABLE: &'static str = "courts";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_form;
    use serde_json::json;

    #[test]
    fn test_empty_name_reports_court_name_required() {
        let errors = validate_form::<Court>(&json!({
            "name": "",
            "surface_type": "clay",
            "is_indoor": false,
            "status": "active"
        }))
        .unwrap_err();

        assert_eq!(errors.first("name"), Some("Court name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_status_outside_closed_set_is_keyed_to_status() {
        let errors = validate_form::<Court>(&json!({
            "name": "Court 1",
            "surface_type": "hard",
            "is_indoor": true,
            "status": "closed"
        }))
        .unwrap_err();

        assert!(errors.contains("status"));
        assert!(errors.first("status").unwrap().contains("closed"));
    }

    #[test]
    fn test_blank_notes_read_as_absent() {
        let court = validate_form::<Court>(&json!({
            "name": "Court 2",
            "surface_type": "grass",
            "is_indoor": false,
            "status": "maintenance",
            "notes": "  "
        }))
        .unwrap();

        assert_eq!(court.notes, None);
        assert_eq!(court.status, CourtStatus::Maintenance);
    }
}
