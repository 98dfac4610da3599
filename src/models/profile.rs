use serde::{Deserialize, Serialize};

use super::Stored;

closed_set! {
    pub enum Role {
        Admin => "admin",
        Coach => "coach",
        Parent => "parent",
    }
}

/// Account row used to fill coach and parent pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
}

impl Profile {
    pub fn display_name(&self) -> String {
        crate::display::full_name(&self.first_name, &self.last_name)
    }
}

/// Profiles holding `role`, keeping the backend's order.
pub fn with_role(profiles: &[Stored<Profile>], role: Role) -> Vec<&Stored<Profile>> {
    profiles.iter().filter(|p| p.data.role == role).collect()
}
