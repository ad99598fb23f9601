// Activity record as stored in the directory and rendered by the API.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Activities keyed by name, in seed order.
pub type Activities = IndexMap<String, Activity>;

/// A named extracurricular offering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    /// Advisory capacity. Never enforced on sign-up.
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Reports whether the email is already in the participant list.
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }
}
