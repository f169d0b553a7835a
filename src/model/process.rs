use serde::{Deserialize, Serialize};

use super::wire::{opt_present_string, scalar_string};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub size: u64,

    #[serde(default, deserialize_with = "opt_present_string")]
    pub status: Option<String>,

    /// The simulator sends `0` for processes it never prioritized.
    #[serde(default, deserialize_with = "opt_present_string")]
    pub priority: Option<String>,
}

impl Process {
    pub fn status_label(&self) -> &str {
        self.status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Unknown")
    }

    pub fn priority_label(&self) -> &str {
        self.priority
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or("Normal")
    }
}
