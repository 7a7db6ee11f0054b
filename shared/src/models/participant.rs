//! Participant Model

use serde::{Deserialize, Serialize};

/// One entry of a reward session's audience
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub mobile: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mobile: mobile.into(),
        }
    }

    /// Both name and mobile are filled in
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.mobile.trim().is_empty()
    }
}
