use serde::{Deserialize, Serialize};

use crate::Project;

/// Per-project notification preference. The two channel flags move
/// together as one logical toggle; they only diverge transiently while an
/// update is in flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNotification {
    pub id: u64,
    pub project: Project,
    pub email: bool,
    pub mobile: bool,
}

impl ProjectNotification {
    pub fn new(id: u64, project: Project, on: bool) -> Self {
        Self {
            id,
            project,
            email: on,
            mobile: on,
        }
    }

    /// The combined display state of the toggle.
    pub fn is_on(&self) -> bool {
        self.email && self.mobile
    }

    pub fn with_on(mut self, on: bool) -> Self {
        self.email = on;
        self.mobile = on;
        self
    }
}
