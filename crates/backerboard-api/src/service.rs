use thiserror::Error;

use crate::{Project, ProjectNotification, ProjectStatsEnvelope};

/// What can go wrong talking to the backend.
///
/// Dashboard fetches absorb these at the view-model boundary; only the
/// notification update surfaces a message to the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("api rejected the request: {}", error_messages.join(", "))]
    Api { error_messages: Vec<String> },
}

impl ServiceError {
    pub fn api(messages: &[&str]) -> Self {
        ServiceError::Api {
            error_messages: messages.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    /// The first human-readable message the server sent, if any.
    pub fn first_message(&self) -> Option<String> {
        match self {
            ServiceError::Api { error_messages } => error_messages.first().cloned(),
            ServiceError::Transport(_) => None,
        }
    }
}

/// The narrow backend surface the view-models consume.
///
/// Calls return synchronously; asynchrony is modeled by the caller
/// delivering completions through the scheduler, which keeps the whole
/// layer deterministic under test.
pub trait ProjectService {
    fn fetch_projects(&self) -> Result<Vec<Project>, ServiceError>;

    fn fetch_project_stats(&self, project_id: u64) -> Result<ProjectStatsEnvelope, ServiceError>;

    fn update_project_notification(
        &self,
        notification: &ProjectNotification,
    ) -> Result<ProjectNotification, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message() {
        let err = ServiceError::api(&["Unable to save.", "Try again later."]);
        assert_eq!(err.first_message(), Some("Unable to save.".to_string()));

        let empty = ServiceError::Api {
            error_messages: vec![],
        };
        assert_eq!(empty.first_message(), None);

        let transport = ServiceError::Transport("connection reset".to_string());
        assert_eq!(transport.first_message(), None);
    }
}
