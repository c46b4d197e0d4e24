//! Canned service implementation and fixtures for view-model tests.

use std::cell::{Cell, RefCell};

use crate::{
    Category, Project, ProjectNotification, ProjectService, ProjectStatsEnvelope, ServiceError,
    User,
};

/// A `ProjectService` with configurable canned responses.
///
/// Responses can be swapped mid-test (`set_projects` and friends) to model
/// a backend whose data changed between fetches. Call counts are recorded
/// so tests can assert how often the view-model actually hit the service.
pub struct MockService {
    fetch_projects_response: RefCell<Result<Vec<Project>, ServiceError>>,
    fetch_project_stats_response: RefCell<Result<ProjectStatsEnvelope, ServiceError>>,
    update_notification_error: RefCell<Option<ServiceError>>,
    fetch_projects_calls: Cell<u32>,
    fetch_project_stats_calls: Cell<u32>,
    update_notification_calls: Cell<u32>,
}

impl Default for MockService {
    fn default() -> Self {
        Self {
            fetch_projects_response: RefCell::new(Ok(Vec::new())),
            fetch_project_stats_response: RefCell::new(Ok(ProjectStatsEnvelope::default())),
            update_notification_error: RefCell::new(None),
            fetch_projects_calls: Cell::new(0),
            fetch_project_stats_calls: Cell::new(0),
            update_notification_calls: Cell::new(0),
        }
    }
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        *self.fetch_projects_response.borrow_mut() = Ok(projects);
        self
    }

    pub fn with_projects_error(self, error: ServiceError) -> Self {
        *self.fetch_projects_response.borrow_mut() = Err(error);
        self
    }

    pub fn with_project_stats(self, envelope: ProjectStatsEnvelope) -> Self {
        *self.fetch_project_stats_response.borrow_mut() = Ok(envelope);
        self
    }

    pub fn with_project_stats_error(self, error: ServiceError) -> Self {
        *self.fetch_project_stats_response.borrow_mut() = Err(error);
        self
    }

    pub fn with_update_notification_error(self, error: ServiceError) -> Self {
        *self.update_notification_error.borrow_mut() = Some(error);
        self
    }

    pub fn set_projects(&self, projects: Vec<Project>) {
        *self.fetch_projects_response.borrow_mut() = Ok(projects);
    }

    pub fn set_project_stats(&self, envelope: ProjectStatsEnvelope) {
        *self.fetch_project_stats_response.borrow_mut() = Ok(envelope);
    }

    pub fn fetch_projects_calls(&self) -> u32 {
        self.fetch_projects_calls.get()
    }

    pub fn fetch_project_stats_calls(&self) -> u32 {
        self.fetch_project_stats_calls.get()
    }

    pub fn update_notification_calls(&self) -> u32 {
        self.update_notification_calls.get()
    }
}

impl ProjectService for MockService {
    fn fetch_projects(&self) -> Result<Vec<Project>, ServiceError> {
        self.fetch_projects_calls
            .set(self.fetch_projects_calls.get() + 1);
        self.fetch_projects_response.borrow().clone()
    }

    fn fetch_project_stats(&self, _project_id: u64) -> Result<ProjectStatsEnvelope, ServiceError> {
        self.fetch_project_stats_calls
            .set(self.fetch_project_stats_calls.get() + 1);
        self.fetch_project_stats_response.borrow().clone()
    }

    fn update_project_notification(
        &self,
        notification: &ProjectNotification,
    ) -> Result<ProjectNotification, ServiceError> {
        self.update_notification_calls
            .set(self.update_notification_calls.get() + 1);
        match self.update_notification_error.borrow().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(notification.clone()),
        }
    }
}

pub fn project_template(id: u64) -> Project {
    Project::new(id, format!("Project {id}"))
}

pub fn user_template(opted_out_of_recommendations: bool) -> User {
    User {
        id: 42,
        name: "Blob".to_string(),
        opted_out_of_recommendations,
    }
}

pub fn art_category() -> Category {
    Category::root(1, "Art")
}

pub fn film_category() -> Category {
    Category::root(30, "Film & Video")
}

pub fn documentary_category() -> Category {
    Category::child(53, "Documentary", 30)
}
