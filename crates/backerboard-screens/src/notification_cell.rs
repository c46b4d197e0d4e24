//! View-model for one project-notification row: an optimistic toggle that
//! rolls back when the update fails.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use backerboard_api::ProjectNotification;
use backerboard_core::Signal;

use crate::env::AppEnv;

const GENERIC_SAVE_ERROR: &str = "Something went wrong, please try again.";

fn cache_key(notification_id: u64) -> String {
    format!("project_notification_view_model_notification_{notification_id}")
}

pub struct ProjectNotificationCellOutputs {
    pub name: Signal<String>,
    /// Combined email+mobile state, deduplicated.
    pub notification_on: Signal<bool>,
    pub notify_delegate_of_save_error: Signal<String>,
}

impl ProjectNotificationCellOutputs {
    fn new() -> Self {
        Self {
            name: Signal::new(),
            notification_on: Signal::new(),
            notify_delegate_of_save_error: Signal::new(),
        }
    }
}

#[derive(Default)]
struct State {
    notification: Option<ProjectNotification>,
    update_generation: u64,
}

pub struct ProjectNotificationCellViewModel {
    inner: Rc<Inner>,
}

struct Inner {
    weak: Weak<Inner>,
    env: AppEnv,
    state: RefCell<State>,
    outputs: ProjectNotificationCellOutputs,
}

impl ProjectNotificationCellViewModel {
    pub fn new(env: AppEnv) -> Self {
        Self {
            inner: Rc::new_cyclic(|weak| Inner {
                weak: weak.clone(),
                env,
                state: RefCell::new(State::default()),
                outputs: ProjectNotificationCellOutputs::new(),
            }),
        }
    }

    pub fn outputs(&self) -> &ProjectNotificationCellOutputs {
        &self.inner.outputs
    }

    /// Bind the cell to a notification. A cached toggle state overrides
    /// the server-supplied flags so a just-toggled row re-renders
    /// instantly on reconfiguration.
    pub fn configure_with(&self, notification: ProjectNotification) {
        self.inner.configure_with(notification);
    }

    /// The switch was tapped. Applies the desired state speculatively and
    /// issues the update; a failure reverts to the pre-tap snapshot.
    pub fn notification_tapped(&self, on: bool) {
        self.inner.notification_tapped(on);
    }
}

impl Inner {
    fn configure_with(&self, notification: ProjectNotification) {
        let notification = match self.env.cache.get_bool(&cache_key(notification.id)) {
            Some(on) => notification.with_on(on),
            None => notification,
        };
        self.outputs.name.emit(notification.project.name.clone());
        self.outputs
            .notification_on
            .emit_distinct(notification.is_on());
        self.state.borrow_mut().notification = Some(notification);
    }

    fn notification_tapped(&self, on: bool) {
        let (generation, previous, toggled) = {
            let mut state = self.state.borrow_mut();
            let Some(current) = state.notification.clone() else {
                log::debug!("tap before configure ignored");
                return;
            };
            let toggled = current.clone().with_on(on);
            state.notification = Some(toggled.clone());
            state.update_generation += 1;
            (state.update_generation, current, toggled)
        };
        self.outputs.notification_on.emit_distinct(on);
        let weak = self.weak.clone();
        self.env.scheduler.schedule(self.env.api_delay, move || {
            if let Some(vm) = weak.upgrade() {
                vm.complete_update(generation, previous, toggled);
            }
        });
    }

    fn complete_update(
        &self,
        generation: u64,
        previous: ProjectNotification,
        toggled: ProjectNotification,
    ) {
        if self.state.borrow().update_generation != generation {
            // A newer tap superseded this update.
            return;
        }
        match self.env.api.update_project_notification(&toggled) {
            Ok(updated) => {
                self.env.cache.set_bool(&cache_key(updated.id), updated.is_on());
                let on = updated.is_on();
                self.state.borrow_mut().notification = Some(updated);
                self.outputs.notification_on.emit_distinct(on);
            }
            Err(err) => {
                log::warn!("notification update failed: {err}");
                let on = previous.is_on();
                self.state.borrow_mut().notification = Some(previous);
                self.outputs.notification_on.emit_distinct(on);
                let message = err
                    .first_message()
                    .unwrap_or_else(|| GENERIC_SAVE_ERROR.to_string());
                self.outputs.notify_delegate_of_save_error.emit(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::KeyValueStore;
    use crate::test_support::test_env;
    use backerboard_api::testing::{MockService, project_template};
    use backerboard_api::ServiceError;
    use backerboard_core::TestObserver;
    use web_time::Duration;

    fn notification(on: bool) -> ProjectNotification {
        ProjectNotification::new(1, project_template(1), on)
    }

    #[test]
    fn test_name() {
        let harness = test_env(MockService::new());
        let vm = ProjectNotificationCellViewModel::new(harness.env.clone());
        let name = TestObserver::observing(&vm.outputs().name);

        vm.configure_with(notification(false));

        name.assert_values(&["Project 1".to_string()], "Project name emitted");
    }

    #[test]
    fn test_notification_on_deduplicates() {
        let harness = test_env(MockService::new());
        let vm = ProjectNotificationCellViewModel::new(harness.env.clone());
        let on = TestObserver::observing(&vm.outputs().notification_on);

        vm.configure_with(notification(false));
        vm.configure_with(notification(false));

        on.assert_values(&[false], "Reconfiguring with the same state stays silent");
    }

    #[test]
    fn test_cached_state_overrides_server_value() {
        let harness = test_env(MockService::new());
        harness.cache.set_bool(&cache_key(1), true);
        let vm = ProjectNotificationCellViewModel::new(harness.env.clone());
        let on = TestObserver::observing(&vm.outputs().notification_on);

        vm.configure_with(notification(false));

        on.assert_values(&[true], "The cached toggle wins over the stale server value");
    }

    #[test]
    fn test_tap_success_commits_to_cache() {
        let harness = test_env(MockService::new());
        let vm = ProjectNotificationCellViewModel::new(harness.env.clone());
        let on = TestObserver::observing(&vm.outputs().notification_on);
        let error = TestObserver::observing(&vm.outputs().notify_delegate_of_save_error);

        vm.configure_with(notification(false));
        on.assert_values(&[false], "Initial state displayed");

        vm.notification_tapped(true);
        on.assert_values(&[false, true], "Tap applies optimistically");
        assert_eq!(harness.cache.get_bool(&cache_key(1)), None, "Nothing cached yet");

        harness.scheduler.advance();

        on.assert_values(&[false, true], "Success leaves the tapped state");
        error.assert_count(0, "No error on success");
        assert_eq!(harness.cache.get_bool(&cache_key(1)), Some(true), "Committed to cache");
        assert_eq!(harness.api.update_notification_calls(), 1);
    }

    #[test]
    fn test_tap_failure_rolls_back_without_caching() {
        let harness = test_env(
            MockService::new()
                .with_update_notification_error(ServiceError::api(&["Unable to save."])),
        );
        let vm = ProjectNotificationCellViewModel::new(harness.env.clone());
        let on = TestObserver::observing(&vm.outputs().notification_on);
        let error = TestObserver::observing(&vm.outputs().notify_delegate_of_save_error);

        vm.configure_with(notification(false));
        vm.notification_tapped(true);

        on.assert_values(&[false, true], "Tap applies optimistically");

        harness.scheduler.advance();

        on.assert_values(&[false, true, false], "Failure reverts to the pre-tap state");
        error.assert_values(&["Unable to save.".to_string()], "Server message surfaced");
        assert_eq!(
            harness.cache.get_bool(&cache_key(1)),
            None,
            "Nothing cached on failure"
        );
    }

    #[test]
    fn test_tap_failure_without_message_uses_fallback() {
        let harness = test_env(
            MockService::new()
                .with_update_notification_error(ServiceError::Transport("timeout".to_string())),
        );
        let vm = ProjectNotificationCellViewModel::new(harness.env.clone());
        let error = TestObserver::observing(&vm.outputs().notify_delegate_of_save_error);

        vm.configure_with(notification(false));
        vm.notification_tapped(true);
        harness.scheduler.advance();

        error.assert_values(
            &[GENERIC_SAVE_ERROR.to_string()],
            "Generic message when the server sent none",
        );
    }

    #[test]
    fn test_latest_tap_wins() {
        let harness = test_env(MockService::new());
        let mut env = harness.env.clone();
        env.api_delay = Duration::from_secs(1);
        let vm = ProjectNotificationCellViewModel::new(env);
        let on = TestObserver::observing(&vm.outputs().notification_on);

        vm.configure_with(notification(false));
        vm.notification_tapped(true);
        vm.notification_tapped(false);

        on.assert_values(&[false, true, false], "Both taps apply optimistically");

        harness.scheduler.advance_by(Duration::from_secs(1));

        assert_eq!(
            harness.api.update_notification_calls(),
            1,
            "The superseded tap never reaches the service"
        );
        on.assert_values(&[false, true, false], "Final state is the latest tap");
        assert_eq!(harness.cache.get_bool(&cache_key(1)), Some(false));
    }
}
