//! The explicit dependency context handed to every view-model.
//!
//! There is no process-wide environment: each view-model owns a clone of
//! [`AppEnv`] and reaches collaborators only through it. Everything is
//! `Rc` because the whole layer is single-threaded by design.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use backerboard_api::{ProjectService, User};
use backerboard_core::Scheduler;
use web_time::Duration;

/// Tracking event names shared by the screens.
pub mod event {
    pub const PAGE_VIEWED: &str = "Page Viewed";
    pub const CTA_CLICKED: &str = "CTA Clicked";
}

/// Synchronous string-keyed store, last-write-wins.
pub trait KeyValueStore {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn set_bool(&self, key: &str, value: bool);
}

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, bool>>,
}

impl KeyValueStore for MemoryStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.borrow().get(key).copied()
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }
}

/// Fire-and-forget analytics sink.
pub trait Tracker {
    fn track(&self, event: &str, properties: Vec<(String, String)>);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedEvent {
    pub name: String,
    pub properties: Vec<(String, String)>,
}

/// Records events in memory; what tests assert against.
#[derive(Default)]
pub struct MemoryTracker {
    events: RefCell<Vec<TrackedEvent>>,
}

impl MemoryTracker {
    pub fn event_names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.name.clone()).collect()
    }

    /// Every recorded value for `key`, in emission order — mirrors how
    /// tracking payloads get audited.
    pub fn properties_for_key(&self, key: &str) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| {
                e.properties
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
            })
            .collect()
    }
}

impl Tracker for MemoryTracker {
    fn track(&self, event: &str, properties: Vec<(String, String)>) {
        log::debug!("track: {event} {properties:?}");
        self.events.borrow_mut().push(TrackedEvent {
            name: event.to_string(),
            properties,
        });
    }
}

/// Remote feature-flag client. Readiness otherwise arrives through the
/// discovery view-model's input events; this only answers whether the
/// client already finished configuring before the screen appeared.
pub trait RemoteConfigClient {
    fn is_configured(&self) -> bool;
}

/// A remote-config client frozen at a fixed readiness state.
pub struct StaticRemoteConfig {
    configured: bool,
}

impl StaticRemoteConfig {
    pub fn new(configured: bool) -> Self {
        Self { configured }
    }
}

impl RemoteConfigClient for StaticRemoteConfig {
    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Mutable session handle; view-models read a snapshot per emission so a
/// login/logout between appearances is picked up naturally.
#[derive(Clone, Default)]
pub struct SessionContext(Rc<RefCell<Option<User>>>);

impl SessionContext {
    pub fn new(user: Option<User>) -> Self {
        Self(Rc::new(RefCell::new(user)))
    }

    pub fn current_user(&self) -> Option<User> {
        self.0.borrow().clone()
    }

    pub fn set_current_user(&self, user: Option<User>) {
        *self.0.borrow_mut() = user;
    }
}

/// Everything a view-model needs from the outside world.
#[derive(Clone)]
pub struct AppEnv {
    pub api: Rc<dyn ProjectService>,
    /// Artificial delay applied to every service call before its result
    /// is delivered through the scheduler. Zero in tests.
    pub api_delay: Duration,
    pub cache: Rc<dyn KeyValueStore>,
    pub tracking: Rc<dyn Tracker>,
    pub remote_config: Option<Rc<dyn RemoteConfigClient>>,
    pub session: SessionContext,
    pub is_voice_over_running: bool,
    pub scheduler: Scheduler,
}

impl AppEnv {
    pub fn new(api: Rc<dyn ProjectService>) -> Self {
        Self {
            api,
            api_delay: Duration::ZERO,
            cache: Rc::new(MemoryStore::default()),
            tracking: Rc::new(MemoryTracker::default()),
            remote_config: None,
            session: SessionContext::default(),
            is_voice_over_running: false,
            scheduler: Scheduler::new(),
        }
    }
}
