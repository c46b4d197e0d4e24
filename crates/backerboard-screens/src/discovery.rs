//! View-model for the discovery feed: the sort pager, the filter state,
//! and the remote-config gate in front of the first default emission.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use backerboard_api::{DiscoveryParams, Sort};
use backerboard_core::Signal;
use web_time::Duration;

use crate::env::{AppEnv, event};

/// How long the first default-params emission waits for remote config
/// before proceeding with failure semantics.
const REMOTE_CONFIG_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationDirection {
    Forward,
    Reverse,
}

pub struct DiscoveryOutputs {
    /// The fixed, ordered set of sort pages. Emits once, on load.
    pub configure_pager_data_source: Signal<Vec<Sort>>,
    pub configure_navigation_header: Signal<DiscoveryParams>,
    pub load_filter_into_data_source: Signal<DiscoveryParams>,
    /// Programmatic pager navigation, for tap selection only — swipes
    /// already sit on the right page.
    pub navigate_to_sort: Signal<(Sort, NavigationDirection)>,
    pub select_sort_page: Signal<Sort>,
    /// Root category id of the active filter, deduplicated.
    pub update_sort_pager_style: Signal<Option<u64>>,
}

impl DiscoveryOutputs {
    fn new() -> Self {
        Self {
            configure_pager_data_source: Signal::new(),
            configure_navigation_header: Signal::new(),
            load_filter_into_data_source: Signal::new(),
            navigate_to_sort: Signal::new(),
            select_sort_page: Signal::new(),
            update_sort_pager_style: Signal::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Gate {
    #[default]
    Waiting,
    Open,
}

#[derive(Default)]
struct State {
    loaded: bool,
    appeared: bool,
    gate: Gate,
    timeout_armed: bool,
    initial_emitted: bool,
    emission_scheduled: bool,
    recommendations_dirty: bool,
    current_page: usize,
    pending_page: Option<usize>,
    last_style: Option<u64>,
}

pub struct DiscoveryViewModel {
    inner: Rc<Inner>,
}

struct Inner {
    weak: Weak<Inner>,
    env: AppEnv,
    state: RefCell<State>,
    outputs: DiscoveryOutputs,
}

impl DiscoveryViewModel {
    pub fn new(env: AppEnv) -> Self {
        Self {
            inner: Rc::new_cyclic(|weak| Inner {
                weak: weak.clone(),
                env,
                state: RefCell::new(State::default()),
                outputs: DiscoveryOutputs::new(),
            }),
        }
    }

    pub fn outputs(&self) -> &DiscoveryOutputs {
        &self.inner.outputs
    }

    pub fn view_did_load(&self) {
        self.inner.view_did_load();
    }

    pub fn view_will_appear(&self, animated: bool) {
        self.inner.view_will_appear(animated);
    }

    /// Apply an explicit filter. Bypasses the remote-config gate — the
    /// gate only protects the very first default emission.
    pub fn filter_with_params(&self, params: DiscoveryParams) {
        self.inner.filter_with_params(params);
    }

    /// A swipe transition started toward `page`.
    pub fn will_transition(&self, to_page: usize) {
        self.inner.state.borrow_mut().pending_page = Some(to_page);
    }

    /// The swipe transition resolved; `completed` = false means the user
    /// let it snap back.
    pub fn page_transition(&self, completed: bool) {
        self.inner.page_transition(completed);
    }

    /// A sort tab was tapped directly.
    pub fn sort_pager_selected(&self, sort: Sort) {
        self.inner.sort_pager_selected(sort);
    }

    pub fn remote_config_client_configured(&self) {
        self.inner.open_gate();
    }

    pub fn remote_config_client_configuration_failed(&self) {
        log::warn!("remote config configuration failed; proceeding with defaults");
        self.inner.open_gate();
    }

    /// The recommendations opt-out changed in settings; the next
    /// appearance re-emits adjusted defaults.
    pub fn did_change_recommendations_setting(&self) {
        self.inner.state.borrow_mut().recommendations_dirty = true;
    }
}

impl Inner {
    fn view_did_load(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.loaded {
                return;
            }
            state.loaded = true;
        }
        self.outputs
            .configure_pager_data_source
            .emit(Sort::ALL.to_vec());
        self.maybe_schedule_emission();
    }

    fn view_will_appear(&self, animated: bool) {
        log::debug!("discovery appearing (animated: {animated})");
        let arm_timeout = {
            let mut state = self.state.borrow_mut();
            state.appeared = true;
            if state.initial_emitted {
                false
            } else {
                match &self.env.remote_config {
                    None => {
                        state.gate = Gate::Open;
                        false
                    }
                    Some(client) if client.is_configured() => {
                        state.gate = Gate::Open;
                        false
                    }
                    Some(_) => {
                        let arm = state.gate == Gate::Waiting && !state.timeout_armed;
                        if arm {
                            state.timeout_armed = true;
                        }
                        arm
                    }
                }
            }
        };
        if arm_timeout {
            let weak = self.weak.clone();
            self.env.scheduler.schedule(REMOTE_CONFIG_TIMEOUT, move || {
                if let Some(vm) = weak.upgrade() {
                    vm.gate_timed_out();
                }
            });
        }
        self.maybe_schedule_emission();
    }

    fn gate_timed_out(&self) {
        let fire = {
            let state = self.state.borrow();
            state.gate == Gate::Waiting && !state.initial_emitted
        };
        if fire {
            log::warn!("remote config not ready within {REMOTE_CONFIG_TIMEOUT:?}; proceeding");
            self.open_gate();
        }
    }

    fn open_gate(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.gate == Gate::Open {
                return;
            }
            state.gate = Gate::Open;
        }
        self.maybe_schedule_emission();
    }

    /// Defers the default-params emission to the next scheduler tick once
    /// the pager is configured, the screen appeared, and the gate is open.
    /// Also covers re-emission after a recommendations-setting change.
    fn maybe_schedule_emission(&self) {
        {
            let mut state = self.state.borrow_mut();
            let due_initially = !state.initial_emitted;
            let due_again = state.initial_emitted && state.recommendations_dirty;
            let ready = state.loaded && state.appeared && state.gate == Gate::Open;
            if !ready || state.emission_scheduled || !(due_initially || due_again) {
                return;
            }
            state.emission_scheduled = true;
        }
        let weak = self.weak.clone();
        self.env.scheduler.schedule(Duration::ZERO, move || {
            if let Some(vm) = weak.upgrade() {
                vm.emit_default_params();
            }
        });
    }

    fn emit_default_params(&self) {
        let params = {
            let mut state = self.state.borrow_mut();
            state.emission_scheduled = false;
            if state.initial_emitted && !state.recommendations_dirty {
                return;
            }
            state.initial_emitted = true;
            state.recommendations_dirty = false;
            self.default_params()
        };
        self.outputs
            .load_filter_into_data_source
            .emit(params.clone());
        self.outputs.configure_navigation_header.emit(params.clone());
        self.emit_style(&params);
    }

    fn default_params(&self) -> DiscoveryParams {
        let mut params = DiscoveryParams::defaults().with_include_potd(true);
        if let Some(user) = self.env.session.current_user()
            && !user.opted_out_of_recommendations
        {
            params = params.with_recommended(true).with_backed(false);
        }
        params
    }

    fn filter_with_params(&self, params: DiscoveryParams) {
        // An explicit choice stands in for the first default emission.
        self.state.borrow_mut().initial_emitted = true;
        self.outputs
            .load_filter_into_data_source
            .emit(params.clone());
        self.outputs.configure_navigation_header.emit(params.clone());
        self.emit_style(&params);
    }

    fn emit_style(&self, params: &DiscoveryParams) {
        let root = params.root_category_id();
        let changed = {
            let mut state = self.state.borrow_mut();
            if state.last_style == root {
                false
            } else {
                state.last_style = root;
                true
            }
        };
        if changed {
            self.outputs.update_sort_pager_style.emit(root);
        }
    }

    fn page_transition(&self, completed: bool) {
        let transition = {
            let mut state = self.state.borrow_mut();
            let pending = state.pending_page.take();
            if !completed {
                return;
            }
            let Some(page) = pending else {
                return;
            };
            if page == state.current_page || page >= Sort::ALL.len() {
                return;
            }
            let previous = Sort::ALL[state.current_page];
            state.current_page = page;
            (previous, Sort::ALL[page])
        };
        let (previous, new_sort) = transition;
        self.outputs.select_sort_page.emit(new_sort);
        self.track_sort_change(previous, new_sort);
    }

    fn sort_pager_selected(&self, sort: Sort) {
        let transition = {
            let mut state = self.state.borrow_mut();
            let target = sort.page_index();
            if target == state.current_page {
                return;
            }
            let previous = Sort::ALL[state.current_page];
            let direction = if target < state.current_page {
                NavigationDirection::Reverse
            } else {
                NavigationDirection::Forward
            };
            state.current_page = target;
            (previous, direction)
        };
        let (previous, direction) = transition;
        self.outputs.select_sort_page.emit(sort);
        self.outputs.navigate_to_sort.emit((sort, direction));
        self.track_sort_change(previous, sort);
    }

    fn track_sort_change(&self, previous: Sort, new_sort: Sort) {
        self.env.tracking.track(
            event::CTA_CLICKED,
            vec![
                (
                    "context_type".to_string(),
                    previous.tracking_name().to_string(),
                ),
                (
                    "discover_sort".to_string(),
                    new_sort.tracking_name().to_string(),
                ),
            ],
        );
    }
}
