//! View-model for the creator dashboard: the project list, the selected
//! project's statistics, and the slide-out project-picker drawer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use backerboard_api::{
    CumulativeStats, FundingDateStats, MessageThread, Project, ReferrerStats, RewardStats,
    VideoStats,
};
use backerboard_core::Signal;

use crate::env::{AppEnv, event};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

/// Snapshot driving the title view: recomputed on every selection or
/// drawer change, deduplicated on emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardTitleViewData {
    pub drawer_state: DrawerState,
    /// The disclosure arrow is pointless with a single project.
    pub is_arrow_hidden: bool,
    pub current_project_index: usize,
}

/// One row of the project-picker drawer checklist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectsDrawerRow {
    pub project: Project,
    pub index: usize,
    pub is_checked: bool,
}

/// Cumulative totals paired with the referral breakdown; the two always
/// redraw together.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferrerData {
    pub cumulative: CumulativeStats,
    pub referrers: Vec<ReferrerStats>,
}

pub struct DashboardOutputs {
    /// The currently selected project. Re-emits on every successful list
    /// fetch, even when the selection is unchanged.
    pub project: Signal<Project>,
    pub update_title_view_data: Signal<DashboardTitleViewData>,
    pub loader_is_animating: Signal<bool>,
    pub funding_stats: Signal<Vec<FundingDateStats>>,
    pub referrer_data: Signal<ReferrerData>,
    pub reward_stats: Signal<Vec<RewardStats>>,
    /// Emits only when the fetched envelope actually carries video stats.
    pub video_stats: Signal<VideoStats>,
    pub present_projects_drawer: Signal<Vec<ProjectsDrawerRow>>,
    pub animate_out_projects_drawer: Signal<()>,
    /// One dismiss per acknowledged animate-out, never before the ack.
    pub dismiss_projects_drawer: Signal<()>,
    pub focus_screen_reader_on_title_view: Signal<()>,
    pub go_to_message_thread: Signal<(Project, MessageThread)>,
}

impl DashboardOutputs {
    fn new() -> Self {
        Self {
            project: Signal::new(),
            update_title_view_data: Signal::new(),
            loader_is_animating: Signal::new(),
            funding_stats: Signal::new(),
            referrer_data: Signal::new(),
            reward_stats: Signal::new(),
            video_stats: Signal::new(),
            present_projects_drawer: Signal::new(),
            animate_out_projects_drawer: Signal::new(),
            dismiss_projects_drawer: Signal::new(),
            focus_screen_reader_on_title_view: Signal::new(),
            go_to_message_thread: Signal::new(),
        }
    }
}

#[derive(Default)]
struct State {
    projects: Vec<Project>,
    selected: Option<usize>,
    drawer: DrawerState,
    /// Deep-link target applied on the next list resolution.
    pending_target: Option<u64>,
    pending_thread: Option<(u64, MessageThread)>,
    /// Animate-outs the view has not acknowledged yet.
    awaiting_drawer_ack: u32,
    fetch_generation: u64,
    stats_generation: u64,
}

pub struct DashboardViewModel {
    inner: Rc<Inner>,
}

struct Inner {
    weak: Weak<Inner>,
    env: AppEnv,
    state: RefCell<State>,
    outputs: DashboardOutputs,
}

impl DashboardViewModel {
    pub fn new(env: AppEnv) -> Self {
        Self {
            inner: Rc::new_cyclic(|weak| Inner {
                weak: weak.clone(),
                env,
                state: RefCell::new(State::default()),
                outputs: DashboardOutputs::new(),
            }),
        }
    }

    pub fn outputs(&self) -> &DashboardOutputs {
        &self.inner.outputs
    }

    pub fn view_did_load(&self) {
        log::debug!("dashboard loaded");
    }

    pub fn view_will_appear(&self, animated: bool) {
        self.inner.view_will_appear(animated);
    }

    pub fn view_will_disappear(&self) {
        log::debug!("dashboard disappearing");
    }

    /// Select another of the creator's projects, by id. Before the first
    /// list resolution this records a deep-link target instead.
    pub fn switch_to_project(&self, id: u64) {
        self.inner.switch_to_project(id);
    }

    pub fn show_hide_projects_drawer(&self) {
        self.inner.show_hide_projects_drawer();
    }

    /// The view finished the drawer's slide-out animation.
    pub fn projects_drawer_did_animate_out(&self) {
        self.inner.projects_drawer_did_animate_out();
    }

    /// A message-thread deep link landed. Takes effect on the next
    /// appearance; the displayed project does not change now.
    pub fn message_thread_navigated(&self, project_id: u64, thread: MessageThread) {
        let mut state = self.inner.state.borrow_mut();
        state.pending_target = Some(project_id);
        state.pending_thread = Some((project_id, thread));
    }

    pub fn track_post_update_clicked(&self) {
        self.inner.env.tracking.track(
            event::CTA_CLICKED,
            vec![("context_cta".to_string(), "post_update".to_string())],
        );
    }
}

impl Inner {
    fn view_will_appear(&self, animated: bool) {
        log::debug!("dashboard appearing (animated: {animated})");
        self.env.tracking.track(
            event::PAGE_VIEWED,
            vec![("context_page".to_string(), "creator_dashboard".to_string())],
        );
        if self.env.is_voice_over_running {
            self.outputs.focus_screen_reader_on_title_view.emit(());
        }
        self.fetch_projects();
    }

    fn fetch_projects(&self) {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.fetch_generation += 1;
            state.fetch_generation
        };
        self.outputs.loader_is_animating.emit(true);
        let weak = self.weak.clone();
        self.env.scheduler.schedule(self.env.api_delay, move || {
            if let Some(vm) = weak.upgrade() {
                vm.complete_projects_fetch(generation);
            }
        });
    }

    fn complete_projects_fetch(&self, generation: u64) {
        if self.state.borrow().fetch_generation != generation {
            // A newer appearance superseded this fetch.
            return;
        }
        let result = self.env.api.fetch_projects();
        self.outputs.loader_is_animating.emit(false);
        match result {
            Ok(projects) if !projects.is_empty() => self.apply_project_list(projects),
            Ok(_) => log::debug!("dashboard fetch returned no projects"),
            Err(err) => log::warn!("dashboard projects fetch failed: {err}"),
        }
    }

    fn apply_project_list(&self, projects: Vec<Project>) {
        let (selected, thread) = {
            let mut state = self.state.borrow_mut();
            let target_id = state.pending_target.take().or_else(|| {
                state
                    .selected
                    .and_then(|i| state.projects.get(i))
                    .map(|p| p.id)
            });
            state.projects = projects;
            let index = target_id
                .and_then(|id| state.projects.iter().position(|p| p.id == id))
                .unwrap_or(0);
            state.selected = Some(index);
            let selected = state.projects[index].clone();
            let thread = state.pending_thread.take().map(|(project_id, thread)| {
                let project = state
                    .projects
                    .iter()
                    .find(|p| p.id == project_id)
                    .cloned()
                    .unwrap_or_else(|| selected.clone());
                (project, thread)
            });
            (selected, thread)
        };
        self.outputs.project.emit(selected.clone());
        self.emit_title_data();
        if let Some(pair) = thread {
            self.outputs.go_to_message_thread.emit(pair);
        }
        self.fetch_stats(selected.id);
    }

    fn fetch_stats(&self, project_id: u64) {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.stats_generation += 1;
            state.stats_generation
        };
        let weak = self.weak.clone();
        self.env.scheduler.schedule(self.env.api_delay, move || {
            if let Some(vm) = weak.upgrade() {
                vm.complete_stats_fetch(generation, project_id);
            }
        });
    }

    fn complete_stats_fetch(&self, generation: u64, project_id: u64) {
        if self.state.borrow().stats_generation != generation {
            // Selection moved on; drop the stale result.
            return;
        }
        match self.env.api.fetch_project_stats(project_id) {
            Ok(envelope) => {
                self.outputs
                    .funding_stats
                    .emit(envelope.funding_distribution);
                self.outputs.referrer_data.emit(ReferrerData {
                    cumulative: envelope.cumulative_stats,
                    referrers: envelope.referral_distribution,
                });
                self.outputs.reward_stats.emit(envelope.reward_distribution);
                if let Some(video) = envelope.video_stats {
                    self.outputs.video_stats.emit(video);
                }
            }
            Err(err) => log::warn!("stats fetch for project {project_id} failed: {err}"),
        }
    }

    fn switch_to_project(&self, id: u64) {
        if self.state.borrow().projects.is_empty() {
            self.state.borrow_mut().pending_target = Some(id);
            return;
        }
        let (project, closed_drawer) = {
            let mut state = self.state.borrow_mut();
            let Some(index) = state.projects.iter().position(|p| p.id == id) else {
                log::debug!("switch to unknown project {id} ignored");
                return;
            };
            if state.selected == Some(index) {
                return;
            }
            state.selected = Some(index);
            let closed_drawer = state.drawer == DrawerState::Open;
            if closed_drawer {
                state.drawer = DrawerState::Closed;
                state.awaiting_drawer_ack += 1;
            }
            (state.projects[index].clone(), closed_drawer)
        };
        self.outputs.project.emit(project.clone());
        self.emit_title_data();
        if closed_drawer {
            self.outputs.animate_out_projects_drawer.emit(());
        }
        self.env.tracking.track(
            event::CTA_CLICKED,
            vec![("context_cta".to_string(), "switch_project".to_string())],
        );
        self.fetch_stats(project.id);
    }

    fn show_hide_projects_drawer(&self) {
        let rows = {
            let mut state = self.state.borrow_mut();
            match state.drawer {
                DrawerState::Closed => {
                    state.drawer = DrawerState::Open;
                    let selected = state.selected;
                    Some(
                        state
                            .projects
                            .iter()
                            .enumerate()
                            .map(|(index, project)| ProjectsDrawerRow {
                                project: project.clone(),
                                index,
                                is_checked: selected == Some(index),
                            })
                            .collect::<Vec<_>>(),
                    )
                }
                DrawerState::Open => {
                    state.drawer = DrawerState::Closed;
                    state.awaiting_drawer_ack += 1;
                    None
                }
            }
        };
        self.emit_title_data();
        match rows {
            Some(rows) => self.outputs.present_projects_drawer.emit(rows),
            None => self.outputs.animate_out_projects_drawer.emit(()),
        }
    }

    fn projects_drawer_did_animate_out(&self) {
        let acknowledged = {
            let mut state = self.state.borrow_mut();
            if state.awaiting_drawer_ack > 0 {
                state.awaiting_drawer_ack -= 1;
                true
            } else {
                false
            }
        };
        if acknowledged {
            self.outputs.dismiss_projects_drawer.emit(());
        }
    }

    fn emit_title_data(&self) {
        let data = {
            let state = self.state.borrow();
            DashboardTitleViewData {
                drawer_state: state.drawer,
                is_arrow_hidden: state.projects.len() == 1,
                current_project_index: state.selected.unwrap_or(0),
            }
        };
        self.outputs.update_title_view_data.emit_distinct(data);
    }
}
