//! # Screen view-models
//!
//! One view-model per screen, each a pure state-transformation node
//! between the view layer's input calls and its output signals:
//!
//! - [`DashboardViewModel`] — a creator's project-performance dashboard:
//!   project list, selection, per-project stats, the slide-out project
//!   drawer, analytics.
//! - [`DiscoveryViewModel`] — the discovery feed's sort pager and filter
//!   state, gated on remote-config readiness.
//! - [`ProjectNotificationCellViewModel`] — one settings row's optimistic
//!   toggle with rollback on error.
//!
//! View-models never talk to each other; each is constructed with an
//! [`AppEnv`] and driven by its hosting view. All state lives on the
//! calling thread — inputs mutate a private state struct and push outputs
//! through signals, in that order, so observers always see a consistent
//! world.

pub mod dashboard;
pub mod discovery;
pub mod env;
pub mod notification_cell;

#[cfg(test)]
mod test_support;

pub use dashboard::*;
pub use discovery::*;
pub use env::*;
pub use notification_cell::*;
