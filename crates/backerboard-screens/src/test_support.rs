//! Shared environment scaffolding for the screen test suites.

use std::rc::Rc;

use backerboard_api::testing::MockService;
use backerboard_core::Scheduler;

use crate::env::{AppEnv, MemoryStore, MemoryTracker};

pub struct TestEnv {
    pub api: Rc<MockService>,
    pub tracking: Rc<MemoryTracker>,
    pub cache: Rc<MemoryStore>,
    pub scheduler: Scheduler,
    pub env: AppEnv,
}

/// An environment with a mock service, in-memory cache and tracker, and a
/// zero api delay, so results land on the very next scheduler tick.
pub fn test_env(api: MockService) -> TestEnv {
    let _ = env_logger::builder().is_test(true).try_init();
    let api = Rc::new(api);
    let tracking = Rc::new(MemoryTracker::default());
    let cache = Rc::new(MemoryStore::default());
    let scheduler = Scheduler::new();
    let env = AppEnv {
        cache: cache.clone(),
        tracking: tracking.clone(),
        scheduler: scheduler.clone(),
        ..AppEnv::new(api.clone())
    };
    TestEnv {
        api,
        tracking,
        cache,
        scheduler,
        env,
    }
}
