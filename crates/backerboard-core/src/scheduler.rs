use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// Single-threaded virtual-time task queue.
///
/// Every asynchronous edge in the view-model layer (service-call delivery,
/// timed waits) is a task scheduled here. The clock only moves when the
/// host pumps it — `advance` runs everything already due, `advance_by`
/// moves the clock forward running tasks in due order — so a test can
/// fast-forward a three-second timeout without waiting three seconds.
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

struct SchedulerInner {
    now: Instant,
    next_seq: u64,
    queue: BinaryHeap<Task>,
}

struct Task {
    due: Instant,
    seq: u64,
    run: Box<dyn FnOnce()>,
}

// Min-heap on (due, seq): earlier due first, FIFO among equal due times.
impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}
impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}
impl Eq for Task {}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now: Instant::now(),
                next_seq: 0,
                queue: BinaryHeap::new(),
            })),
        }
    }

    pub fn now(&self) -> Instant {
        self.inner.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Enqueues `f` to run once the clock has moved `delay` past now.
    /// A zero delay means "the next tick", never synchronously.
    pub fn schedule(&self, delay: Duration, f: impl FnOnce() + 'static) {
        let mut inner = self.inner.borrow_mut();
        let due = inner.now + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.queue.push(Task {
            due,
            seq,
            run: Box::new(f),
        });
    }

    /// Runs every task already due, including tasks they schedule at a
    /// zero delay. The clock does not move.
    pub fn advance(&self) {
        self.drain_due_through(self.now());
    }

    /// Moves the clock forward by `duration`, running tasks in due order
    /// as it passes them.
    pub fn advance_by(&self, duration: Duration) {
        let target = self.now() + duration;
        self.drain_due_through(target);
        self.inner.borrow_mut().now = target;
    }

    fn drain_due_through(&self, target: Instant) {
        loop {
            let task = {
                let mut inner = self.inner.borrow_mut();
                let ready = inner.queue.peek().is_some_and(|t| t.due <= target);
                if !ready {
                    break;
                }
                let task = inner.queue.pop();
                if let Some(t) = &task
                    && t.due > inner.now
                {
                    inner.now = t.due;
                }
                task
            };
            // Borrow released: tasks are free to schedule more work.
            if let Some(task) = task {
                (task.run)();
            }
        }
    }
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
