//! Test helpers for code built on signals.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::Signal;

/// Records every value a signal emits, for assertions in tests.
///
/// Keeps its subscription alive for its own lifetime; values are cloned
/// out so asserts can run at any point in the scenario.
pub struct TestObserver<T: Clone + 'static> {
    values: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> TestObserver<T> {
    pub fn observing(signal: &Signal<T>) -> Self {
        let values: Rc<RefCell<Vec<T>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = values.clone();
        signal.subscribe(move |v| sink.borrow_mut().push(v.clone()));
        Self { values }
    }

    pub fn values(&self) -> Vec<T> {
        self.values.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn last(&self) -> Option<T> {
        self.values.borrow().last().cloned()
    }

    #[track_caller]
    pub fn assert_count(&self, expected: usize, message: &str) {
        assert_eq!(self.count(), expected, "{message}");
    }

    #[track_caller]
    pub fn assert_values(&self, expected: &[T], message: &str)
    where
        T: PartialEq + Debug,
    {
        assert_eq!(self.values.borrow().as_slice(), expected, "{message}");
    }

    #[track_caller]
    pub fn assert_did_not_emit(&self, message: &str) {
        assert_eq!(self.count(), 0, "{message}");
    }
}
