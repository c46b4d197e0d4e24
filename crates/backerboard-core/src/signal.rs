use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct SubKey;
}

/// Push-based output stream. Cloning shares the underlying stream.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    last: Option<T>,
    subs: SlotMap<SubKey, Box<dyn Fn(&T)>>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Inner {
            last: None,
            subs: SlotMap::with_key(),
        })))
    }

    /// Emits `value` to every subscriber and remembers it as the latest.
    pub fn emit(&self, value: T) {
        let mut inner = self.0.borrow_mut();
        let Inner { last, subs } = &mut *inner;
        let v = last.insert(value);
        for (_, f) in subs.iter() {
            f(v);
        }
    }

    /// Emits only when `value` differs from the last emitted value.
    pub fn emit_distinct(&self, value: T)
    where
        T: PartialEq,
    {
        if self.0.borrow().last.as_ref() == Some(&value) {
            return;
        }
        self.emit(value);
    }

    /// The most recently emitted value, if any.
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        self.0.borrow().last.clone()
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubKey {
        self.0.borrow_mut().subs.insert(Box::new(f))
    }

    pub fn unsubscribe(&self, key: SubKey) {
        self.0.borrow_mut().subs.remove(key);
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}
