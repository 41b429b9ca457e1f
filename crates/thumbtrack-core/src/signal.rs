//! A small observable cell.
//!
//! Writers go through [`Signal::set`] or [`Signal::update`]; both compare the
//! new value with the old one and notify only on an actual change.
//! Subscribers run after the write has been committed, so they may read the
//! signal they are subscribed to.

use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    subs: RefCell<Vec<Option<Subscriber<T>>>>,
}

/// Cloneable handle; clones share the value and the subscriber list.
pub struct Signal<T: 'static>(Rc<Inner<T>>);

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(value),
            subs: RefCell::new(Vec::new()),
        }))
    }

    pub fn get(&self) -> T {
        self.0.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.0.value.borrow())
    }

    /// Stores `v`; returns whether it differed from the previous value.
    pub fn set(&self, v: T) -> bool {
        self.update(|slot| *slot = v)
    }

    /// Edits the value in place; returns whether anything changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let snapshot = {
            let mut value = self.0.value.borrow_mut();
            let before = value.clone();
            f(&mut *value);
            if *value == before {
                return false;
            }
            value.clone()
        };
        let subs: Vec<Subscriber<T>> = self.0.subs.borrow().iter().flatten().cloned().collect();
        for sub in subs {
            sub(&snapshot);
        }
        true
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut subs = self.0.subs.borrow_mut();
        subs.push(Some(Rc::new(f)));
        subs.len() - 1
    }

    pub fn unsubscribe(&self, id: SubId) {
        if let Some(slot) = self.0.subs.borrow_mut().get_mut(id) {
            *slot = None;
        }
    }
}

pub fn signal<T: Clone + PartialEq + 'static>(t: T) -> Signal<T> {
    Signal::new(t)
}
