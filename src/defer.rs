//! Single-shot deferred tasks on the host UI turn.
//!
//! A hook may need to run after the host's own grid finishes mounting; it
//! queues a task here and the host drains the queue at the top of its next
//! turn. A task can be guarded by an element: if the element is gone or no
//! longer attached by the time the queue drains, the task is dropped instead
//! of run.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::element::{ElementRef, WeakElement};

struct Deferred {
    guard: Option<WeakElement>,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
pub struct DeferQueue {
    pending: RefCell<VecDeque<Deferred>>,
}

impl DeferQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.pending.borrow_mut().push_back(Deferred {
            guard: None,
            task: Box::new(task),
        });
    }

    /// Queue `task` to run next turn unless `guard` has been detached from
    /// the document in the interim.
    pub fn defer_guarded(&self, guard: &ElementRef, task: impl FnOnce() + 'static) {
        self.pending.borrow_mut().push_back(Deferred {
            guard: Some(std::rc::Rc::downgrade(guard)),
            task: Box::new(task),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Run every task queued before this call; tasks queued while draining
    /// wait for the next turn. Returns how many tasks actually ran.
    pub fn drain(&self) -> usize {
        let batch = std::mem::take(&mut *self.pending.borrow_mut());
        let mut ran = 0;
        for deferred in batch {
            if let Some(guard) = &deferred.guard {
                let alive = guard.upgrade().is_some_and(|el| el.is_attached());
                if !alive {
                    tracing::debug!("skipping deferred task; guard element detached");
                    continue;
                }
            }
            (deferred.task)();
            ran += 1;
        }
        ran
    }
}
