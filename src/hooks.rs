//! Runtime behavior overrides for the host's layout classes.
//!
//! The host object model exposes each hookable method as a [`Hook`] slot on a
//! shared class object, so wrapping a hook affects every instance of that
//! class, the way prototype patching would. Wrapping composes: the
//! last-installed layer runs outermost, receives the previous layer as
//! `original`, and decides whether and how to forward. Registration order is
//! therefore significant. There is no unwrap; the host process lifetime
//! bounds every registration.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("no hookable method `{method}` on {class}")]
    MissingTarget {
        class: &'static str,
        method: &'static str,
    },
    #[error("method `{method}` on {class} was declared with a different signature")]
    SignatureMismatch {
        class: &'static str,
        method: &'static str,
    },
}

/// The previous implementation layer, bound to the same receiver and
/// argument pack as the live invocation.
pub type OriginalFn<T, A, R> = dyn Fn(&T, &mut A) -> R;

/// A replaceable method slot. Dispatch goes through the current chain head;
/// receivers use interior mutability so re-entrant host call chains never
/// conflict with an outstanding borrow.
pub struct Hook<T, A, R> {
    class: &'static str,
    method: &'static str,
    imp: RefCell<Rc<OriginalFn<T, A, R>>>,
    layers: Cell<usize>,
}

impl<T: 'static, A: 'static, R: 'static> Hook<T, A, R> {
    fn new(
        class: &'static str,
        method: &'static str,
        original: impl Fn(&T, &mut A) -> R + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            class,
            method,
            imp: RefCell::new(Rc::new(original)),
            layers: Cell::new(0),
        })
    }

    /// Invoke the current chain. Arguments are passed by mutable reference so
    /// an override may adjust them before forwarding.
    pub fn call(&self, recv: &T, args: &mut A) -> R {
        let imp = Rc::clone(&*self.imp.borrow());
        imp(recv, args)
    }

    /// Compose `policy` over the current implementation. The policy receives
    /// `(receiver, original, args)` and must return the method's result,
    /// whether or not it forwards.
    pub fn wrap<P>(&self, policy: P)
    where
        P: Fn(&T, &OriginalFn<T, A, R>, &mut A) -> R + 'static,
    {
        let prev = Rc::clone(&*self.imp.borrow());
        *self.imp.borrow_mut() = Rc::new(move |recv, args| policy(recv, prev.as_ref(), args));
        self.layers.set(self.layers.get() + 1);
        tracing::debug!(
            class = self.class,
            method = self.method,
            layers = self.layers.get(),
            "wrapped method"
        );
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Number of override layers installed over the true original.
    pub fn layers(&self) -> usize {
        self.layers.get()
    }
}

trait AnyHook {
    fn as_any(&self) -> &dyn Any;
    fn layers(&self) -> usize;
}

impl<T: 'static, A: 'static, R: 'static> AnyHook for Hook<T, A, R> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn layers(&self) -> usize {
        self.layers.get()
    }
}

/// Per-class registry of hookable methods. Classes declare their methods at
/// construction time; overrides look them up by name and fail fast when the
/// target is absent, since a silently missing hook would mean the
/// customization silently stops applying.
pub struct HookTable {
    class: &'static str,
    methods: BTreeMap<&'static str, Rc<dyn AnyHook>>,
}

impl HookTable {
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            methods: BTreeMap::new(),
        }
    }

    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Declare a hookable method with its original implementation. Used by
    /// the host class constructors; returns the typed handle the class keeps
    /// for dispatch.
    pub fn declare<T: 'static, A: 'static, R: 'static>(
        &mut self,
        method: &'static str,
        original: impl Fn(&T, &mut A) -> R + 'static,
    ) -> Rc<Hook<T, A, R>> {
        let hook = Hook::new(self.class, method, original);
        self.methods.insert(method, Rc::clone(&hook) as Rc<dyn AnyHook>);
        hook
    }

    /// Wrap `method` with `policy`. Errors when the method was never declared
    /// or when the caller's receiver/argument/result types do not match the
    /// declaration.
    pub fn wrap<T, A, R, P>(&self, method: &'static str, policy: P) -> Result<(), HookError>
    where
        T: 'static,
        A: 'static,
        R: 'static,
        P: Fn(&T, &OriginalFn<T, A, R>, &mut A) -> R + 'static,
    {
        let slot = self.methods.get(method).ok_or(HookError::MissingTarget {
            class: self.class,
            method,
        })?;
        let hook = slot
            .as_any()
            .downcast_ref::<Hook<T, A, R>>()
            .ok_or(HookError::SignatureMismatch {
                class: self.class,
                method,
            })?;
        hook.wrap(policy);
        Ok(())
    }

    /// Override layer count for `method`, if declared.
    pub fn layers(&self, method: &str) -> Option<usize> {
        self.methods.get(method).map(|hook| hook.layers())
    }
}

/// Scoped substitution of a class-level constant. Restores the previous value
/// on every exit path, including unwinding out of the wrapped call.
pub struct ScopedSwap<'a, T: Copy> {
    cell: &'a Cell<T>,
    prev: T,
}

impl<'a, T: Copy> ScopedSwap<'a, T> {
    pub fn install(cell: &'a Cell<T>, value: T) -> Self {
        let prev = cell.replace(value);
        Self { cell, prev }
    }
}

impl<T: Copy> Drop for ScopedSwap<'_, T> {
    fn drop(&mut self) {
        self.cell.set(self.prev);
    }
}
