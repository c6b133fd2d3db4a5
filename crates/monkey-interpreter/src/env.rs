//! Lexical environments for the Monkey interpreter.
//!
//! An [`Env`] is a handle to a shared scope. Cloning the handle shares the
//! scope, which is how closures keep their defining environment alive after
//! the call frame that created it has returned.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;

#[derive(Clone, Default)]
pub struct Env {
    inner: Rc<RefCell<Scope>>,
}

#[derive(Default)]
struct Scope {
    /// Bindings defined in this scope
    bindings: HashMap<String, Value>,
    /// Enclosing scope (None for the top level)
    parent: Option<Env>,
}

impl Env {
    /// A fresh top-level environment with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// A child scope of `parent`. Lookups that miss locally continue there.
    pub fn new_enclosed(parent: &Env) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Scope {
                bindings: HashMap::new(),
                parent: Some(parent.clone()),
            })),
        }
    }

    /// Looks `name` up here, then in each enclosing scope.
    pub fn get(&self, name: &str) -> Option<Value> {
        let scope = self.inner.borrow();
        match scope.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => scope.parent.as_ref().and_then(|p| p.get(name)),
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.inner.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Local bindings sorted by name.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        let mut vars: Vec<(String, Value)> = self
            .inner
            .borrow()
            .bindings
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }

    /// True when both handles point at the same scope.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.inner.borrow();
        let mut names: Vec<&String> = scope.bindings.keys().collect();
        names.sort();
        f.debug_struct("Env")
            .field("bindings", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
