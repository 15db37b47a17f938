//! Environment and scope management for the Ember interpreter.
//!
//! An [`Environment`] is a cheap, clonable handle onto a shared [`Scope`].
//! Lookups walk outwards through enclosing scopes; bindings always go into
//! the innermost one. A closure keeps its defining scope alive by holding a
//! clone of the handle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::object::Object;

/// Variable environment: one scope plus an optional enclosing environment
#[derive(Clone, Default)]
pub struct Environment {
    inner: Rc<RefCell<Scope>>,
}

/// A single scope containing variable bindings
#[derive(Default)]
pub struct Scope {
    /// Variable name to value mapping
    variables: HashMap<String, Object>,
    outer: Option<Environment>,
}

impl Environment {
    /// Create a fresh top-level environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment whose lookups fall back to `outer`
    pub fn enclosed(outer: &Environment) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Scope {
                variables: HashMap::new(),
                outer: Some(outer.clone()),
            })),
        }
    }

    /// Look a name up here, then in each enclosing scope
    pub fn get(&self, name: &str) -> Option<Object> {
        let scope = self.inner.borrow();
        match scope.variables.get(name) {
            Some(value) => Some(value.clone()),
            None => scope.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Bind `name` in this scope only, returning the bound value
    pub fn set(&self, name: impl Into<String>, value: Object) -> Object {
        let name = name.into();
        trace!(name = %name, kind = value.type_name(), "binding");
        self.inner
            .borrow_mut()
            .variables
            .insert(name, value.clone());
        value
    }

    /// Bindings of this scope (not the enclosing ones), sorted by name
    pub fn local_bindings(&self) -> Vec<(String, Object)> {
        let mut bindings: Vec<(String, Object)> = self
            .inner
            .borrow()
            .variables
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }

    /// Number of enclosing scopes above this one
    pub fn depth(&self) -> usize {
        match &self.inner.borrow().outer {
            Some(outer) => outer.depth() + 1,
            None => 0,
        }
    }
}

// Closures bound in a scope point back at it, so Debug must not recurse into values.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.inner.borrow();
        let mut names: Vec<&String> = scope.variables.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("depth", &self.depth())
            .finish()
    }
}
