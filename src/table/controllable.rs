use std::fmt;
use std::rc::Rc;

pub type ChangeHandler<V> = Rc<dyn Fn(&V)>;

/// Argument to [`Controllable::set`]: a literal next value, or a function of
/// the previous effective value.
pub enum Update<V> {
    Value(V),
    With(Box<dyn FnOnce(&V) -> V>),
}

impl<V> Update<V> {
    pub fn with(f: impl FnOnce(&V) -> V + 'static) -> Self {
        Update::With(Box::new(f))
    }

    fn apply(self, previous: &V) -> V {
        match self {
            Update::Value(value) => value,
            Update::With(f) => f(previous),
        }
    }
}

impl<V> From<V> for Update<V> {
    fn from(value: V) -> Self {
        Update::Value(value)
    }
}

/// One piece of table state that is either owned by the caller (controlled)
/// or held here (uncontrolled).
///
/// The mode is decided by whether `external` is `Some` at the moment a value
/// is read or written. A caller that flips a prop between `Some` and `None`
/// across renders gets inconsistent state; that is a contract violation and
/// is not corrected here.
pub struct Controllable<V> {
    external: Option<V>,
    internal: V,
    default: V,
    on_change: Option<ChangeHandler<V>>,
}

impl<V: Clone> Controllable<V> {
    pub fn new(default: V) -> Self {
        Self {
            external: None,
            internal: default.clone(),
            default,
            on_change: None,
        }
    }

    pub fn with_external(mut self, external: Option<V>) -> Self {
        self.external = external;
        self
    }

    pub fn with_on_change(mut self, on_change: Option<ChangeHandler<V>>) -> Self {
        self.on_change = on_change;
        self
    }

    /// Feeds the latest caller-supplied value and observer.
    pub fn sync(&mut self, external: Option<V>, on_change: Option<ChangeHandler<V>>) {
        self.external = external;
        self.on_change = on_change;
    }

    pub fn is_controlled(&self) -> bool {
        self.external.is_some()
    }

    pub fn get(&self) -> &V {
        self.external.as_ref().unwrap_or(&self.internal)
    }

    pub fn value(&self) -> V {
        self.get().clone()
    }

    /// Resolves `update` against the current effective value and returns
    /// the next value. In controlled mode only the observer learns about it.
    pub fn set(&mut self, update: impl Into<Update<V>>) -> V {
        let controlled = self.is_controlled();
        let next = update.into().apply(self.get());
        if !controlled {
            self.internal = next.clone();
        }
        if let Some(on_change) = &self.on_change {
            on_change(&next);
        }
        next
    }

    /// Swaps in a new default and internal value without notifying, for when
    /// the shape of the state changes rather than the user's choice.
    pub fn rebase(&mut self, default: V, internal: V) {
        self.default = default;
        self.internal = internal;
    }

    pub fn reset(&mut self) -> V {
        let default = self.default.clone();
        self.set(default)
    }
}

impl<V: fmt::Debug> fmt::Debug for Controllable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controllable")
            .field("external", &self.external)
            .field("internal", &self.internal)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}
