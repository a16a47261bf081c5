//! Literal-or-computed requirement fields.

use std::fmt;
use std::rc::Rc;

/// A requirement field that is either a fixed value or produced on demand.
///
/// Computed values are re-evaluated on every [`resolve`](Self::resolve), so
/// each `check()` observes the environment as it is at that moment.
pub enum Resolvable<T> {
    /// A fixed value.
    Literal(T),
    /// A zero-argument producer.
    Computed(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Resolvable<T> {
    /// Wrap a fixed value.
    pub fn literal(value: T) -> Self {
        Resolvable::Literal(value)
    }

    /// Wrap a producer function.
    pub fn computed(producer: impl Fn() -> T + 'static) -> Self {
        Resolvable::Computed(Rc::new(producer))
    }

    /// Produce the current value.
    pub fn resolve(&self) -> T {
        match self {
            Resolvable::Literal(value) => value.clone(),
            Resolvable::Computed(producer) => producer(),
        }
    }

    /// Whether the value comes from a producer.
    pub fn is_computed(&self) -> bool {
        matches!(self, Resolvable::Computed(_))
    }
}

impl<T: Clone> Clone for Resolvable<T> {
    fn clone(&self) -> Self {
        match self {
            Resolvable::Literal(value) => Resolvable::Literal(value.clone()),
            Resolvable::Computed(producer) => Resolvable::Computed(Rc::clone(producer)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolvable::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Resolvable::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T> From<T> for Resolvable<T> {
    fn from(value: T) -> Self {
        Resolvable::Literal(value)
    }
}

impl From<&str> for Resolvable<Option<String>> {
    fn from(value: &str) -> Self {
        Resolvable::Literal(Some(value.to_string()))
    }
}

impl From<String> for Resolvable<Option<String>> {
    fn from(value: String) -> Self {
        Resolvable::Literal(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn literal_resolves_to_value() {
        let value = Resolvable::literal(true);
        assert!(value.resolve());
        assert!(!value.is_computed());
    }

    #[test]
    fn computed_runs_producer_each_time() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let value = Resolvable::computed(move || {
            counter.set(counter.get() + 1);
            counter.get()
        });

        assert_eq!(value.resolve(), 1);
        assert_eq!(value.resolve(), 2);
        assert_eq!(calls.get(), 2);
        assert!(value.is_computed());
    }

    #[test]
    fn clone_shares_producer() {
        let value = Resolvable::computed(|| Some("1.2".to_string()));
        let copy = value.clone();
        assert_eq!(copy.resolve(), Some("1.2".to_string()));
    }

    #[test]
    fn str_converts_to_present_version() {
        let value: Resolvable<Option<String>> = "2.0".into();
        assert_eq!(value.resolve(), Some("2.0".to_string()));
    }

    #[test]
    fn debug_hides_producer() {
        let value: Resolvable<bool> = Resolvable::computed(|| true);
        assert_eq!(format!("{:?}", value), "Computed(..)");
        assert_eq!(format!("{:?}", Resolvable::literal(false)), "Literal(false)");
    }
}
