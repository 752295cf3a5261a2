//! Assertion conditions over an owning object and a field accessor.
//!
//! Asserting on a field usually means extracting it first, which breaks the
//! assertion chain on the parent object. These builders wrap the extraction
//! in a reusable predicate instead:
//!
//! ```rust
//! use unikit::conditions::{non_null_in, not_empty};
//!
//! struct Account {
//!     name: String,
//!     closed_at: Option<i64>,
//! }
//!
//! let account = Account { name: "primary".into(), closed_at: None };
//!
//! assert!(not_empty(|a: &Account| &a.name).matches(&account));
//! assert!(!non_null_in(|a: &Account| a.closed_at.as_ref()).matches(&account));
//! ```

use num_traits::ToPrimitive;

/// A reusable predicate over an owning object
pub struct Condition<T: ?Sized> {
    predicate: Box<dyn Fn(&T) -> bool>,
}

impl<T: ?Sized> Condition<T> {
    /// Wrap a predicate closure
    pub fn new(predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the condition against a value
    pub fn matches(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

/// Expect the object to have the same field value as another object of the
/// same type
pub fn same_as<T, F, X>(expected: T, extract: X) -> Condition<T>
where
    T: 'static,
    F: PartialEq,
    X: Fn(&T) -> F + 'static,
{
    Condition::new(move |actual| extract(actual) == extract(&expected))
}

/// Expect the object's field to equal the provided value
pub fn equal_to<T, F, X>(expected: F, extract: X) -> Condition<T>
where
    F: PartialEq + 'static,
    X: Fn(&T) -> F + 'static,
{
    Condition::new(move |value| extract(value) == expected)
}

/// Expect the object's field to differ from the provided value
pub fn not_equal_to<T, F, X>(expected: F, extract: X) -> Condition<T>
where
    F: PartialEq + 'static,
    X: Fn(&T) -> F + 'static,
{
    Condition::new(move |value| extract(value) != expected)
}

/// Expect the object's optional field to be absent
pub fn null_in<T, F, X>(extract: X) -> Condition<T>
where
    X: Fn(&T) -> Option<&F> + 'static,
{
    Condition::new(move |value| extract(value).is_none())
}

/// Expect the object's optional field to be present
pub fn non_null_in<T, F, X>(extract: X) -> Condition<T>
where
    X: Fn(&T) -> Option<&F> + 'static,
{
    Condition::new(move |value| extract(value).is_some())
}

/// Expect the object's collection field to be empty
pub fn empty<T, C, X>(extract: X) -> Condition<T>
where
    C: 'static,
    for<'a> &'a C: IntoIterator,
    X: Fn(&T) -> &C + 'static,
{
    Condition::new(move |value| extract(value).into_iter().next().is_none())
}

/// Expect the object's map field to be empty
pub fn empty_map<T, C, X>(extract: X) -> Condition<T>
where
    C: 'static,
    for<'a> &'a C: IntoIterator,
    X: Fn(&T) -> &C + 'static,
{
    empty(extract)
}

/// Expect the object's collection field to have the given size
pub fn has_size<T, C, X>(size: usize, extract: X) -> Condition<T>
where
    C: 'static,
    for<'a> &'a C: IntoIterator,
    X: Fn(&T) -> &C + 'static,
{
    Condition::new(move |value| extract(value).into_iter().count() == size)
}

/// Expect the object's collection field to contain the given element
pub fn collection_containing<T, C, F, X>(expected: F, extract: X) -> Condition<T>
where
    C: 'static,
    F: PartialEq + 'static,
    for<'a> &'a C: IntoIterator<Item = &'a F>,
    X: Fn(&T) -> &C + 'static,
{
    Condition::new(move |value| {
        let mut items = extract(value).into_iter();
        items.any(|item| *item == expected)
    })
}

/// Expect the object's array or slice field to have the given length
pub fn array_size<T, F, X>(size: usize, extract: X) -> Condition<T>
where
    X: for<'a> Fn(&'a T) -> &'a [F] + 'static,
{
    Condition::new(move |value| extract(value).len() == size)
}

/// Expect the object's numeric field to be greater than zero (evaluated as
/// a double)
pub fn positive<T, N, X>(extract: X) -> Condition<T>
where
    N: ToPrimitive,
    X: Fn(&T) -> N + 'static,
{
    Condition::new(move |value| extract(value).to_f64().is_some_and(|number| number > 0.0))
}

/// Expect the object's text field to be non-empty
pub fn not_empty<T, X>(extract: X) -> Condition<T>
where
    X: for<'a> Fn(&'a T) -> &'a str + 'static,
{
    Condition::new(move |value| !extract(value).is_empty())
}
