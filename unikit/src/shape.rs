//! Closed classification of generatable type shapes.
//!
//! The engine never inspects types at runtime; every [`Fixture`]
//! implementation reports one of these tags and the classification priority
//! is realized structurally: scalar impls ignore recursion depth,
//! absence-capable shapes (options, containers) carry the depth terminator,
//! abstract slots resolve through the mapping table, and composites descend
//! field by field.
//!
//! [`Fixture`]: crate::Fixture

use crate::scalar::ScalarKind;

/// Shape tag reported by a [`Fixture`](crate::Fixture) implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Leaf value produced directly by the scalar source
    Scalar(ScalarKind),
    /// Enumerated type: generation yields the first declared variant
    Enum,
    /// Fixed-size array filled slot by slot
    Array,
    /// Sequence or set filled with `collection_size` elements
    Collection(CollectionKind),
    /// Key/value map filled with `collection_size` pairs
    Map,
    /// Abstract slot resolved through the mapping table
    Abstract,
    /// The universal top type, falling back to a scalar
    Any,
    /// User-defined object graph populated field by field
    Composite,
}

/// Distinguishes the collection families the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Set,
    Queue,
}
