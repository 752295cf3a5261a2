//! Registry resolving abstract slot types to concrete implementations.
//!
//! Rust has no runtime notion of "instantiate this interface", so abstract
//! slots are boxed trait objects. [`abstract_fixture!`] wires a trait object
//! into generation, and [`map_abstract!`] registers the concrete type to
//! build for it. Both kinds of registration mistakes — a non-abstract key or
//! an abstract implementation — are rejected eagerly, before any generation
//! runs; the macros additionally make them unrepresentable at compile time.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::context::GenContext;
use crate::error::InitError;
use crate::fixture::Fixture;
use crate::shape::Shape;

type AbstractBuilder = Arc<dyn Fn(&GenContext) -> Result<Box<dyn Any>, InitError> + Send + Sync>;

#[derive(Clone)]
struct MappingEntry {
    implementation: &'static str,
    build: AbstractBuilder,
}

/// Typed registry keyed by abstract-slot identity.
///
/// Lookups happen during generation; a missing entry is a hard
/// [`InitError::UnresolvedMapping`].
#[derive(Clone, Default)]
pub struct MappingTable {
    entries: HashMap<TypeId, MappingEntry>,
}

impl MappingTable {
    /// Create an empty mapping table
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Table pre-seeded with the default mappings: a `Box<dyn Display>`
    /// slot (the text-sequence abstraction) resolves to a unique string
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        // infallible: the key is abstract and the value concrete
        let _ = table.register::<Box<dyn fmt::Display>, String>(|value| Box::new(value));
        table
    }

    /// Register concrete implementation `C` for abstract slot `A`.
    ///
    /// `convert` is the unsize step (`|value| Box::new(value) as A`), which
    /// the [`map_abstract!`] macro writes for you. Rejected eagerly when `A`
    /// does not classify as abstract or `C` does.
    pub fn register<A, C>(&mut self, convert: fn(C) -> A) -> Result<(), InitError>
    where
        A: Fixture,
        C: Fixture,
    {
        if A::shape() != Shape::Abstract {
            return Err(InitError::invalid_mapping(format!(
                "provided key is not an abstract type: {}",
                type_name::<A>()
            )));
        }
        if C::shape() == Shape::Abstract {
            return Err(InitError::invalid_mapping(format!(
                "cannot use an abstract type as implementation: {}",
                type_name::<C>()
            )));
        }

        let build: AbstractBuilder = Arc::new(move |ctx| {
            let value = C::unique(ctx)?;
            Ok(Box::new(convert(value)) as Box<dyn Any>)
        });
        self.entries.insert(
            TypeId::of::<A>(),
            MappingEntry {
                implementation: type_name::<C>(),
                build,
            },
        );
        Ok(())
    }

    /// Resolve abstract slot `A`, generating the mapped implementation
    /// through the *same* context (resolution is re-classification, not a
    /// descent, so depth is untouched)
    pub fn resolve<A: Fixture>(&self, ctx: &GenContext) -> Result<A, InitError> {
        let entry = self
            .entries
            .get(&TypeId::of::<A>())
            .ok_or_else(InitError::unresolved_mapping::<A>)?;
        let boxed = (entry.build)(ctx)?;
        boxed.downcast::<A>().map(|value| *value).map_err(|_| {
            InitError::internal(format!(
                "mapping for {} produced a value of the wrong type ({})",
                type_name::<A>(),
                entry.implementation
            ))
        })
    }

    /// Name of the implementation registered for slot `A`, if any
    pub fn implementation_for<A: 'static>(&self) -> Option<&'static str> {
        self.entries
            .get(&TypeId::of::<A>())
            .map(|entry| entry.implementation)
    }

    /// Check whether a mapping is registered for slot `A`
    pub fn contains<A: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<A>())
    }

    /// Number of registered mappings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another table into this one; its entries win on overlap
    pub fn merge(&mut self, other: MappingTable) {
        self.entries.extend(other.entries);
    }
}

/// Implements [`Fixture`] for a boxed trait object so it can take part in
/// generation as an abstract slot.
///
/// ```rust
/// trait Repository {
///     fn label(&self) -> String;
/// }
///
/// unikit::abstract_fixture!(dyn Repository);
/// ```
#[macro_export]
macro_rules! abstract_fixture {
    (dyn $trait_:path) => {
        impl $crate::Fixture for ::std::boxed::Box<dyn $trait_> {
            fn shape() -> $crate::Shape {
                $crate::Shape::Abstract
            }

            fn unique(
                ctx: &$crate::GenContext,
            ) -> ::std::result::Result<Self, $crate::InitError> {
                ctx.resolve_mapping::<Self>()
            }
        }
    };
}

/// Registers a concrete implementation for an abstract slot on an
/// [`InitContext`](crate::InitContext), writing the unsize step so the key
/// is syntactically a trait object and the value a concrete type.
///
/// ```rust,ignore
/// let context = unikit::map_abstract!(
///     unikit::unique_object::<Warehouse>(),
///     dyn Repository => PgRepository
/// );
/// ```
#[macro_export]
macro_rules! map_abstract {
    ($context:expr, dyn $trait_:path => $impl:ty) => {
        $context.with_mapping_entry::<::std::boxed::Box<dyn $trait_>, $impl>(|value| {
            ::std::boxed::Box::new(value) as ::std::boxed::Box<dyn $trait_>
        })
    };
}

// Default abstract slot: the text-sequence abstraction resolves to String
// through the seeded table.
crate::abstract_fixture!(dyn fmt::Display);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::unique_object;

    trait Greeter {
        fn greet(&self) -> String;
    }

    #[derive(Debug)]
    struct LoudGreeter {
        name: String,
    }

    impl Greeter for LoudGreeter {
        fn greet(&self) -> String {
            format!("HELLO {}", self.name)
        }
    }

    impl Fixture for LoudGreeter {
        fn shape() -> Shape {
            Shape::Composite
        }

        fn unique(ctx: &GenContext) -> Result<Self, InitError> {
            Ok(Self {
                name: ctx.field::<Self, String>("name")?,
            })
        }
    }

    crate::abstract_fixture!(dyn Greeter);

    #[test]
    fn test_register_and_resolve_round_trip() {
        let context = crate::map_abstract!(
            unique_object::<Box<dyn Greeter>>(),
            dyn Greeter => LoudGreeter
        );
        let greeter = context.generate().unwrap();
        assert!(greeter.greet().starts_with("HELLO testValue"));
    }

    #[test]
    fn test_unresolved_mapping_is_an_error() {
        let result = unique_object::<Box<dyn Greeter>>().generate();
        match result {
            Err(InitError::UnresolvedMapping { abstract_type }) => {
                assert!(abstract_type.contains("Greeter"));
            }
            _ => panic!("expected an unresolved mapping error"),
        }
    }

    #[test]
    fn test_non_abstract_key_is_rejected() {
        let mut table = MappingTable::new();
        let result = table.register::<String, String>(|value| value);
        match result {
            Err(InitError::InvalidMapping { message }) => {
                assert!(message.contains("not an abstract type"));
            }
            other => panic!("expected an invalid mapping error, got {:?}", other),
        }
    }

    #[test]
    fn test_abstract_implementation_is_rejected() {
        let mut table = MappingTable::new();
        let result = table.register::<Box<dyn Greeter>, Box<dyn Greeter>>(|value| value);
        match result {
            Err(InitError::InvalidMapping { message }) => {
                assert!(message.contains("abstract type as implementation"));
            }
            other => panic!("expected an invalid mapping error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_map_display_to_string() {
        let table = MappingTable::with_defaults();
        assert!(table.contains::<Box<dyn fmt::Display>>());

        let rendered = unique_object::<Box<dyn fmt::Display>>()
            .generate()
            .unwrap()
            .to_string();
        assert!(rendered.starts_with("testValue"));
    }

    #[test]
    fn test_merge_adds_entries() {
        let mut base = MappingTable::with_defaults();
        let mut extra = MappingTable::new();
        extra
            .register::<Box<dyn Greeter>, LoudGreeter>(|value| Box::new(value))
            .unwrap();

        assert_eq!(base.len(), 1);
        base.merge(extra);
        assert_eq!(base.len(), 2);
        assert!(base.contains::<Box<dyn Greeter>>());
        assert!(
            base.implementation_for::<Box<dyn Greeter>>()
                .is_some_and(|name| name.contains("LoudGreeter"))
        );
    }
}
