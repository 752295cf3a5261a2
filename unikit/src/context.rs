//! Generation contexts: the fluent entry-point builder and the per-call
//! recursion context.

use std::any::TypeId;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::InitError;
use crate::fixture::Fixture;
use crate::mapping::MappingTable;
use crate::scalar::{Unique, global_unique};

const DEFAULT_COLLECTION_SIZE: usize = 1;
const DEFAULT_NESTING_DEPTH: i32 = 1;

/// Per-owner-type sets of field names skipped during population
pub type ExcludedFields = HashMap<TypeId, HashSet<String>>;

/// Immutable per-call context handed to [`Fixture`] implementations.
///
/// Carries the collection size, the remaining nesting depth, the mapping
/// table, the excluded-field sets, and the scalar source. Children for
/// recursive descent come from [`nested`](GenContext::nested), which copies
/// everything and decrements the depth.
#[derive(Clone)]
pub struct GenContext {
    collection_size: usize,
    nesting_depth: i32,
    mappings: Arc<MappingTable>,
    excluded: Arc<ExcludedFields>,
    scalars: Arc<Unique>,
}

impl GenContext {
    /// Number of elements generated per collection or map
    pub fn collection_size(&self) -> usize {
        self.collection_size
    }

    /// Remaining levels of composite descent
    pub fn nesting_depth(&self) -> i32 {
        self.nesting_depth
    }

    /// True once the depth has gone negative: absence-capable shapes must
    /// terminate instead of building further composites
    pub fn depth_exhausted(&self) -> bool {
        self.nesting_depth < 0
    }

    /// The scalar source feeding leaf values
    pub fn scalars(&self) -> &Unique {
        &self.scalars
    }

    /// Child context for descending into a field or element: same size,
    /// mappings and exclusions, depth minus one
    pub fn nested(&self) -> GenContext {
        GenContext {
            nesting_depth: self.nesting_depth - 1,
            ..self.clone()
        }
    }

    /// Check whether owner type `O` excludes the named field
    pub fn is_excluded<O: 'static>(&self, field: &str) -> bool {
        self.excluded
            .get(&TypeId::of::<O>())
            .is_some_and(|names| names.contains(field))
    }

    /// Populate one field of owner `O`: excluded fields take their vacant
    /// value, everything else descends into a child context
    pub fn field<O: 'static, F: Fixture>(&self, name: &str) -> Result<F, InitError> {
        if self.is_excluded::<O>(name) {
            F::vacant()
        } else {
            F::unique(&self.nested())
        }
    }

    /// Resolve an abstract slot through the mapping table
    pub fn resolve_mapping<A: Fixture>(&self) -> Result<A, InitError> {
        self.mappings.resolve::<A>(self)
    }
}

/// Fluent, reusable configuration for one generation target.
///
/// Returned by the `unique_*` entry points; configure it with the `with_*`
/// methods and materialize instances with [`generate`](InitContext::generate)
/// as many times as needed.
pub struct InitContext<T: Fixture> {
    collection_size: usize,
    nesting_depth: i32,
    mappings: MappingTable,
    excluded: ExcludedFields,
    scalars: Arc<Unique>,
    _target: PhantomData<fn() -> T>,
}

impl<T: Fixture> InitContext<T> {
    /// Create a context with the defaults: collection size 1, nesting depth
    /// 1, the seeded mapping table, and the process-wide scalar source
    pub fn new() -> Self {
        Self {
            collection_size: DEFAULT_COLLECTION_SIZE,
            nesting_depth: DEFAULT_NESTING_DEPTH,
            mappings: MappingTable::with_defaults(),
            excluded: HashMap::new(),
            scalars: global_unique(),
            _target: PhantomData,
        }
    }

    /// Set how many elements collections and maps receive
    pub fn with_collection_size(mut self, size: usize) -> Self {
        self.collection_size = size;
        self
    }

    /// Set how many levels of composite descent are allowed before
    /// generation terminates with absent values
    pub fn with_nesting_depth(mut self, depth: i32) -> Self {
        self.nesting_depth = depth;
        self
    }

    /// Exclude fields of owner type `O` by name; excluded fields keep their
    /// vacant value whatever their declared type
    pub fn with_excluded_fields_for<O: 'static>(mut self, fields: &[&str]) -> Self {
        let entry = self.excluded.entry(TypeId::of::<O>()).or_default();
        entry.extend(fields.iter().map(|name| (*name).to_string()));
        self
    }

    /// Merge a prebuilt exclusion table into this context
    pub fn with_excluded_fields(mut self, excluded: ExcludedFields) -> Self {
        for (owner, names) in excluded {
            self.excluded.entry(owner).or_default().extend(names);
        }
        self
    }

    /// Register concrete implementation `C` for abstract slot `A`; use the
    /// [`map_abstract!`](crate::map_abstract) macro, which writes the unsize
    /// step and keeps the key/value kinds honest at compile time.
    ///
    /// # Panics
    ///
    /// On invalid registration: a key that does not classify as abstract, or
    /// an implementation that does.
    pub fn with_mapping_entry<A: Fixture, C: Fixture>(mut self, convert: fn(C) -> A) -> Self {
        if let Err(error) = self.mappings.register::<A, C>(convert) {
            panic!("{error}");
        }
        self
    }

    /// Merge a prebuilt mapping table into this context
    pub fn with_mappings(mut self, mappings: MappingTable) -> Self {
        self.mappings.merge(mappings);
        self
    }

    /// Swap the scalar source, isolating counter state from the process-wide
    /// default
    pub fn with_scalar_source(mut self, scalars: Arc<Unique>) -> Self {
        self.scalars = scalars;
        self
    }

    /// Materialize one instance according to this configuration
    pub fn generate(&self) -> Result<T, InitError> {
        T::unique(&self.context())
    }

    fn context(&self) -> GenContext {
        GenContext {
            collection_size: self.collection_size,
            nesting_depth: self.nesting_depth,
            mappings: Arc::new(self.mappings.clone()),
            excluded: Arc::new(self.excluded.clone()),
            scalars: Arc::clone(&self.scalars),
        }
    }
}

impl<T: Fixture> Default for InitContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point: a configurable context for any generatable type
pub fn unique_object<T: Fixture>() -> InitContext<T> {
    InitContext::new()
}

/// Entry point: a configurable context for a list of `T`
pub fn unique_list<T: Fixture>() -> InitContext<Vec<T>> {
    InitContext::new()
}

/// Entry point: a configurable context for a set of `T`
pub fn unique_set<T: Fixture + Eq + Hash>() -> InitContext<HashSet<T>> {
    InitContext::new()
}

/// Entry point: a configurable context for a queue of `T`
pub fn unique_queue<T: Fixture>() -> InitContext<VecDeque<T>> {
    InitContext::new()
}

/// Entry point: a configurable context for a map of `K` to `V`
pub fn unique_map<K: Fixture + Eq + Hash, V: Fixture>() -> InitContext<HashMap<K, V>> {
    InitContext::new()
}
