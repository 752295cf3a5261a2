//! Container synthesis: sequences, sets, queues, maps, and arrays.
//!
//! Every container holds exactly `collection_size` generated elements (maps:
//! pairs), each produced through a child context, so element generation
//! participates in depth accounting. Exhausted depth terminates with the
//! container-shaped terminal value: an empty container.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::Hash;

use crate::context::GenContext;
use crate::error::InitError;
use crate::fixture::Fixture;
use crate::shape::{CollectionKind, Shape};

macro_rules! impl_sequence_fixture {
    ($($t:ident => $kind:ident;)*) => {
        $(
            impl<T: Fixture> Fixture for $t<T> {
                fn shape() -> Shape {
                    Shape::Collection(CollectionKind::$kind)
                }

                fn unique(ctx: &GenContext) -> Result<Self, InitError> {
                    if ctx.depth_exhausted() {
                        return Ok(<$t<T>>::new());
                    }
                    (0..ctx.collection_size())
                        .map(|_| T::unique(&ctx.nested()))
                        .collect()
                }

                fn vacant() -> Result<Self, InitError> {
                    Ok(<$t<T>>::new())
                }
            }
        )*
    };
}

impl_sequence_fixture! {
    Vec => List;
    VecDeque => Queue;
    LinkedList => Queue;
}

impl<T: Fixture + Eq + Hash> Fixture for HashSet<T> {
    fn shape() -> Shape {
        Shape::Collection(CollectionKind::Set)
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        if ctx.depth_exhausted() {
            return Ok(HashSet::new());
        }
        (0..ctx.collection_size())
            .map(|_| T::unique(&ctx.nested()))
            .collect()
    }

    fn vacant() -> Result<Self, InitError> {
        Ok(HashSet::new())
    }
}

impl<T: Fixture + Ord> Fixture for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::Collection(CollectionKind::Set)
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        if ctx.depth_exhausted() {
            return Ok(BTreeSet::new());
        }
        (0..ctx.collection_size())
            .map(|_| T::unique(&ctx.nested()))
            .collect()
    }

    fn vacant() -> Result<Self, InitError> {
        Ok(BTreeSet::new())
    }
}

/// Map generation inserts exactly `collection_size` pairs. Key collisions
/// overwrite silently, so the final size may come out below the requested
/// count (e.g. boolean keys saturate at two entries).
impl<K: Fixture + Eq + Hash, V: Fixture> Fixture for HashMap<K, V> {
    fn shape() -> Shape {
        Shape::Map
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        if ctx.depth_exhausted() {
            return Ok(HashMap::new());
        }
        let mut map = HashMap::with_capacity(ctx.collection_size());
        for _ in 0..ctx.collection_size() {
            let key = K::unique(&ctx.nested())?;
            let value = V::unique(&ctx.nested())?;
            map.insert(key, value);
        }
        Ok(map)
    }

    fn vacant() -> Result<Self, InitError> {
        Ok(HashMap::new())
    }
}

/// Same collision semantics as the hash map path.
impl<K: Fixture + Ord, V: Fixture> Fixture for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        if ctx.depth_exhausted() {
            return Ok(BTreeMap::new());
        }
        let mut map = BTreeMap::new();
        for _ in 0..ctx.collection_size() {
            let key = K::unique(&ctx.nested())?;
            let value = V::unique(&ctx.nested())?;
            map.insert(key, value);
        }
        Ok(map)
    }

    fn vacant() -> Result<Self, InitError> {
        Ok(BTreeMap::new())
    }
}

/// Arrays take their size from the type, not the context; every slot is
/// filled through a child context.
impl<T: Fixture, const N: usize> Fixture for [T; N] {
    fn shape() -> Shape {
        Shape::Array
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::unique(&ctx.nested())?);
        }
        items
            .try_into()
            .map_err(|_| InitError::internal("array length mismatch"))
    }
}
