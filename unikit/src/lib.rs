//! # unikit — deterministic unique test fixtures
//!
//! Random test data removes magic numbers but makes runs irreproducible.
//! unikit takes the other trade: every generated value is derived from one
//! process-wide monotonic counter, so values are unique across a test run
//! yet fully deterministic, and nested object graphs come back completely
//! populated without hand-written builders.
//!
//! ## Quick Start
//!
//! ```rust
//! use unikit::{Fixture, unique_object};
//!
//! #[derive(Fixture)]
//! struct Account {
//!     id: i64,
//!     owner: String,
//!     active: bool,
//! }
//!
//! let account = unique_object::<Account>().generate().unwrap();
//! assert!(account.id > 0);
//! assert!(account.owner.starts_with("testValue"));
//! ```
//!
//! Collections, maps, nesting depth, per-type field exclusion, and
//! abstract-slot mappings are configured on the context:
//!
//! ```rust
//! use unikit::unique_list;
//!
//! let ids = unique_list::<i64>().with_collection_size(3).generate().unwrap();
//! assert_eq!(ids.len(), 3);
//! ```

// Public modules
pub mod conditions;
pub mod containers;
pub mod context;
pub mod error;
pub mod fixture;
pub mod mapping;
pub mod scalar;
pub mod sequencer;
pub mod shape;

// Re-export the main public API
pub use context::{
    ExcludedFields, GenContext, InitContext, unique_list, unique_map, unique_object, unique_queue,
    unique_set,
};
pub use error::InitError;
pub use fixture::Fixture;
pub use mapping::MappingTable;
pub use scalar::{
    ScalarKind, ScalarValue, Unique, global_unique, unique_big_decimal, unique_big_integer,
    unique_boolean, unique_byte, unique_character, unique_date, unique_double, unique_float,
    unique_instant, unique_integer, unique_long, unique_millis, unique_scalar, unique_short,
    unique_string, unique_uuid,
};
pub use sequencer::{Sequencer, global_sequencer};
pub use shape::{CollectionKind, Shape};

// Re-export the derive macro from the companion crate when the derive
// feature is enabled
#[cfg(feature = "derive")]
pub use unikit_derive::Fixture;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_scalars_are_pairwise_distinct() {
        let longs: Vec<i64> = (0..20).map(|_| unique_long()).collect();
        let mut deduped = longs.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), longs.len());
    }

    #[test]
    fn test_public_api_integration() {
        let values = unique_list::<i64>()
            .with_collection_size(3)
            .generate()
            .unwrap();

        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|value| *value > 0));
    }

    #[test]
    fn test_scalar_kind_dispatch() {
        match unique_scalar(ScalarKind::Boolean) {
            ScalarValue::Boolean(_) => {}
            other => panic!("expected a boolean, got {:?}", other),
        }
    }

    #[test]
    fn test_uuid_does_not_repeat_across_calls() {
        let first = unique_uuid();
        let second = unique_uuid();
        assert_ne!(first, second);
    }
}
