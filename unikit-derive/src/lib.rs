//! Derive macro for the unikit fixture library.
//!
//! Composite types opt into generation by deriving `Fixture`; the macro
//! writes the adapter that builds the value field by field through the
//! generation context.

use proc_macro::TokenStream;

mod derive;

/// Derive macro implementing the `Fixture` trait for composite types.
///
/// Structs (named, tuple, and unit) are built field by field; every field
/// descends into a child generation context, so exclusion by name and
/// nesting depth keep working for derived types. Enums deterministically
/// yield their first declared variant.
///
/// # Basic Usage
///
/// ```rust
/// use unikit::Fixture;
///
/// #[derive(Fixture)]
/// struct User {
///     id: i64,
///     name: String,
///     active: bool,
/// }
/// ```
///
/// # Supported Attributes
///
/// - `#[fixture(skip)]`: never populate this field; it keeps its vacant
///   value (the non-persistent marker)
/// - `#[fixture(with = "function_name")]`: populate the field through a
///   custom `fn(&GenContext) -> Result<T, InitError>`
///
/// ```rust
/// use unikit::Fixture;
///
/// fn checksum(_ctx: &unikit::GenContext) -> Result<u32, unikit::InitError> {
///     Ok(0xDEAD_BEEF)
/// }
///
/// #[derive(Fixture)]
/// struct Frame {
///     payload: Vec<u8>,
///     #[fixture(with = "checksum")]
///     checksum: u32,
///     #[fixture(skip)]
///     cached_len: Option<usize>,
/// }
/// ```
///
/// # Generic Types
///
/// Type parameters receive a `Fixture` bound automatically. Lifetime
/// parameters are rejected: fixtures own their data.
#[proc_macro_derive(Fixture, attributes(fixture))]
pub fn derive_fixture(input: TokenStream) -> TokenStream {
    derive::derive_fixture_impl(input)
}
