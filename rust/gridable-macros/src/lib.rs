#![warn(missing_docs)]

//! Procedural macros for the gridable crates.
//!
//! Macros are re-exported through `gridable_common` for convenient access.
//! Procedural macros must be defined in their own crate, which is why these
//! live here rather than in the crates that use them.

use proc_macro::TokenStream;
mod test;

// disabling because we don't want to add crate dependencies just for this
#[cfg(not(doctest))]
/// A cross-platform test attribute.
///
/// Sync tests compile to `#[test]` natively, async tests to `#[tokio::test]`.
/// On `wasm32` targets both compile to `wasm_bindgen_test`.
///
/// ```rs
/// #[gridable_common::test]
/// fn it_works() {
///     assert_eq!(2 + 2, 4);
/// }
///
/// #[gridable_common::test]
/// async fn it_works_async() -> anyhow::Result<()> {
///     assert_eq!(2 + 2, 4);
///     Ok(())
/// }
/// ```
///
/// Test functions take no parameters; a function with parameters is
/// rejected at compile time.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    test::generate(attr, item)
}
