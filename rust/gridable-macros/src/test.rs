//! Test macro implementation.
//!
//! # Generated Code
//!
//! Given:
//! ```rs
//! #[gridable_common::test]
//! async fn it_works_async() {
//!     assert_eq!(2 + 2, 4);
//! }
//! ```
//!
//! Generates:
//! ```rs
//! #[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
//! #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
//! async fn it_works_async() {
//!     assert_eq!(2 + 2, 4);
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input, spanned::Spanned};

/// Implementation used by `gridable_common::test` macro.
pub fn generate(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "gridable_common::test does not take arguments",
        )
        .to_compile_error()
        .into();
    }

    if !input.sig.inputs.is_empty() {
        return syn::Error::new(
            input.sig.inputs.span(),
            "gridable_common::test functions must not take parameters",
        )
        .to_compile_error()
        .into();
    }

    generate_unit_test(&input)
}

fn generate_unit_test(source: &ItemFn) -> TokenStream {
    let vis = &source.vis;
    let name = &source.sig.ident;
    let asyncness = &source.sig.asyncness;
    let unsafety = &source.sig.unsafety;
    let generics = &source.sig.generics;
    let where_clause = &generics.where_clause;
    let output = &source.sig.output;
    let body = &source.block;
    let user_attrs = &source.attrs;

    // Choose the right test attribute for native based on async vs sync
    let native_test_attr = if source.sig.asyncness.is_some() {
        quote! { tokio::test }
    } else {
        quote! { test }
    };

    let expanded = quote! {
        #[cfg_attr(not(target_arch = "wasm32"), #native_test_attr)]
        #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
        #(#user_attrs)*
        #vis #unsafety #asyncness fn #name #generics() #output #where_clause
            #body
    };

    TokenStream::from(expanded)
}
