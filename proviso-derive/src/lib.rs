//! Derive macros for the Proviso property testing library
//!
//! This crate provides `#[derive(Arbitrary)]`, `#[derive(Shrink)]` and
//! `#[derive(ValueHash)]`. Use them through the `proviso` crate, which
//! re-exports them with its default `derive` feature.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro implementing `proviso::Arbitrary`
///
/// Structs draw their fields left to right. Enums first pick a variant
/// uniformly, then draw that variant's fields. Fields are drawn at half the
/// current size, so recursive types like `struct Tree { kids: Vec<Tree> }`
/// stay finite.
///
/// ```rust,ignore
/// use proviso::{Arbitrary, GenContext};
///
/// #[derive(Debug, Clone, Arbitrary)]
/// struct Account {
///     id: u32,
///     #[arbitrary(with = small_balance)]
///     balance: i64,
///     frozen: bool,
/// }
///
/// fn small_balance(ctx: &mut GenContext) -> i64 {
///     i64::arbitrary(ctx) % 100
/// }
/// ```
///
/// # Supported Attributes
///
/// - `#[arbitrary(with = path)]`: draw the field with `path(ctx)`, where
///   `path` is a `fn(&mut GenContext) -> T`.
#[proc_macro_derive(Arbitrary, attributes(arbitrary))]
pub fn derive_arbitrary(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::arbitrary_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro implementing `proviso::Shrink`
///
/// Candidates replace one field at a time with each of that field's own
/// candidates, fields left to right. Enum values stay in their variant.
/// Every field must implement `Shrink` and `Clone`.
#[proc_macro_derive(Shrink)]
pub fn derive_shrink(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::shrink_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro implementing `proviso::ValueHash`, so the type can be an
/// argument of a `proviso::Fun`.
#[proc_macro_derive(ValueHash)]
pub fn derive_value_hash(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::value_hash_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
