//! Derive implementations for `Arbitrary`, `Shrink` and `ValueHash`.
//!
//! All three derives see a type as a list of variants (a struct is a single
//! variant whose path is `Self`) and generate one `match` arm per variant.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Error, Field, Fields, GenericParam, Generics, Path, Result,
    TypeParamBound, parse_quote,
};

/// One constructor of the deriving type
struct Shape<'a> {
    path: TokenStream,
    fields: &'a Fields,
}

fn shapes<'a>(input: &'a DeriveInput, derive: &str) -> Result<Vec<Shape<'a>>> {
    match &input.data {
        Data::Struct(data) => Ok(vec![Shape {
            path: quote!(Self),
            fields: &data.fields,
        }]),
        Data::Enum(data) => {
            if data.variants.is_empty() {
                return Err(Error::new_spanned(
                    &input.ident,
                    format!("cannot derive {} for an empty enum", derive),
                ));
            }
            Ok(data
                .variants
                .iter()
                .map(|variant| {
                    let ident = &variant.ident;
                    Shape {
                        path: quote!(Self::#ident),
                        fields: &variant.fields,
                    }
                })
                .collect())
        }
        Data::Union(_) => Err(Error::new_spanned(
            input,
            format!("{} derive is not supported for unions", derive),
        )),
    }
}

/// Add `bounds` to every type parameter
fn add_trait_bounds(generics: &Generics, bounds: &[TypeParamBound]) -> Generics {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.extend(bounds.iter().cloned());
        }
    }
    generics
}

/// Pattern binding field `i` to `__field{i}`, plus the binding names
fn bind_fields(fields: &Fields) -> (TokenStream, Vec<Ident>) {
    let bindings: Vec<Ident> = (0..fields.len())
        .map(|i| format_ident!("__field{}", i))
        .collect();
    let pattern = construct(fields, bindings.iter().map(|b| quote!(#b)).collect());
    (pattern, bindings)
}

/// Field list for a constructor expression or pattern
fn construct(fields: &Fields, values: Vec<TokenStream>) -> TokenStream {
    match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote!({ #(#names: #values),* })
        }
        Fields::Unnamed(_) => quote!(( #(#values),* )),
        Fields::Unit => quote!(),
    }
}

/// Path from `#[arbitrary(with = path)]`, if present
fn field_generator(field: &Field) -> Result<Option<Path>> {
    let mut generator = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("arbitrary") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("with") {
                generator = Some(meta.value()?.parse::<Path>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported arbitrary attribute, expected `with = path`"))
            }
        })?;
    }
    Ok(generator)
}

pub fn arbitrary_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = add_trait_bounds(&input.generics, &[parse_quote!(::proviso::Arbitrary)]);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let bodies = shapes(input, "Arbitrary")?
        .into_iter()
        .map(|shape| {
            let values = shape
                .fields
                .iter()
                .map(|field| {
                    let ty = &field.ty;
                    Ok(match field_generator(field)? {
                        Some(path) => quote!(#path(ctx)),
                        None => quote!(<#ty as ::proviso::Arbitrary>::arbitrary(ctx)),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let path = shape.path;
            let fields = construct(shape.fields, values);
            Ok(quote!(#path #fields))
        })
        .collect::<Result<Vec<_>>>()?;

    let body = match &input.data {
        Data::Enum(_) => {
            let count = bodies.len();
            let arms = bodies.iter().enumerate().map(|(index, body)| quote!(#index => #body));
            quote! {
                match ::proviso::__private::Rng::gen_range(ctx.rng(), 0..#count) {
                    #(#arms,)*
                    _ => unreachable!("variant index out of range"),
                }
            }
        }
        _ => quote!(#(#bodies)*),
    };

    // Fields are drawn at half the size, so a type holding a `Vec` of
    // itself terminates.
    Ok(quote! {
        impl #impl_generics ::proviso::Arbitrary for #name #ty_generics #where_clause {
            fn arbitrary(ctx: &mut ::proviso::GenContext) -> Self {
                ctx.with_size(ctx.size() / 2, |ctx| #body)
            }
        }
    })
}

pub fn shrink_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = add_trait_bounds(
        &input.generics,
        &[parse_quote!(::proviso::Shrink), parse_quote!(::core::clone::Clone)],
    );
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let arms = shapes(input, "Shrink")?.into_iter().map(|shape| {
        let (pattern, bindings) = bind_fields(shape.fields);
        let path = &shape.path;
        // One field at a time, the others cloned as they are.
        let per_field = (0..bindings.len()).map(|i| {
            let current = &bindings[i];
            let values = bindings
                .iter()
                .enumerate()
                .map(|(j, binding)| {
                    if i == j {
                        quote!(__shrunk)
                    } else {
                        quote!(::core::clone::Clone::clone(#binding))
                    }
                })
                .collect();
            let rebuilt = construct(shape.fields, values);
            quote! {
                for __shrunk in ::proviso::Shrink::shrink(#current) {
                    __candidates.push(#path #rebuilt);
                }
            }
        });
        quote! {
            #path #pattern => {
                #(#per_field)*
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::proviso::Shrink for #name #ty_generics #where_clause {
            #[allow(unused_mut)]
            fn shrink(&self) -> ::std::vec::Vec<Self> {
                let mut __candidates = ::std::vec::Vec::new();
                match self {
                    #(#arms)*
                }
                __candidates
            }
        }
    })
}

pub fn value_hash_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = add_trait_bounds(&input.generics, &[parse_quote!(::proviso::ValueHash)]);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let arms = shapes(input, "ValueHash")?
        .into_iter()
        .enumerate()
        .map(|(index, shape)| {
            let (pattern, bindings) = bind_fields(shape.fields);
            let path = &shape.path;
            let index = index as u64;
            quote! {
                #[allow(unused_mut)]
                #path #pattern => {
                    let mut __acc: u64 = #index;
                    #(
                        __acc = ::proviso::hash::combine(
                            __acc,
                            ::proviso::ValueHash::value_hash(#bindings),
                        );
                    )*
                    __acc
                }
            }
        });

    Ok(quote! {
        impl #impl_generics ::proviso::ValueHash for #name #ty_generics #where_clause {
            fn value_hash(&self) -> u64 {
                match self {
                    #(#arms)*
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(
        derive: fn(&DeriveInput) -> Result<TokenStream>,
        input: DeriveInput,
    ) -> syn::ItemImpl {
        let tokens = derive(&input).unwrap();
        syn::parse2(tokens).unwrap()
    }

    fn trait_name(item: &syn::ItemImpl) -> String {
        let (_, path, _) = item.trait_.as_ref().unwrap();
        path.segments.last().unwrap().ident.to_string()
    }

    #[test]
    fn test_struct_arbitrary_uses_field_impls() {
        let input: DeriveInput = parse_quote! {
            struct Point { x: i32, y: i32 }
        };
        let item = expand(arbitrary_impl, input);
        assert_eq!(trait_name(&item), "Arbitrary");
        let text = quote!(#item).to_string();
        assert_eq!(text.matches("arbitrary (ctx)").count(), 2);
        assert!(!text.contains("gen_range"));
        assert!(text.contains("with_size (ctx . size () / 2"));
    }

    #[test]
    fn test_enum_arbitrary_picks_variant() {
        let input: DeriveInput = parse_quote! {
            enum Shape { Dot, Line(u8), Rect { w: u8, h: u8 } }
        };
        let item = expand(arbitrary_impl, input);
        let text = quote!(#item).to_string();
        assert!(text.contains("gen_range"));
        assert!(text.contains("unreachable"));
    }

    #[test]
    fn test_with_attribute_overrides_generator() {
        let input: DeriveInput = parse_quote! {
            struct Small {
                #[arbitrary(with = small_u8)]
                value: u8,
            }
        };
        let item = expand(arbitrary_impl, input);
        let text = quote!(#item).to_string();
        assert!(text.contains("small_u8 (ctx)"));
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Bad {
                #[arbitrary(range = 3)]
                value: u8,
            }
        };
        assert!(arbitrary_impl(&input).is_err());
    }

    #[test]
    fn test_empty_enum_and_union_are_rejected() {
        let empty: DeriveInput = parse_quote! { enum Never {} };
        assert!(arbitrary_impl(&empty).is_err());
        assert!(shrink_impl(&empty).is_err());

        let union: DeriveInput = parse_quote! { union Bits { a: u32, b: f32 } };
        assert!(value_hash_impl(&union).is_err());
    }

    #[test]
    fn test_shrink_rebuilds_one_field_at_a_time() {
        let input: DeriveInput = parse_quote! {
            struct Pair(i32, bool);
        };
        let item = expand(shrink_impl, input);
        assert_eq!(trait_name(&item), "Shrink");
        let text = quote!(#item).to_string();
        assert_eq!(text.matches("for __shrunk in").count(), 2);
        assert_eq!(text.matches("Clone :: clone").count(), 2);
    }

    #[test]
    fn test_unit_types_have_no_candidates() {
        let input: DeriveInput = parse_quote! { struct Marker; };
        let item = expand(shrink_impl, input);
        let text = quote!(#item).to_string();
        assert!(!text.contains("__shrunk"));
    }

    #[test]
    fn test_value_hash_mixes_variant_index() {
        let input: DeriveInput = parse_quote! {
            enum Key { A(u8), B(u8) }
        };
        let item = expand(value_hash_impl, input);
        assert_eq!(trait_name(&item), "ValueHash");
        let text = quote!(#item).to_string();
        assert!(text.contains("0u64"));
        assert!(text.contains("1u64"));
        assert_eq!(text.matches("combine").count(), 2);
    }

    #[test]
    fn test_generic_params_get_bounds() {
        let generics: Generics = parse_quote! { <T, U> };
        let bounded = add_trait_bounds(
            &generics,
            &[parse_quote!(::proviso::Shrink), parse_quote!(Clone)],
        );
        for param in &bounded.params {
            if let GenericParam::Type(type_param) = param {
                assert_eq!(type_param.bounds.len(), 2);
            }
        }
    }
}
