//! Derive macro implementation for automatic Fixture trait derivation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Expr, ExprLit, Field, Fields, GenericParam, Lit, Meta,
    MetaNameValue, Result, Variant, parse_macro_input, parse_quote,
};

/// Main entry point for the Fixture derive macro
pub fn derive_fixture_impl(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_fixture_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generate the Fixture implementation for the given input
fn generate_fixture_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    if input.generics.lifetimes().next().is_some() {
        return Err(Error::new_spanned(
            &input.generics,
            "Fixture types own their data; lifetime parameters are not supported",
        ));
    }

    let mut bounded = input.generics.clone();
    add_trait_bounds(&mut bounded);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    let (shape, body) = match &input.data {
        Data::Struct(data) => (
            quote! { unikit::Shape::Composite },
            struct_body(&data.fields)?,
        ),
        Data::Enum(data) => {
            let variants: Vec<_> = data.variants.iter().collect();
            (quote! { unikit::Shape::Enum }, enum_body(name, &variants)?)
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "Fixture derive is not supported for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics unikit::Fixture for #name #ty_generics #where_clause {
            fn shape() -> unikit::Shape {
                #shape
            }

            fn unique(
                _ctx: &unikit::GenContext,
            ) -> ::std::result::Result<Self, unikit::InitError> {
                #body
            }
        }
    })
}

/// Add the Fixture bound to every generic type parameter
fn add_trait_bounds(generics: &mut syn::Generics) {
    for param in &mut generics.params {
        if let GenericParam::Type(ref mut type_param) = *param {
            type_param.bounds.push(parse_quote!(unikit::Fixture));
        }
    }
}

/// Generate the construction body for a struct
fn struct_body(fields: &Fields) -> Result<TokenStream> {
    match fields {
        Fields::Named(named) => {
            let inits = named
                .named
                .iter()
                .map(|field| {
                    let ident = field.ident.as_ref().unwrap();
                    let value = field_value(field, Some(ident.to_string()))?;
                    Ok(quote! { #ident: #value })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(quote! {
                ::std::result::Result::Ok(Self {
                    #(#inits,)*
                })
            })
        }
        Fields::Unnamed(unnamed) => {
            let inits = unnamed
                .unnamed
                .iter()
                .enumerate()
                .map(|(index, field)| field_value(field, Some(index.to_string())))
                .collect::<Result<Vec<_>>>()?;

            Ok(quote! {
                ::std::result::Result::Ok(Self(
                    #(#inits,)*
                ))
            })
        }
        Fields::Unit => Ok(quote! { ::std::result::Result::Ok(Self) }),
    }
}

/// Generate the construction body for an enum: deterministically the first
/// declared variant, with its fields populated recursively
fn enum_body(name: &syn::Ident, variants: &[&Variant]) -> Result<TokenStream> {
    let first = variants
        .first()
        .ok_or_else(|| Error::new_spanned(name, "Cannot derive Fixture for an empty enum"))?;
    let variant_name = &first.ident;

    match &first.fields {
        Fields::Unit => Ok(quote! { ::std::result::Result::Ok(Self::#variant_name) }),
        Fields::Named(named) => {
            let inits = named
                .named
                .iter()
                .map(|field| {
                    let ident = field.ident.as_ref().unwrap();
                    let value = field_value(field, None)?;
                    Ok(quote! { #ident: #value })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(quote! {
                ::std::result::Result::Ok(Self::#variant_name {
                    #(#inits,)*
                })
            })
        }
        Fields::Unnamed(unnamed) => {
            let inits = unnamed
                .unnamed
                .iter()
                .map(|field| field_value(field, None))
                .collect::<Result<Vec<_>>>()?;

            Ok(quote! {
                ::std::result::Result::Ok(Self::#variant_name(
                    #(#inits,)*
                ))
            })
        }
    }
}

/// Expression producing one field's value.
///
/// Struct fields carry a runtime name and route through `GenContext::field`
/// so exclusion-by-name applies; enum variant fields descend directly.
fn field_value(field: &Field, runtime_name: Option<String>) -> Result<TokenStream> {
    let ty = &field.ty;
    let attrs = FixtureAttrs::parse(field)?;

    if attrs.skip {
        return Ok(quote! { <#ty as unikit::Fixture>::vacant()? });
    }
    if let Some(path) = attrs.with {
        return Ok(quote! { #path(_ctx)? });
    }

    match runtime_name {
        Some(name) => Ok(quote! { _ctx.field::<Self, #ty>(#name)? }),
        None => Ok(quote! { <#ty as unikit::Fixture>::unique(&_ctx.nested())? }),
    }
}

/// Parsed `#[fixture(...)]` field attributes
struct FixtureAttrs {
    skip: bool,
    with: Option<syn::Path>,
}

impl FixtureAttrs {
    fn parse(field: &Field) -> Result<Self> {
        let mut parsed = Self {
            skip: false,
            with: None,
        };

        for attr in &field.attrs {
            if !attr.path().is_ident("fixture") {
                continue;
            }

            let metas = attr.parse_args_with(
                syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
            )?;

            for meta in metas {
                match meta {
                    Meta::Path(ref path) if path.is_ident("skip") => {
                        parsed.skip = true;
                    }
                    Meta::NameValue(MetaNameValue {
                        ref path,
                        ref value,
                        ..
                    }) if path.is_ident("with") => {
                        if let Expr::Lit(ExprLit {
                            lit: Lit::Str(lit), ..
                        }) = value
                        {
                            parsed.with = Some(lit.parse()?);
                        } else {
                            return Err(Error::new_spanned(
                                value,
                                "with attribute must be a string literal naming a function",
                            ));
                        }
                    }
                    other => {
                        return Err(Error::new_spanned(other, "unsupported fixture attribute"));
                    }
                }
            }
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_fields(input: &DeriveInput) -> Vec<Field> {
        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named.named.iter().cloned().collect(),
                _ => panic!("expected named fields"),
            },
            _ => panic!("expected a struct"),
        }
    }

    #[test]
    fn test_add_trait_bounds() {
        let mut generics: syn::Generics = parse_quote! { <T, U> };
        add_trait_bounds(&mut generics);

        for param in &generics.params {
            if let GenericParam::Type(type_param) = param {
                assert_eq!(type_param.bounds.len(), 1);
            }
        }
    }

    #[test]
    fn test_unit_struct_body() {
        let body = struct_body(&Fields::Unit).unwrap();
        assert_eq!(
            body.to_string(),
            quote! { ::std::result::Result::Ok(Self) }.to_string()
        );
    }

    #[test]
    fn test_skip_attribute_is_parsed() {
        let input: DeriveInput = parse_quote! {
            struct Demo {
                #[fixture(skip)]
                cached: Option<i64>,
                id: i64,
            }
        };
        let fields = named_fields(&input);

        assert!(FixtureAttrs::parse(&fields[0]).unwrap().skip);
        assert!(!FixtureAttrs::parse(&fields[1]).unwrap().skip);
    }

    #[test]
    fn test_with_attribute_is_parsed() {
        let input: DeriveInput = parse_quote! {
            struct Demo {
                #[fixture(with = "checksum")]
                value: u32,
            }
        };
        let fields = named_fields(&input);

        let attrs = FixtureAttrs::parse(&fields[0]).unwrap();
        assert!(attrs.with.is_some());
        assert!(!attrs.skip);
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Demo {
                #[fixture(rainbow)]
                value: u32,
            }
        };
        let fields = named_fields(&input);

        assert!(FixtureAttrs::parse(&fields[0]).is_err());
    }

    #[test]
    fn test_lifetimes_are_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Borrowing<'a> {
                name: &'a str,
            }
        };

        assert!(generate_fixture_impl(&input).is_err());
    }
}
