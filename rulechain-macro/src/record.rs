use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Error, Fields, LitStr, Path, parse_macro_input};

pub fn record_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

/// Parsed per-field options
struct FieldOptions {
    rules: String,
    rename: Option<String>,
    skip: bool,
}

/// Parsed struct-level options
struct ContainerOptions {
    krate: Path,
    rename_all: Option<String>,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    name,
                    "#[derive(Record)] requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                name,
                "#[derive(Record)] can only be used on structs",
            ));
        }
    };

    let container = container_options(&input.attrs)?;
    let krate = &container.krate;

    let mut idents = Vec::new();
    let mut names = Vec::new();
    let mut keys = Vec::new();
    let mut rules = Vec::new();

    for field in fields {
        let options = field_options(&field.attrs)?;
        if options.skip {
            continue;
        }

        // Named fields always carry an ident
        let Some(ident) = &field.ident else { continue };
        let internal = ident.unraw().to_string();
        let external = match options.rename.or(serde_rename(&field.attrs)?) {
            Some(key) => key,
            None => apply_rename_all(&internal, container.rename_all.as_deref(), ident)?,
        };

        idents.push(ident.clone());
        names.push(internal);
        keys.push(external);
        rules.push(options.rules);
    }

    Ok(quote! {
        impl #impl_generics #krate::FieldAccess for #name #ty_generics #where_clause {
            fn field(&self, key: &str) -> ::core::option::Option<#krate::FieldValue> {
                match key {
                    #(
                        #names => ::core::option::Option::Some(
                            #krate::AsFieldValue::as_field_value(&self.#idents)
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics #krate::Record for #name #ty_generics #where_clause {
            fn field_specs(&self) -> ::std::vec::Vec<#krate::FieldSpec<'_>> {
                ::std::vec![
                    #( #krate::FieldSpec::new(#names, #keys, #rules), )*
                ]
            }
        }
    })
}

fn container_options(attrs: &[Attribute]) -> syn::Result<ContainerOptions> {
    let mut krate: Path = syn::parse_quote!(::rulechain_validation);
    let mut rename_all = None;

    for attr in attrs {
        if attr.path().is_ident("record") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    let lit: LitStr = meta.value()?.parse()?;
                    krate = lit.parse()?;
                    Ok(())
                } else {
                    Err(meta.error("unsupported record attribute, expected `crate`"))
                }
            })?;
        } else if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    rename_all = rename_value(&meta)?;
                    Ok(())
                } else {
                    skip_meta(&meta)
                }
            })?;
        }
    }

    Ok(ContainerOptions { krate, rename_all })
}

fn field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions {
        rules: String::new(),
        rename: None,
        skip: false,
    };

    for attr in attrs.iter().filter(|a| a.path().is_ident("validate")) {
        // Shorthand: #[validate("required|min:3")]
        if let Ok(lit) = attr.parse_args::<LitStr>() {
            options.rules = lit.value();
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rules") {
                let lit: LitStr = meta.value()?.parse()?;
                options.rules = lit.value();
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                options.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported validate attribute, expected `rules`, `rename` or `skip`"))
            }
        })?;
    }

    Ok(options)
}

/// `#[serde(rename = "..")]` or the serialize side of `rename(..)`.
fn serde_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                rename = rename_value(&meta)?;
                Ok(())
            } else {
                skip_meta(&meta)
            }
        })?;
    }

    Ok(rename)
}

/// Reads `key = ".."` or `key(serialize = "..", deserialize = "..")`.
fn rename_value(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        return Ok(Some(lit.value()));
    }

    let mut value = None;
    meta.parse_nested_meta(|inner| {
        let lit: LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("serialize") {
            value = Some(lit.value());
        }
        Ok(())
    })?;
    Ok(value)
}

/// Consume a serde option this macro does not care about.
fn skip_meta(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: TokenStream2 = content.parse()?;
    }
    Ok(())
}

fn apply_rename_all(name: &str, rule: Option<&str>, ident: &syn::Ident) -> syn::Result<String> {
    let Some(rule) = rule else {
        return Ok(name.to_string());
    };

    Ok(match rule {
        "lowercase" => name.to_lowercase(),
        "UPPERCASE" => name.to_uppercase(),
        "camelCase" => name.to_lower_camel_case(),
        "PascalCase" => name.to_upper_camel_case(),
        "snake_case" => name.to_snake_case(),
        "SCREAMING_SNAKE_CASE" => name.to_shouty_snake_case(),
        "kebab-case" => name.to_kebab_case(),
        "SCREAMING-KEBAB-CASE" => name.to_kebab_case().to_uppercase(),
        other => {
            return Err(Error::new_spanned(
                ident,
                format!("unsupported serde rename_all rule `{}`", other),
            ));
        }
    })
}
