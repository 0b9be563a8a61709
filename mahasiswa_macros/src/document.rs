use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr};

pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match named_fields(&input) {
        Some(fields) => fields,
        None => {
            return syn::Error::new_spanned(
                &input.ident,
                "Document derive: only structs with named fields are supported",
            )
            .to_compile_error()
            .into();
        }
    };

    // Extract #[document(collection = "...")] from struct-level attributes
    let collection = extract_collection(&input);

    // Extract the field marked with #[document(id)] or default to "id"
    let id_field = match extract_id_field(&fields) {
        Some(ident) => ident,
        None => {
            return syn::Error::new_spanned(
                &input.ident,
                "Document derive: no field marked with #[document(id)] and no field named `id`",
            )
            .to_compile_error()
            .into();
        }
    };

    let unique_fields = extract_unique_fields(&fields);
    let unique_names = unique_fields.iter().map(|ident| ident.to_string());

    let expanded = quote! {
        impl mahasiswa::Document for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }

            fn assign_id(&mut self, id: ::std::string::String) {
                self.#id_field = id;
            }

            fn unique_fields(&self) -> ::std::vec::Vec<(&'static str, ::std::string::String)> {
                ::std::vec![
                    #( (#unique_names, ::std::string::ToString::to_string(&self.#unique_fields)) ),*
                ]
            }
        }
    };

    TokenStream::from(expanded)
}

fn named_fields(input: &DeriveInput) -> Option<Vec<&Field>> {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => Some(fields.named.iter().collect()),
            _ => None,
        },
        _ => None,
    }
}

fn extract_collection(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("document") {
            continue;
        }

        let mut collection = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
            }
            Ok(())
        });

        if let Some(c) = collection {
            return c;
        }
    }

    // Default: snake_case struct name + "s"
    let name = input.ident.to_string();
    format!("{}s", to_snake_case(&name))
}

/// True when the field carries `#[document(<flag>)]`.
fn has_flag(field: &Field, flag: &str) -> bool {
    let mut found = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("document") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
            }
            Ok(())
        });
    }
    found
}

fn extract_id_field(fields: &[&Field]) -> Option<syn::Ident> {
    if let Some(field) = fields.iter().find(|f| has_flag(f, "id")) {
        return field.ident.clone();
    }

    // Default: look for a field named "id"
    fields
        .iter()
        .filter_map(|f| f.ident.as_ref())
        .find(|ident| *ident == "id")
        .cloned()
}

fn extract_unique_fields(fields: &[&Field]) -> Vec<syn::Ident> {
    fields
        .iter()
        .filter(|f| has_flag(f, "unique"))
        .filter_map(|f| f.ident.clone())
        .collect()
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
