use crate::schema::Record;

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn record(record: &Record) -> TokenStream {
    let patchwork = quote!(_patchwork::codegen_support);
    let ident = &record.ident;
    let num_persisted = record.fields.iter().filter(|f| f.column.is_some()).count();

    let field_defs = record.fields.iter().map(|field| {
        let name = field.name();
        match &field.column {
            Some(column) => quote!(#patchwork::Field::persisted(#name, #column)),
            None => quote!(#patchwork::Field::skipped(#name)),
        }
    });

    let push_values = record.fields.iter().filter_map(|field| {
        field.column.as_ref()?;
        let name = field.name();
        let field_ident = &field.ident;
        let ty = &field.ty;
        Some(quote! {
            values.push((#name, <#ty as #patchwork::Primitive>::to_value(&self.#field_ident)?));
        })
    });

    let load_fields = record.fields.iter().map(|field| {
        let field_ident = &field.ident;
        let ty = &field.ty;
        match &field.column {
            Some(column) => quote! {
                #field_ident: <#ty as #patchwork::Primitive>::load(row.take(#column)?)?
            },
            None => quote! {
                #field_ident: #patchwork::Default::default()
            },
        }
    });

    wrap_in_const(quote! {
        impl #patchwork::Record for #ident {
            const FIELDS: &'static [#patchwork::Field] = &[
                #( #field_defs, )*
            ];

            fn values(&self) -> #patchwork::Result<#patchwork::Vec<(&'static str, #patchwork::Value)>> {
                let mut values = #patchwork::Vec::with_capacity(#num_persisted);
                #( #push_values )*
                #patchwork::Result::Ok(values)
            }

            #[allow(unused_mut, unused_variables)]
            fn load(mut row: #patchwork::Row) -> #patchwork::Result<Self> {
                #patchwork::Result::Ok(#ident {
                    #( #load_fields, )*
                })
            }
        }
    })
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use patchwork as _patchwork;
            #code
        };
    }
}
