use super::{Column, ErrorSet};

#[derive(Debug)]
pub(crate) struct Field {
    /// Rust identifier, also the logical field name
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Physical column, `None` if the field is not persisted
    pub(crate) column: Option<syn::LitStr>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut column = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("column") {
                continue;
            }

            if column.is_some() {
                errs.push(syn::Error::new_spanned(
                    attr,
                    "duplicate #[column] attribute",
                ));
                continue;
            }

            match Column::from_ast(attr) {
                Ok(parsed) => column = Some(parsed),
                Err(err) => errs.push(err),
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let column = match column {
            Some(Column::Named(name)) => Some(name),
            Some(Column::Skip) | None => None,
        };

        Ok(Field {
            ident: ident.clone(),
            ty: field.ty.clone(),
            column,
        })
    }

    /// Logical field name as seen by include/exclude lists.
    pub(crate) fn name(&self) -> String {
        self.ident.to_string()
    }
}
