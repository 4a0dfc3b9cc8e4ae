use super::{ErrorSet, Field};

#[derive(Debug)]
pub(crate) struct Record {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Declared fields, in declaration order
    pub(crate) fields: Vec<Field>,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        // Generics are not supported yet
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "record generics are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut fields = vec![];

        for field in node.named.iter() {
            match Field::from_ast(field) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        // Two fields mapped to the same column would make writes ambiguous
        for (i, field) in fields.iter().enumerate() {
            let Some(column) = &field.column else {
                continue;
            };

            let duplicate = fields[..i]
                .iter()
                .filter_map(|prev| prev.column.as_ref())
                .any(|prev| prev.value() == column.value());

            if duplicate {
                errs.push(syn::Error::new(
                    column.span(),
                    format!("column `{}` is mapped by more than one field", column.value()),
                ));
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Record {
            ident: ast.ident.clone(),
            fields,
        })
    }
}
