mod kw {
    syn::custom_keyword!(skip);
}

/// Parsed `#[column(...)]` attribute.
#[derive(Debug)]
pub(crate) enum Column {
    /// `#[column("name")]`: persisted under the given physical name
    Named(syn::LitStr),

    /// `#[column(skip)]`: declared on the struct but never written or read
    Skip,
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        attr.parse_args()
    }
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        // Allowed syntax:
        //
        // #[column("name")]
        // #[column(skip)]
        let lookahead = input.lookahead1();

        let column = if lookahead.peek(syn::LitStr) {
            let name: syn::LitStr = input.parse()?;
            if name.value().is_empty() {
                return Err(syn::Error::new(name.span(), "column name must not be empty"));
            }
            Column::Named(name)
        } else if lookahead.peek(kw::skip) {
            let _kw: kw::skip = input.parse()?;
            Column::Skip
        } else {
            return Err(lookahead.error());
        };

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after column declaration"));
        }

        Ok(column)
    }
}
