use super::PartialMutation;
use crate::{
    page::{self, Page},
    Find, Record, Result,
};

use patchwork_core::{err, stmt::Value};

impl<T: Record> PartialMutation<T> {
    /// Lists one page of records ordered by `order_column`, ascending.
    ///
    /// An empty `page_token` starts at the first row; otherwise the page
    /// starts at the row whose `order_column` equals the token's value, or
    /// the next one above it. Every filter is an equality predicate and all
    /// of them must hold. `limit <= 0` means [`DEFAULT_PAGE_SIZE`].
    ///
    /// The comparison is inclusive, so a non-unique `order_column` can repeat
    /// a row across a page boundary.
    ///
    /// [`DEFAULT_PAGE_SIZE`]: crate::DEFAULT_PAGE_SIZE
    pub async fn list(
        &self,
        order_column: &str,
        page_token: &str,
        filters: &[(&str, Value)],
        limit: i64,
    ) -> Result<Page<T>> {
        let limit = page::page_size(limit);
        let collection = self.collection.get().await?;

        let mut query = collection.find();

        if let Some(start) = page::decode_token(page_token)? {
            query = query.and_ge(order_column, start);
        }

        for (column, value) in filters {
            query = query.and(*column, value.clone());
        }

        let query = query.order_by(order_column);
        let items = query.clone().limit(limit).all::<T>().await?;

        let probe = query.offset(limit).limit(1).columns([order_column]);

        let (next_page_token, probe_succeeded) = match next_token(probe, order_column).await {
            Ok(token) => (token, true),
            Err(err) => {
                tracing::warn!(
                    table = %self.table,
                    error = %err,
                    "next page lookahead failed; returning no token"
                );
                (String::new(), false)
            }
        };

        Ok(Page {
            items,
            next_page_token,
            probe_succeeded,
        })
    }
}

async fn next_token(probe: Find, order_column: &str) -> Result<String> {
    let Some(mut row) = probe.rows().await?.into_iter().next() else {
        return Ok(String::new());
    };

    let value = row.take(order_column)?;

    // `column >= NULL` matches nothing, so the token would end the listing early
    if value.is_null() {
        return Err(err!("next row has a NULL order value; column={order_column}"));
    }

    page::encode_token(&value)
}
