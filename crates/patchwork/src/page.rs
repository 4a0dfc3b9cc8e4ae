use patchwork_core::{err, stmt::Value, Result};

/// Page size used when a caller asks for zero or fewer items.
pub const DEFAULT_PAGE_SIZE: u64 = 30;

/// One page of a keyset-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// Token for the following page. Empty when there are no more rows, or
    /// when the lookahead query failed.
    pub next_page_token: String,

    /// `false` if the lookahead query for the next token errored. The token
    /// is then empty even though more rows may exist.
    pub probe_succeeded: bool,
}

impl<T> Page<T> {
    /// True if a following page is known to exist.
    pub fn has_next(&self) -> bool {
        !self.next_page_token.is_empty()
    }
}

pub(crate) fn page_size(limit: i64) -> u64 {
    if limit <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        limit as u64
    }
}

/// Encodes the order column value of the first row past the page.
pub(crate) fn encode_token(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decodes a token produced by [`encode_token`]. The empty token means
/// "start from the beginning" and decodes to `None`.
pub(crate) fn decode_token(token: &str) -> Result<Option<Value>> {
    if token.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(token)?;

    if value.is_null() {
        return Err(err!("page token holds a NULL order value"));
    }

    Ok(Some(value))
}
