/// Columns returned by a select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// `*`
    #[default]
    All,

    Columns(Vec<String>),
}
