use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use patchwork_core::stmt::Value as CoreValue;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core patchwork value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value read from a row. SQLite does not carry the
    /// declared column type, so the record's field type finishes the
    /// conversion on load.
    pub fn from_sql(value: SqlValue) -> Self {
        let core_value = match value {
            SqlValue::Null => CoreValue::Null,
            SqlValue::Integer(value) => CoreValue::I64(value),
            SqlValue::Real(value) => CoreValue::F64(value),
            SqlValue::Text(value) => CoreValue::String(value),
            SqlValue::Blob(value) => CoreValue::Bytes(value),
        };

        Value(core_value)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match &self.0 {
            CoreValue::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            CoreValue::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            CoreValue::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            CoreValue::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            CoreValue::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            CoreValue::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            CoreValue::Uuid(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
