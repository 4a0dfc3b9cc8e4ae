use super::PartialMutation;
use crate::{Error, Executor, Record, Result};

use patchwork_core::stmt::{Insert, Value};

impl<T: Record> PartialMutation<T> {
    /// Inserts the selected fields of `target`, plus `extra` columns, then
    /// reloads `target` from the row matching `where_column = where_value`.
    ///
    /// Inside a transaction the reload is skipped; `target` keeps the values
    /// the caller passed in. On any error `target` is left untouched.
    pub async fn insert<E>(
        &self,
        exec: &mut E,
        target: &mut T,
        where_column: &str,
        where_value: impl Into<Value>,
        extra: &[(&str, Value)],
    ) -> Result<()>
    where
        E: Executor + ?Sized,
    {
        let where_value = where_value.into();
        let columns = self.resolve_insert(target, extra)?;

        tracing::debug!(
            table = %self.table,
            columns = ?columns.columns,
            "partial insert"
        );

        let count = exec
            .exec(
                Insert {
                    table: self.table.clone(),
                    columns: columns.columns,
                    values: columns.values,
                }
                .into(),
            )
            .await?
            .into_count()?;

        if count == 0 {
            return Err(Error::record_not_found(format!(
                "operation insert can not be performed, zero rows affected, resource {where_value}"
            )));
        }

        if exec.is_transaction() {
            tracing::trace!(table = %self.table, "in transaction; skipping read-back");
            return Ok(());
        }

        *target = self.read_back(where_column, where_value).await?;
        Ok(())
    }
}
