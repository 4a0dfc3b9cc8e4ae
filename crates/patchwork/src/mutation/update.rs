use super::PartialMutation;
use crate::{Error, Executor, Record, Result};

use patchwork_core::stmt::{Filter, Update, Value};

impl<T: Record> PartialMutation<T> {
    /// Updates the row matching `where_column = where_value` with the
    /// selected fields of `target`, then reloads `target` from it.
    ///
    /// A non-empty `field_mask` narrows the selection; see
    /// [`resolve_update`](Self::resolve_update). As with
    /// [`insert`](Self::insert), the reload is skipped inside a transaction
    /// and `target` is untouched on error.
    pub async fn update<E>(
        &self,
        exec: &mut E,
        target: &mut T,
        where_column: &str,
        where_value: impl Into<Value>,
        field_mask: &[impl AsRef<str>],
        extra: &[(&str, Value)],
    ) -> Result<()>
    where
        E: Executor + ?Sized,
    {
        let where_value = where_value.into();
        let assignments = self.resolve_update(target, field_mask, extra)?;

        tracing::debug!(
            table = %self.table,
            columns = assignments.len(),
            %where_column,
            "partial update"
        );

        let count = exec
            .exec(
                Update {
                    table: self.table.clone(),
                    assignments,
                    filter: Filter::eq(where_column, where_value.clone()),
                }
                .into(),
            )
            .await?
            .into_count()?;

        if count == 0 {
            return Err(Error::record_not_found(format!(
                "operation update can not be performed, not exist, resource {where_value}"
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
