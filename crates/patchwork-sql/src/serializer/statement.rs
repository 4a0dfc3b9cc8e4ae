use super::{Comma, Formatter, Ident, Params, ToSql};

use patchwork_core::stmt::{
    Direction, Insert, Projection, Select, Statement, TableExists, Update,
};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::TableExists(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(self.values.iter());

        fmt!(f, "INSERT INTO " Ident(&self.table) " (" columns ") VALUES (" values ")");
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "UPDATE " Ident(&self.table) " SET ");

        let mut s = "";
        for (column, value) in self.assignments.iter() {
            fmt!(f, s Ident(column) " = " value);
            s = ", ";
        }

        let filter = &self.filter;
        fmt!(f, filter);
    }
}

impl ToSql for &Projection {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Projection::All => fmt!(f, "*"),
            Projection::Columns(columns) => fmt!(f, Comma(columns.iter().map(Ident))),
        }
    }
}

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let projection = &self.projection;
        let filter = &self.filter;

        fmt!(f, "SELECT " projection " FROM " Ident(&self.table) filter);

        if let Some(order_by) = &self.order_by {
            let direction = match order_by.direction {
                Direction::Asc => " ASC",
                Direction::Desc => " DESC",
            };
            fmt!(f, " ORDER BY " Ident(&order_by.column) direction);
        }

        if let Some(limit) = &self.limit {
            fmt!(f, " LIMIT " limit.limit);

            if let Some(offset) = limit.offset {
                fmt!(f, " OFFSET " offset);
            }
        }
    }
}

impl ToSql for &TableExists {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let name = &patchwork_core::stmt::Value::String(self.table.clone());

        if f.serializer.is_sqlite() {
            fmt!(f, "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = " name);
        } else {
            fmt!(f, "SELECT 1 FROM information_schema.tables WHERE table_name = " name);
        }
    }
}
