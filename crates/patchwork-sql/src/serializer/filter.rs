use super::{Formatter, Ident, Params, ToSql};

use patchwork_core::stmt::{BinaryOp, ExprBinaryOp, Filter};

impl ToSql for BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            BinaryOp::Eq => " = ",
            BinaryOp::Ge => " >= ",
        });
    }
}

impl ToSql for &ExprBinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let value = &self.value;
        fmt!(f, Ident(&self.column) self.op value);
    }
}

/// Emits ` WHERE a AND b ...`, or nothing for an empty filter.
impl ToSql for &Filter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let mut s = " WHERE ";
        for expr in &self.exprs {
            fmt!(f, s expr);
            s = " AND ";
        }
    }
}
