mod assignments;
pub use assignments::Assignments;

mod filter;
pub use filter::{BinaryOp, ExprBinaryOp, Filter};

mod insert;
pub use insert::Insert;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod projection;
pub use projection::Projection;

mod row;
pub use row::Row;

mod select;
pub use select::{Limit, Select};

mod statement;
pub use statement::Statement;

mod table_exists;
pub use table_exists::TableExists;

mod update;
pub use update::Update;

mod value;
pub use value::Value;
