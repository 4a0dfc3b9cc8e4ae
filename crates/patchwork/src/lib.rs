// Lets `#[derive(Record)]` expand to `patchwork::...` paths inside this crate's own tests.
extern crate self as patchwork;

pub mod collection;
pub use collection::{Collection, CollectionCache, EnsureCollection, Find};

pub mod db;
pub use db::{Db, Executor, Transaction};

mod field_map;
pub use field_map::{Columns, FieldMap};

pub mod mutation;
pub use mutation::{MutationOptions, PartialMutation};

mod page;
pub use page::{Page, DEFAULT_PAGE_SIZE};

mod primitive;
pub use primitive::Primitive;

mod record;
pub use record::{Field, Record};

pub use patchwork_core::{stmt, Error, Result};

pub use patchwork_macros::Record;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{Field, Primitive, Record, Result};
    pub use patchwork_core::stmt::{Row, Value};
    pub use std::{default::Default, vec::Vec};
}
