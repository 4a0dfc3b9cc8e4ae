pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub use patchwork_core::stmt::{self, Statement};
