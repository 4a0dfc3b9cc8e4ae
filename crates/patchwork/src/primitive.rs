use patchwork_core::{stmt::Value, Error, Result};

/// A Rust type that can be stored in a single column.
pub trait Primitive: Sized {
    fn to_value(&self) -> Result<Value>;

    fn load(value: Value) -> Result<Self>;
}

impl Primitive for bool {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Bool(*self))
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            // SQLite has no boolean storage class
            Value::I64(0) => Ok(false),
            Value::I64(1) => Ok(true),
            value => Err(Error::type_conversion(value, "bool")),
        }
    }
}

macro_rules! impl_primitive_int {
    ( $( $ty:ty ),* ) => {
        $(
            impl Primitive for $ty {
                fn to_value(&self) -> Result<Value> {
                    Ok(Value::I64(i64::from(*self)))
                }

                fn load(value: Value) -> Result<Self> {
                    match value {
                        Value::I64(v) => <$ty>::try_from(v)
                            .map_err(|_| Error::type_conversion(Value::I64(v), stringify!($ty))),
                        value => Err(Error::type_conversion(value, stringify!($ty))),
                    }
                }
            }
        )*
    };
}

impl_primitive_int!(i8, i16, i32, i64, u8, u16, u32);

/// Columns are signed 64-bit, so only `0..=i64::MAX` round-trips.
impl Primitive for u64 {
    fn to_value(&self) -> Result<Value> {
        i64::try_from(*self)
            .map(Value::I64)
            .map_err(|_| Error::type_conversion(Value::String(self.to_string()), "i64"))
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => {
                u64::try_from(v).map_err(|_| Error::type_conversion(Value::I64(v), "u64"))
            }
            value => Err(Error::type_conversion(value, "u64")),
        }
    }
}

impl Primitive for f64 {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::F64(*self))
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I64(v) => Ok(v as f64),
            value => Err(Error::type_conversion(value, "f64")),
        }
    }
}

impl Primitive for f32 {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::F64(f64::from(*self)))
    }

    fn load(value: Value) -> Result<Self> {
        f64::load(value).map(|v| v as f32)
    }
}

impl Primitive for String {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            value => Err(Error::type_conversion(value, "String")),
        }
    }
}

impl Primitive for Vec<u8> {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Bytes(self.clone()))
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            value => Err(Error::type_conversion(value, "Vec<u8>")),
        }
    }
}

impl Primitive for uuid::Uuid {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Uuid(*self))
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(v) => Ok(v),
            Value::String(v) => Ok(v.parse()?),
            value => Err(Error::type_conversion(value, "Uuid")),
        }
    }
}

impl<T: Primitive> Primitive for Option<T> {
    fn to_value(&self) -> Result<Value> {
        match self {
            Some(v) => v.to_value(),
            None => Ok(Value::Null),
        }
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::load(value).map(Some),
        }
    }
}
