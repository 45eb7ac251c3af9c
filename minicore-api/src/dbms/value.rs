use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scalar value bound to a statement placeholder or read back from a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Int64(i64),
    Uint64(u64),
    Decimal(Decimal),
    Text(String),
    Blob(Vec<u8>),
    Uuid(Uuid),
}

// macro rules for implementing From trait for Value enum variants
macro_rules! impl_conv_for_value {
    ($variant:ident, $ty:ty, $name:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }

        impl Value {
            /// Attempts to extract a reference to the inner value if it matches the variant.
            pub fn $name(&self) -> Option<&$ty> {
                if let Value::$variant(v) = self {
                    Some(v)
                } else {
                    None
                }
            }
        }
    };
}

impl_conv_for_value!(Boolean, bool, as_boolean);
impl_conv_for_value!(Int64, i64, as_int64);
impl_conv_for_value!(Uint64, u64, as_uint64);
impl_conv_for_value!(Decimal, Decimal, as_decimal);
impl_conv_for_value!(Text, String, as_text);
impl_conv_for_value!(Blob, Vec<u8>, as_blob);
impl_conv_for_value!(Uuid, Uuid, as_uuid);

// narrower integers widen into the 64-bit variants
macro_rules! impl_widening_conv_for_value {
    ($variant:ident, $wide:ty, $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(<$wide>::from(value))
                }
            }
        )+
    };
}

impl_widening_conv_for_value!(Int64, i64, i8, i16, i32);
impl_widening_conv_for_value!(Uint64, u64, u8, u16, u32);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl Value {
    /// Checks if the value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Int64(_) => "Int64",
            Value::Uint64(_) => "Uint64",
            Value::Decimal(_) => "Decimal",
            Value::Text(_) => "Text",
            Value::Blob(_) => "Blob",
            Value::Uuid(_) => "Uuid",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Uint64(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "'{v}'"),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
            Value::Uuid(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_null() {
        let int_value: Value = 42i64.into();
        assert!(!int_value.is_null());

        let null_value = Value::Null;
        assert!(null_value.is_null());
    }

    #[test]
    fn test_should_widen_integers() {
        assert_eq!(Value::from(5i32), Value::Int64(5));
        assert_eq!(Value::from(7u32), Value::Uint64(7));
        assert_eq!(Value::from(-1i8).as_int64(), Some(&-1));
    }

    #[test]
    fn test_should_convert_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("alice")), Value::Text("alice".to_string()));
    }

    #[test]
    fn test_value_conversion_decimal() {
        let decimal = Decimal::new(12345, 2);
        let value: Value = decimal.into();
        assert_eq!(value.as_decimal(), Some(&decimal));
    }

    #[test]
    fn test_value_conversion_uuid() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000")
            .expect("failed to parse uuid");
        let value: Value = uuid.into();
        assert_eq!(value.as_uuid(), Some(&uuid));
    }

    #[test]
    fn test_value_type_name() {
        assert_eq!(Value::from(42i64).type_name(), "Int64");
        assert_eq!(Value::from("hello").type_name(), "Text");
        assert_eq!(Value::Null.type_name(), "Null");
    }

    #[test]
    fn test_should_display_value() {
        assert_eq!(Value::from("bob").to_string(), "'bob'");
        assert_eq!(Value::from(vec![1u8, 2, 3]).to_string(), "<3 bytes>");
        assert_eq!(Value::Null.to_string(), "NULL");
    }

    #[test]
    fn test_should_serde_roundtrip_through_json() {
        let value = Value::from(5i64);
        let json = serde_json::to_string(&value).expect("failed to serialize");
        assert_eq!(json, r#"{"Int64":5}"#);
        let decoded: Value = serde_json::from_str(&json).expect("failed to deserialize");
        assert_eq!(decoded, value);
    }
}
