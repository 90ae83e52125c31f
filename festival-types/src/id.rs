//! Identifier newtypes.
//!
//! The API is not consistent about whether ids are JSON numbers or strings, so
//! every id deserializes from either. Ids compare by their decimal string form
//! and serialize back in the form they arrived in.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            value: String,
            numeric: bool,
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.value
            }

            /// Whether the id was a JSON number on the wire.
            pub fn is_numeric(&self) -> bool {
                self.numeric
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.value.hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.value.cmp(&other.value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self {
                    value,
                    numeric: false,
                }
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self {
                    value: value.to_string(),
                    numeric: true,
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serialize_id(&self.value, self.numeric, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let (value, numeric) = deserializer.deserialize_any(IdVisitor)?;
                Ok(Self { value, numeric })
            }
        }
    };
}

string_id!(
    /// Identifies one raffle entry.
    EntryId
);
string_id!(
    /// Identifies one lost-and-found post.
    LostId
);
string_id!(
    /// Identifies a festival user (post author or entrant).
    UserId
);

fn serialize_id<S: Serializer>(value: &str, numeric: bool, serializer: S) -> Result<S::Ok, S::Error> {
    if numeric {
        if let Ok(n) = value.parse::<u64>() {
            return serializer.serialize_u64(n);
        }
        if let Ok(n) = value.parse::<i64>() {
            return serializer.serialize_i64(n);
        }
    }
    serializer.serialize_str(value)
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = (String, bool);

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok((v.to_string(), false))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok((v, false))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok((v.to_string(), true))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok((v.to_string(), true))
    }
}

/// Accepts `true`, `false`, `"true"`, `"false"` and `null` (as false).
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => Ok(b),
        serde_json::Value::Null => Ok(false),
        serde_json::Value::String(s) => match s.as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!(
                "Expected a boolean, got the string `{other}`"
            ))),
        },
        other => Err(D::Error::custom(format!("Expected a boolean, got `{other}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_from_numbers_and_strings_are_equal() {
        let a: LostId = serde_json::from_str("17").unwrap();
        let b: LostId = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "17");
    }

    #[test]
    fn ids_serialize_in_their_wire_form() {
        let number: UserId = serde_json::from_str("5").unwrap();
        let string: UserId = serde_json::from_str("\"5\"").unwrap();
        assert!(number.is_numeric());
        assert_eq!(serde_json::to_string(&number).unwrap(), "5");
        assert_eq!(serde_json::to_string(&string).unwrap(), "\"5\"");
        assert_eq!(serde_json::to_string(&UserId::from("abc")).unwrap(), "\"abc\"");
    }

    #[test]
    fn rejects_non_scalar_ids() {
        assert!(serde_json::from_str::<EntryId>("[1]").is_err());
    }
}
