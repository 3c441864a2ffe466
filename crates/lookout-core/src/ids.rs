use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! branded_id {
    ($name:ident, $prefix:expr) => {
        #[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh id. Real ids come from the backend; this is for
            /// fixtures and stub servers.
            pub fn new() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::now_v7()))
            }

            pub fn from_raw(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

branded_id!(AccountId, "acct");
branded_id!(NoteId, "note");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_has_prefix() {
        let id = AccountId::new();
        assert!(id.as_str().starts_with("acct_"), "got: {id}");
    }

    #[test]
    fn note_id_has_prefix() {
        let id = NoteId::new();
        assert!(id.as_str().starts_with("note_"), "got: {id}");
    }

    #[test]
    fn ids_are_unique() {
        let a = NoteId::new();
        let b = NoteId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn from_raw_preserves_backend_value() {
        // Backend ids are opaque; they don't carry our fixture prefix.
        let id = NoteId::from_raw("65f1c2d3000000001203e4b5");
        assert_eq!(id.as_str(), "65f1c2d3000000001203e4b5");
    }

    #[test]
    fn display_and_from_str_roundtrip() {
        let id = AccountId::new();
        let s = id.to_string();
        let parsed: AccountId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_transparent() {
        let id = NoteId::from_raw("n1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""n1""#);
        let parsed: NoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
