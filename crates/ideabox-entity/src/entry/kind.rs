//! Entry kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type discriminator of an entry. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entry_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A text snippet.
    Text,
    /// A bookmarked URL.
    Link,
    /// An uploaded image.
    Image,
}

impl EntryKind {
    /// Every kind, in the order child tables are queried.
    pub const ALL: [EntryKind; 3] = [Self::Text, Self::Link, Self::Image];

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Link => "link",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ideabox_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "link" => Ok(Self::Link),
            "image" => Ok(Self::Image),
            _ => Err(ideabox_core::AppError::validation(format!(
                "Invalid idea type: '{s}'. Expected one of: text, link, image"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for kind in EntryKind::ALL {
            assert_eq!(kind.to_string().parse::<EntryKind>().unwrap(), kind);
        }
        assert!("video".parse::<EntryKind>().is_err());
    }
}
