//! Cache key builders.

use uuid::Uuid;

/// Prefix applied to all Idea Box cache keys.
const PREFIX: &str = "ideabox";

/// Cache key for the link preview of a link idea.
pub fn link_preview(entry_id: Uuid) -> String {
    format!("{PREFIX}:preview:{entry_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_preview_key() {
        let id = Uuid::nil();
        assert_eq!(
            link_preview(id),
            "ideabox:preview:00000000-0000-0000-0000-000000000000"
        );
    }
}
