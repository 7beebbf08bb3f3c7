//! Buffered multipart form reading.
//!
//! Idea and container writes arrive as `multipart/form-data` so they can
//! carry an image next to the text fields. The whole form is read up front
//! (bounded by the body limit) and then picked apart by name.

use std::collections::HashMap;

use axum::extract::Multipart;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_entity::entry::EntryKind;
use ideabox_service::Upload;

/// Text fields and file parts of a multipart form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl FormData {
    /// Read every part of the form. Parts with a file name are files;
    /// empty file parts are treated as absent.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                if !data.is_empty() {
                    form.files.insert(
                        name,
                        Upload {
                            file_name,
                            content_type,
                            data,
                        },
                    );
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// A text field, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A text field that must be present.
    pub fn required(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .map(str::to_string)
            .ok_or_else(|| AppError::validation(format!("{name} is required")))
    }

    /// A text field, or an empty string.
    pub fn text_or_default(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    /// An optional UUID field. Empty and `null` values count as absent.
    pub fn uuid(&self, name: &str) -> AppResult<Option<Uuid>> {
        match self.text(name).map(str::trim) {
            None | Some("") | Some("null") => Ok(None),
            Some(raw) => Uuid::parse_str(raw)
                .map(Some)
                .map_err(|_| AppError::validation(format!("Invalid {name}"))),
        }
    }

    /// A UUID field that must be present.
    pub fn required_uuid(&self, name: &str) -> AppResult<Uuid> {
        self.uuid(name)?
            .ok_or_else(|| AppError::validation(format!("{name} is required")))
    }

    /// A boolean flag (`true`/`1`/`on`).
    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.text(name).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("true" | "1" | "on")
        )
    }

    /// The idea `type` field.
    pub fn kind(&self) -> AppResult<EntryKind> {
        self.required("type")?.trim().parse()
    }

    /// The `tags` field: a JSON array of strings, or a comma-separated list.
    pub fn tags(&self) -> AppResult<Vec<String>> {
        parse_tags(self.text("tags").unwrap_or_default())
    }

    /// Remove and return a file part.
    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }
}

fn parse_tags(raw: &str) -> AppResult<Vec<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    if raw.starts_with('[') {
        return serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("Invalid tags: {e}")));
    }
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_json_array() {
        assert_eq!(parse_tags(r#"["a", "b c"]"#).unwrap(), vec!["a", "b c"]);
        assert!(parse_tags("[1, 2]").is_err());
    }

    #[test]
    fn test_parse_tags_comma_fallback() {
        assert_eq!(parse_tags(" a, ,b ").unwrap(), vec!["a", "b"]);
        assert!(parse_tags("").unwrap().is_empty());
    }

    #[test]
    fn test_uuid_and_flag_fields() {
        let id = Uuid::new_v4();
        let mut form = FormData::default();
        form.fields.insert("folder_id".into(), id.to_string());
        form.fields.insert("empty".into(), String::new());
        form.fields.insert("bad".into(), "nope".into());
        form.fields.insert("remove_cover".into(), "True".into());

        assert_eq!(form.uuid("folder_id").unwrap(), Some(id));
        assert_eq!(form.uuid("empty").unwrap(), None);
        assert_eq!(form.uuid("missing").unwrap(), None);
        assert!(form.uuid("bad").is_err());
        assert!(form.required_uuid("missing").is_err());
        assert!(form.flag("remove_cover"));
        assert!(!form.flag("missing"));
    }
}
