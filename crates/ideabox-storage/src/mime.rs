//! MIME helpers for uploaded images.

/// Image types accepted for idea images and container covers.
pub const IMAGE_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/svg+xml",
    "image/gif",
    "image/webp",
];

/// Whether a declared content type is an accepted image type.
pub fn is_supported_image(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    IMAGE_MIME_TYPES.contains(&essence.as_str())
}

/// Guess an image MIME type from a file path extension.
pub fn mime_from_path(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_images() {
        assert!(is_supported_image("image/png"));
        assert!(is_supported_image("IMAGE/JPEG"));
        assert!(is_supported_image("image/svg+xml; charset=utf-8"));
        assert!(!is_supported_image("application/pdf"));
        assert!(!is_supported_image("image/bmp"));
    }

    #[test]
    fn test_mime_detection() {
        assert_eq!(mime_from_path("cover.PNG"), Some("image/png"));
        assert_eq!(mime_from_path("entries/x/photo.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_from_path("noext"), None);
    }
}
