use base64::{Engine as _, engine::general_purpose};

/// Attachments above this size are stored anyway but logged.
pub const LARGE_ATTACHMENT_BYTES: usize = 1024 * 1024;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Encodes raw file bytes as an inline `data:` URL.
pub fn to_data_url(content_type: Option<&str>, bytes: &[u8]) -> String {
    let mime = content_type
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(FALLBACK_MIME);
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(bytes))
}

pub fn is_image(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.trim_start().starts_with("image/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_bytes_become_data_url() {
        let url = to_data_url(Some("image/png"), &[0x89, b'P', b'N', b'G']);
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn parameters_are_dropped_from_mime() {
        let url = to_data_url(Some("image/svg+xml; charset=utf-8"), b"<svg/>");
        assert!(url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn missing_type_uses_octet_stream() {
        assert!(to_data_url(None, b"x").starts_with("data:application/octet-stream;base64,"));
        assert!(!is_image(None));
        assert!(is_image(Some("image/jpeg")));
        assert!(!is_image(Some("text/plain")));
    }
}
