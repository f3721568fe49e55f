use crate::modules::media::sanitizer::SafeName;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// MIME type for a stored name, guessed from its extension.
pub fn resolve(name: &SafeName) -> String {
    mime_guess::from_path(name.as_str())
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::sanitizer::sanitize;

    fn resolve_raw(raw: &str) -> String {
        resolve(&sanitize(raw).unwrap())
    }

    #[test]
    fn resolves_common_image_types() {
        assert_eq!(resolve_raw("photo.jpg"), "image/jpeg");
        assert_eq!(resolve_raw("photo.JPEG"), "image/jpeg");
        assert_eq!(resolve_raw("logo.png"), "image/png");
        assert_eq!(resolve_raw("anim.gif"), "image/gif");
        assert_eq!(resolve_raw("hero.webp"), "image/webp");
    }

    #[test]
    fn unknown_or_missing_extension_falls_back_to_octet_stream() {
        assert_eq!(resolve_raw("README"), OCTET_STREAM);
        assert_eq!(resolve_raw("blob.zzzunknown"), OCTET_STREAM);
    }
}
