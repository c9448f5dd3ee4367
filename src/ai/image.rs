use base64::Engine as _;

/// Picture attached to a request, with the MIME type guessed from its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>) -> Self {
        let mime_type = sniff_mime_type(&bytes);
        Self { bytes, mime_type }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Guess an image MIME type from magic bytes. Telegram photos are JPEG, so
/// that is the fallback.
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_png_and_webp() {
        assert_eq!(sniff_mime_type(b"\x89PNG\r\n\x1a\n rest"), "image/png");
        assert_eq!(sniff_mime_type(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
    }

    #[test]
    fn unknown_bytes_fall_back_to_jpeg() {
        assert_eq!(sniff_mime_type(b"\xff\xd8\xff\xe0"), "image/jpeg");
        assert_eq!(sniff_mime_type(b""), "image/jpeg");
    }

    #[test]
    fn encodes_payload() {
        let image = ImageData::new(b"img".to_vec());
        assert_eq!(image.to_base64(), "aW1n");
        assert_eq!(image.mime_type(), "image/jpeg");
    }
}
