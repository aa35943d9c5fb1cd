use crate::error::AnalysisError;
use base64::{engine::general_purpose, Engine as _};
use std::io::Read;

/// Data URL prefix for the images sent to the completion endpoint
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Read an image to the end and encode it as standard base64
///
/// No size limit is applied here; the HTTP layer caps upload size.
pub fn encode_image<R: Read>(mut reader: R) -> Result<String, AnalysisError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(AnalysisError::ImageRead)?;

    Ok(encode_image_bytes(&bytes))
}

/// Encode raw image bytes as standard base64
pub fn encode_image_bytes(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Build the `data:` URL embedded in the image content part
///
/// The MIME marker is always JPEG, whatever the upload actually is.
pub fn jpeg_data_url(encoded: &str) -> String {
    format!("{}{}", JPEG_DATA_URL_PREFIX, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    fn decode_jpeg_data_url(url: &str) -> Vec<u8> {
        let data = url
            .strip_prefix(JPEG_DATA_URL_PREFIX)
            .expect("not a JPEG data URL");
        general_purpose::STANDARD.decode(data).unwrap()
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection reset mid-upload",
            ))
        }
    }

    #[test]
    fn test_encode_image_round_trip() {
        let encoded = encode_image(&JPEG_HEADER[..]).unwrap();
        let decoded = general_purpose::STANDARD.decode(&encoded).unwrap();
        assert_eq!(decoded, JPEG_HEADER);
    }

    #[test]
    fn test_encode_empty_image() {
        assert_eq!(encode_image(std::io::empty()).unwrap(), "");
    }

    #[test]
    fn test_encode_image_read_failure() {
        let err = encode_image(FailingReader).unwrap_err();
        assert!(matches!(err, AnalysisError::ImageRead(_)));
        assert_eq!(err.kind(), "image_read_error");
    }

    #[test]
    fn test_jpeg_data_url_prefix() {
        let encoded = encode_image_bytes(&JPEG_HEADER);
        let url = jpeg_data_url(&encoded);
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(&url[JPEG_DATA_URL_PREFIX.len()..], "/9j/4AAQ");
    }

    #[test]
    fn test_data_url_decodes_back_to_image() {
        let url = jpeg_data_url(&encode_image_bytes(&JPEG_HEADER));
        assert_eq!(decode_jpeg_data_url(&url), JPEG_HEADER);
    }
}
