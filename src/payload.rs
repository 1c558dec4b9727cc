//! Text view over secret payloads

use std::ffi::OsStr;

use crate::traits::StoreError;

/// Encode text as UTF-8 bytes.
///
/// Accepts anything that can be viewed as an OS string, so raw platform
/// strings that are not valid Unicode are rejected here instead of being
/// stored lossily.
pub fn encode_text<T: AsRef<OsStr> + ?Sized>(text: &T) -> Result<Vec<u8>, StoreError> {
    text.as_ref()
        .to_str()
        .map(|s| s.as_bytes().to_vec())
        .ok_or(StoreError::DataEncodingFailed)
}

/// Decode a loaded payload as UTF-8 text
pub fn decode_text(data: Vec<u8>) -> Result<String, StoreError> {
    String::from_utf8(data).map_err(|e| {
        tracing::warn!(valid_up_to = e.utf8_error().valid_up_to(), "Payload is not valid UTF-8");
        StoreError::DataDecodingFailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("secret123").unwrap(), b"secret123".to_vec());
        assert_eq!(encode_text("").unwrap(), Vec::<u8>::new());
        assert_eq!(encode_text("pässwörd").unwrap(), "pässwörd".as_bytes().to_vec());
    }

    #[cfg(unix)]
    #[test]
    fn test_encode_rejects_non_unicode_os_string() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(&[0x66, 0x6f, 0x80, 0x6f]);
        assert!(matches!(encode_text(raw), Err(StoreError::DataEncodingFailed)));
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(b"token".to_vec()).unwrap(), "token");
        assert!(matches!(
            decode_text(vec![0xff, 0xfe, 0x00]),
            Err(StoreError::DataDecodingFailed)
        ));
    }
}
