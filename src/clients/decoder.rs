//! Decoding of successful response bodies.

use serde::de::DeserializeOwned;

use crate::clients::errors::HttpError;

/// Decodes a response body into `T`.
///
/// An empty body is decoded as JSON `null`, so `()` and `Option<T>` targets
/// succeed on bodiless responses. On failure the raw body is logged and
/// [`HttpError::DecodeMismatch`] is returned; no partial value is produced.
///
/// # Errors
///
/// Returns [`HttpError::DecodeMismatch`] if the body is not valid JSON for `T`.
///
/// # Example
///
/// ```rust
/// use networking::clients::decode;
///
/// let numbers: Vec<u32> = decode(b"[1, 2, 3]").unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
///
/// assert!(decode::<Vec<u32>>(b"{oops").is_err());
/// ```
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HttpError> {
    let input: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };

    serde_json::from_slice(input).map_err(|source| {
        tracing::warn!(
            "Response body did not match {}: {}. Body: {}",
            std::any::type_name::<T>(),
            source,
            String::from_utf8_lossy(bytes)
        );
        HttpError::DecodeMismatch { source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        id: u64,
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn test_decode_round_trips_serialized_value() {
        let profile = Profile {
            id: 7,
            name: "Ama".to_string(),
            tags: vec!["admin".to_string()],
        };
        let bytes = serde_json::to_vec(&profile).unwrap();

        let decoded: Profile = decode(&bytes).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn test_malformed_json_is_decode_mismatch() {
        let result = decode::<Profile>(br#"{"id": 7, "name": "#);
        assert!(matches!(result, Err(HttpError::DecodeMismatch { .. })));
    }

    #[test]
    fn test_wrong_shape_is_decode_mismatch() {
        let result = decode::<Profile>(br#"{"id": "seven", "name": "Ama", "tags": []}"#);
        assert!(matches!(result, Err(HttpError::DecodeMismatch { .. })));
    }

    #[test]
    fn test_missing_field_never_yields_partial_value() {
        let result = decode::<Profile>(br#"{"id": 7}"#);
        assert!(matches!(result, Err(HttpError::DecodeMismatch { .. })));
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        decode::<()>(b"").unwrap();
        assert_eq!(decode::<Option<Profile>>(b"  ").unwrap(), None);
        assert!(matches!(
            decode::<Profile>(b""),
            Err(HttpError::DecodeMismatch { .. })
        ));
    }
}
