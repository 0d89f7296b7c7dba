//! Status-code based classification of API responses.

use crate::decode::decode_one;
use crate::error::{Error, Result};
use crate::models::GitHubError;
use crate::response::Response;

/// Classify a raw HTTP response.
///
/// - `404` is [`Error::DoesNotExist`], whatever the body says.
/// - Any other status in `400..600` must carry a `{"message": ...}` body and
///   becomes [`Error::Api`]. If that body cannot be decoded, the decode
///   failure is returned instead.
/// - Everything else is a success; the body is handed back untouched.
pub fn classify<B: AsRef<[u8]>>(status: u16, body: B, response: Response) -> Result<(Response, B)> {
    if is_error_status(status) {
        return Err(error_for_status(status, body.as_ref(), response));
    }
    Ok((response, body))
}

/// Whether `status` is classified as a failure.
pub(crate) fn is_error_status(status: u16) -> bool {
    (400..600).contains(&status)
}

/// The error for a failed `status`. Only meaningful when
/// [`is_error_status`] holds.
pub(crate) fn error_for_status(status: u16, body: &[u8], response: Response) -> Error {
    if status == 404 {
        return Error::DoesNotExist;
    }
    match decode_one::<GitHubError>(body) {
        Ok(error) => Error::Api {
            status,
            response,
            error,
        },
        Err(err) => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> Response {
        Response::new([("content-type", "application/json")])
    }

    #[test]
    fn test_success_passes_body_through() {
        let (response, body) = classify(200, b"not even json".as_slice(), metadata()).unwrap();
        assert_eq!(body, b"not even json");
        assert_eq!(response, metadata());
    }

    #[test]
    fn test_404_is_does_not_exist_even_with_error_body() {
        let body = br#"{"message": "Not Found", "documentation_url": "https://developer.github.com/v3"}"#;
        let err = classify(404, body.as_slice(), metadata()).unwrap_err();
        assert!(matches!(err, Error::DoesNotExist));

        let err = classify(404, b"".as_slice(), metadata()).unwrap_err();
        assert!(matches!(err, Error::DoesNotExist));
    }

    #[test]
    fn test_422_maps_to_api_error() {
        let err = classify(422, br#"{"message": "Validation Failed"}"#.as_slice(), metadata())
            .unwrap_err();
        match err {
            Error::Api {
                status,
                response,
                error,
            } => {
                assert_eq!(status, 422);
                assert_eq!(response, metadata());
                assert_eq!(error, GitHubError::new("Validation Failed"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_with_html_body_is_deserialization_error() {
        let err = classify(502, b"<html>Bad Gateway</html>".as_slice(), metadata()).unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
    }

    #[test]
    fn test_error_status_without_message_is_decoding_error() {
        let err = classify(500, br#"{"error": "boom"}"#.as_slice(), metadata()).unwrap_err();
        assert!(matches!(err, Error::Decoding(_)));
    }

    #[test]
    fn test_status_boundaries() {
        assert!(classify(399, b"".as_slice(), metadata()).is_ok());
        assert!(classify(600, b"".as_slice(), metadata()).is_ok());
        assert!(matches!(
            classify(400, br#"{"message": "Bad"}"#.as_slice(), metadata()),
            Err(Error::Api { status: 400, .. })
        ));
        assert!(matches!(
            classify(599, br#"{"message": "Bad"}"#.as_slice(), metadata()),
            Err(Error::Api { status: 599, .. })
        ));
    }
}
