use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the core. Location probe failures live in
/// [`crate::locate::LocationError`] and are absorbed by the resolver, never
/// returned to callers.
#[derive(Debug, Error)]
pub enum Error {
    /// Upstream returned a non-success status (e.g. unknown city).
    #[error("weather request failed with status {status}: {body}")]
    Fetch { status: StatusCode, body: String },

    /// Upstream answered 200 but a required field was absent.
    #[error("weather payload is missing `{0}`")]
    MalformedPayload(&'static str),

    /// User submitted blank search text; never triggers a fetch.
    #[error("city name must not be empty")]
    EmptyInput,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode weather payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Trim a user-supplied city name, rejecting blank input before any
/// network call is made.
pub fn validate_city_input(raw: &str) -> Result<&str, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(validate_city_input(""), Err(Error::EmptyInput)));
        assert!(matches!(validate_city_input("   "), Err(Error::EmptyInput)));
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(validate_city_input("  Paris ").unwrap(), "Paris");
    }
}
