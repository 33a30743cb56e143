use thiserror::Error;

/// Failures that abort a risk check.
///
/// Elevation lookups never produce one of these: an unavailable elevation is
/// reported as `None` and the location is treated as non-mountainous.
#[derive(Debug, Error)]
pub enum RiskError {
    /// No OpenWeatherMap API key was given, found in the environment, or configured.
    #[error(
        "No OpenWeatherMap API key available.\n\
         Hint: pass --api-key, set OPENWEATHER_API_KEY, run `mountain-risk configure`, or use --demo."
    )]
    MissingCredential,

    /// Location input that cannot be turned into a query.
    #[error("{0}")]
    InvalidLocation(String),

    /// The provider answered with a non-success status.
    #[error("External API HTTP error: {provider} returned {status}: {body}")]
    Http {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl RiskError {
    pub fn invalid_location<S: Into<String>>(message: S) -> Self {
        Self::InvalidLocation(message.into())
    }

    /// True for errors the user can fix by changing their input.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::InvalidLocation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_carries_hint() {
        let msg = RiskError::MissingCredential.to_string();
        assert!(msg.contains("No OpenWeatherMap API key available"));
        assert!(msg.contains("OPENWEATHER_API_KEY"));
    }

    #[test]
    fn http_error_is_surfaced_verbatim() {
        let err = RiskError::Http {
            provider: "OpenWeather",
            status: 401,
            body: "{\"cod\":401,\"message\":\"Invalid API key\"}".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("External API HTTP error"));
        assert!(msg.contains("401"));
        assert!(msg.contains("Invalid API key"));
    }

    #[test]
    fn user_correctable_classification() {
        assert!(RiskError::MissingCredential.is_user_correctable());
        assert!(RiskError::invalid_location("bad").is_user_correctable());
        assert!(!RiskError::Request("timeout".into()).is_user_correctable());
        assert!(!RiskError::Parse("eof".into()).is_user_correctable());
    }
}
