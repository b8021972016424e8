use reqwest::StatusCode;
use thiserror::Error;

/// The fixed set of ways a forecast resolution can fail.
///
/// `Upstream` and `Network` are deliberately distinct variants: the first
/// means the CWA answered with an error status, the second means the call
/// never produced a response at all (DNS, connect, timeout, transport).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The city identifier is not in the lookup table. Carries the caller's
    /// original input and the full list of valid identifiers.
    #[error("unknown city id '{input}'")]
    InvalidCity {
        input: String,
        valid: Vec<&'static str>,
    },

    /// The CWA credential is unset or empty. An operator error, not a client
    /// error; detected before any network activity.
    #[error("CWA API key is not configured")]
    MissingApiKey,

    /// The CWA responded with a non-success HTTP status.
    #[error("CWA request failed with status {status}")]
    Upstream { status: StatusCode, body: String },

    /// The CWA responded successfully but returned no record for the
    /// requested location.
    #[error("no forecast data for {location}")]
    NoData { location: String },

    /// The CWA payload could not be parsed, or its weather elements carry
    /// misaligned time arrays.
    #[error("malformed CWA payload: {reason}")]
    MalformedUpstream { reason: String },

    /// The request could not complete.
    #[error("network error calling CWA: {0}")]
    Network(#[from] reqwest::Error),
}
