use reqwest::StatusCode;
use std::{error::Error as StdError, fmt, result::Result as StdResult};

#[derive(Debug)]
pub struct Error(Box<Inner>);
#[derive(Debug)]
pub(super) enum Kind {
    Builder(reqwest::Error),
    Url,
    Network(reqwest::Error),
    Status(StatusCode),
    Decode(reqwest::Error),
    Unauthenticated,
}
#[derive(Debug)]
struct Inner {
    kind: Kind,
    description: Option<String>,
}

pub type Result<T> = StdResult<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            Kind::Builder(err) => write!(f, "Error building client: {}", err)?,
            Kind::Url => write!(f, "Invalid backend url")?,
            Kind::Network(err) => write!(f, "Error sending request: {}", err)?,
            Kind::Status(status) => write!(f, "Request failed with {}", status)?,
            Kind::Decode(err) => write!(f, "Unexpected response: {}", err)?,
            Kind::Unauthenticated => write!(f, "Not signed in")?,
        }
        self.write_description(f)
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.0.kind {
            Kind::Builder(x) | Kind::Network(x) | Kind::Decode(x) => Some(x),
            Kind::Url | Kind::Status(_) | Kind::Unauthenticated => None,
        }
    }
}
impl crate::error::Error for Error {}

impl Error {
    fn new(inner: Inner) -> Self {
        Self(Box::new(inner))
    }
    pub(super) fn with_kind(kind: Kind) -> Self {
        Self::new(Inner {
            kind,
            description: None,
        })
    }
    pub(super) fn with_description<T: Into<String>>(kind: Kind, description: T) -> Self {
        Self::new(Inner {
            kind,
            description: Some(description.into()),
        })
    }
    fn write_description(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(d) = &self.0.description {
            write!(f, ": {}", d)
        } else {
            Ok(())
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match &self.0.kind {
            Kind::Status(s) => Some(*s),
            _ => None,
        }
    }
    /// Missing credential, or a 401/403 from the backend.
    pub fn is_auth(&self) -> bool {
        matches!(self.0.kind, Kind::Unauthenticated)
            || matches!(
                self.status(),
                Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
            )
    }
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
    /// The backend could not be reached, or kept failing on its side.
    pub fn is_network(&self) -> bool {
        matches!(self.0.kind, Kind::Network(_))
            || self.status().map_or(false, |s| s.is_server_error())
    }
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }
}

pub(super) fn network_error(err: reqwest::Error) -> Error {
    match err.status() {
        Some(status) => Error::with_kind(Kind::Status(status)),
        None => Error::with_kind(Kind::Network(err)),
    }
}
pub(super) fn decode_error(err: reqwest::Error) -> Error {
    Error::with_kind(Kind::Decode(err))
}
pub(crate) fn status_error(status: StatusCode, detail: Option<String>) -> Error {
    match detail {
        Some(d) => Error::with_description(Kind::Status(status), d),
        None => Error::with_kind(Kind::Status(status)),
    }
}
pub(super) fn unauthenticated() -> Error {
    Error::with_kind(Kind::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(status_error(StatusCode::UNAUTHORIZED, None).is_auth());
        assert!(status_error(StatusCode::FORBIDDEN, None).is_auth());
        assert!(unauthenticated().is_auth());
        assert!(status_error(StatusCode::NOT_FOUND, None).is_not_found());
        assert!(status_error(StatusCode::BAD_GATEWAY, None).is_network());
        assert!(!status_error(StatusCode::BAD_REQUEST, None).is_network());
    }

    #[test]
    fn detail_is_appended() {
        let e = status_error(StatusCode::BAD_REQUEST, Some(String::from("Unsupported language")));
        assert_eq!(
            e.to_string(),
            "Request failed with 400 Bad Request: Unsupported language"
        );
        assert_eq!(e.description(), Some("Unsupported language"));
    }
}
