use std::{fmt, str::FromStr};

use shared::protocol::DEFAULT_BACKEND_URL;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid backend address '{input}': {source}")]
    InvalidBase {
        input: String,
        source: url::ParseError,
    },
    #[error("unsupported backend scheme '{0}'; expected http or https")]
    UnsupportedScheme(String),
    #[error("cannot resolve '{location}' against backend address: {source}")]
    InvalidLocation {
        location: String,
        source: url::ParseError,
    },
}

/// Origin the controller targets for uploads and resolves result locations against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendAddress {
    base: Url,
}

impl BackendAddress {
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let input = input.trim();
        let base = Url::parse(input).map_err(|source| AddressError::InvalidBase {
            input: input.to_string(),
            source,
        })?;
        if !is_http(&base) {
            return Err(AddressError::UnsupportedScheme(base.scheme().to_string()));
        }
        Ok(Self { base })
    }

    pub fn local_default() -> Result<Self, AddressError> {
        Self::parse(DEFAULT_BACKEND_URL)
    }

    pub fn as_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, AddressError> {
        self.prefixed(path.trim())
    }

    /// Turns a backend-returned output location into an absolute URL.
    ///
    /// Relative locations are appended to the base address verbatim (not RFC 3986 joined),
    /// so a base path such as `/api` is preserved. Absolute http(s) locations pass through.
    pub fn resolve(&self, location: &str) -> Result<Url, AddressError> {
        let location = location.trim();
        if let Ok(absolute) = Url::parse(location) {
            if is_http(&absolute) {
                if absolute.origin() != self.base.origin() {
                    debug!(
                        result = %absolute,
                        backend = %self,
                        "output location points outside the backend origin"
                    );
                }
                return Ok(absolute);
            }
        }
        self.prefixed(location)
    }

    fn prefixed(&self, path: &str) -> Result<Url, AddressError> {
        let base = self.base.as_str().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Url::parse(&joined).map_err(|source| AddressError::InvalidLocation {
            location: path.to_string(),
            source,
        })
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

impl FromStr for BackendAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BackendAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str().trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_output_against_base() {
        let address = BackendAddress::parse("http://localhost:5000").expect("address");
        let resolved = address.resolve("/files/out.mp4").expect("resolve");
        assert_eq!(resolved.as_str(), "http://localhost:5000/files/out.mp4");
    }

    #[test]
    fn keeps_base_path_and_normalises_slashes() {
        let address = BackendAddress::parse("https://media.example/api/").expect("address");
        assert_eq!(
            address.endpoint("/upload").expect("endpoint").as_str(),
            "https://media.example/api/upload"
        );
        assert_eq!(
            address.resolve("download/a.mp4").expect("resolve").as_str(),
            "https://media.example/api/download/a.mp4"
        );
    }

    #[test]
    fn absolute_output_location_passes_through() {
        let address = BackendAddress::parse("http://localhost:5000").expect("address");
        let resolved = address
            .resolve("https://cdn.example/processed.mp4")
            .expect("resolve");
        assert_eq!(resolved.as_str(), "https://cdn.example/processed.mp4");
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(matches!(
            BackendAddress::parse("ftp://localhost:5000"),
            Err(AddressError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
        assert!(matches!(
            BackendAddress::parse("not a url"),
            Err(AddressError::InvalidBase { .. })
        ));
    }

    #[test]
    fn displays_without_trailing_slash() {
        let address = BackendAddress::local_default().expect("address");
        assert_eq!(address.to_string(), "http://localhost:5000");
    }
}
