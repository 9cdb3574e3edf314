#![allow(clippy::missing_errors_doc)]

//! Single-line share strings for exchanging routes over chat or clipboard.

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};

use crate::route_file::RouteFile;

const SNAPSHOT_DOMAIN: &str = "waveroute";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded route payload.
pub(crate) const SNAPSHOT_HEADER: &str = "waveroute:v1";
/// Delimiter used to separate the prefix, waypoint count and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes a route into a single-line string suitable for clipboard transfer.
pub(crate) fn encode(route: &RouteFile) -> String {
    let json = serde_json::to_vec(route).expect("route serialization never fails");
    let encoded = STANDARD_NO_PAD.encode(json);
    format!("{SNAPSHOT_HEADER}:{}:{encoded}", route.waypoints.len())
}

/// Decodes a route from the provided share-string representation.
pub(crate) fn decode(value: &str) -> Result<RouteFile, RouteTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RouteTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(RouteTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(RouteTransferError::MissingVersion)?;
    let count = parts.next().ok_or(RouteTransferError::MissingCount)?;
    let payload = parts.next().ok_or(RouteTransferError::MissingPayload)?;

    if domain != SNAPSHOT_DOMAIN {
        return Err(RouteTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SNAPSHOT_VERSION {
        return Err(RouteTransferError::UnsupportedVersion(version.to_owned()));
    }

    let count = count
        .trim()
        .parse::<usize>()
        .map_err(|_| RouteTransferError::InvalidCount(count.to_owned()))?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(RouteTransferError::InvalidEncoding)?;
    let route: RouteFile =
        serde_json::from_slice(&bytes).map_err(RouteTransferError::InvalidPayload)?;

    if route.waypoints.len() != count {
        return Err(RouteTransferError::CountMismatch {
            declared: count,
            actual: route.waypoints.len(),
        });
    }

    Ok(route)
}

/// Errors that can occur while decoding route share strings.
#[derive(Debug)]
pub(crate) enum RouteTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded route.
    MissingPrefix,
    /// The encoded route did not contain a version segment.
    MissingVersion,
    /// The encoded route did not include the waypoint count.
    MissingCount,
    /// The encoded route did not include the payload segment.
    MissingPayload,
    /// The encoded route used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded route used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The waypoint count could not be parsed from the encoded route.
    InvalidCount(String),
    /// The declared waypoint count disagreed with the decoded payload.
    CountMismatch {
        /// Count announced in the header.
        declared: usize,
        /// Number of waypoints actually carried by the payload.
        actual: usize,
    },
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for RouteTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "share string was empty"),
            Self::MissingPrefix => write!(f, "share string is missing the prefix"),
            Self::MissingVersion => write!(f, "share string is missing the version"),
            Self::MissingCount => write!(f, "share string is missing the waypoint count"),
            Self::MissingPayload => write!(f, "share string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "share prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "share version '{version}' is not supported")
            }
            Self::InvalidCount(count) => {
                write!(f, "could not parse waypoint count '{count}'")
            }
            Self::CountMismatch { declared, actual } => {
                write!(
                    f,
                    "share string declares {declared} waypoints but carries {actual}"
                )
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode route payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse route payload: {error}")
            }
        }
    }
}

impl Error for RouteTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}
