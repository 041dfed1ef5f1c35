// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors returned by the encoder and the envelope decoder.

use crate::envelope::Status;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error returned by all the functions in this crate.
///
/// Most applications just return the error or log it. The predicates
/// distinguish problems encoding a request from problems decoding a response,
/// and [status][Error::status] returns the error reported by the service, if
/// any. The [source][std::error::Error::source] has more details.
///
/// # Example
/// ```
/// use cloudmgmt_wire::Error;
/// match cloudmgmt_wire::decode_envelope(b"not json") {
///     Err(e) if e.is_deserialization() => println!("bad response {e}"),
///     Err(e) => println!("some other error {e}"),
///     Ok(_) => println!("unexpected success"),
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    /// Creates an error representing a problem encoding a request.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use cloudmgmt_wire::Error;
    /// let error = Error::ser("simulated problem");
    /// assert!(error.is_serialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Serialization,
            source: Some(source.into()),
        }
    }

    /// The request could not be encoded.
    ///
    /// # Troubleshooting
    ///
    /// The most common cause is a floating point field holding `NaN` or an
    /// infinite value. JSON numbers cannot represent these values.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// Creates an error representing a problem decoding a response.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use cloudmgmt_wire::Error;
    /// let error = Error::deser("simulated problem");
    /// assert!(error.is_deserialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            source: Some(source.into()),
        }
    }

    /// The response could not be decoded.
    ///
    /// The response was not valid JSON, did not have the expected envelope,
    /// or one of the items did not match the requested type. A list response
    /// with a bad item fails as a whole, the client library never returns a
    /// partial list.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Creates an error with the status reported by the service.
    ///
    /// # Example
    /// ```
    /// use cloudmgmt_wire::{Error, Status};
    /// let status = Status::default().set_code(404).set_message("NOT FOUND");
    /// let error = Error::service(status.clone());
    /// assert_eq!(error.status(), Some(&status));
    /// ```
    pub fn service(status: Status) -> Self {
        Self {
            kind: ErrorKind::Service(Box::new(status)),
            source: None,
        }
    }

    /// The status reported by the service, if this is a service error.
    pub fn status(&self) -> Option<&Status> {
        match &self.kind {
            ErrorKind::Service(s) => Some(s.as_ref()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::Serialization, Some(e)) => write!(f, "cannot serialize the request {e}"),
            (ErrorKind::Deserialization, Some(e)) => {
                write!(f, "cannot deserialize the response {e}")
            }
            (ErrorKind::Service(s), _) => write!(
                f,
                "the service reports an error with code {} described as: {}",
                s.code, s.message
            ),
            (_, None) => unreachable!("no constructor allows this"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &dyn StdError)
    }
}

#[derive(Debug)]
enum ErrorKind {
    Serialization,
    Deserialization,
    Service(Box<Status>),
}

/// Details about an encoding error, available as the error
/// [source][std::error::Error::source].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EncodeError {
    /// JSON numbers cannot represent `NaN` or infinite values.
    #[error("non-finite floating point value {0} cannot be encoded as a JSON number")]
    NonFinite(f64),

    /// A dynamically typed value could not be converted to JSON.
    #[error("cannot encode dynamic value: {0}")]
    Dynamic(#[source] serde_json::Error),

    /// The encoded record produced invalid JSON text.
    #[error("cannot write JSON text: {0}")]
    Json(#[source] serde_json::Error),
}

/// Details about a decoding error, available as the error
/// [source][std::error::Error::source].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// The response is not JSON, or does not have the expected envelope.
    #[error("malformed response envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// One of the items does not match the requested type.
    #[error("cannot decode item {index} as {type_name}: {source}")]
    Item {
        index: usize,
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A standalone item does not match the requested type.
    #[error("cannot decode item as {type_name}: {source}")]
    Payload {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A dynamically typed value does not match the requested type.
    #[error("cannot decode dynamic value: {0}")]
    Dynamic(#[source] serde_json::Error),

    /// The envelope count does not match the number of items.
    #[error("the response envelope reports {count} items but contains {found}")]
    CountMismatch { count: u64, found: usize },
}
