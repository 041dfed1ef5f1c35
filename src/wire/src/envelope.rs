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

//! Decodes the envelope shared by all API responses.

use crate::Result;
use crate::error::{DecodeError, Error};
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

/// The wrapper around every response.
///
/// The items are kept as undecoded JSON. The same envelope wraps every
/// resource kind, the caller decodes the items into the type returned by
/// each endpoint.
#[derive(Clone, Debug, serde::Deserialize)]
#[non_exhaustive]
pub struct Envelope {
    /// An echo of the request, as sent by the service.
    #[serde(default)]
    pub request: Option<Box<RawValue>>,
    pub response: ResponseBody,
}

/// The `response` object in an [Envelope].
///
/// Services sometimes send `null` for `status` or `items`; both decode as
/// their default.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct ResponseBody {
    #[serde_as(as = "serde_with::DefaultOnNull")]
    pub status: Status,
    #[serde_as(as = "serde_with::DefaultOnNull")]
    pub items: Vec<Box<RawValue>>,
    /// The number of items, if reported by the service.
    pub count: Option<u64>,
}

/// The status reported in a response envelope.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Status {
    /// The status code. Some services send it as a string.
    #[serde_as(as = "serde_with::DefaultOnNull<crate::internal::Lenient>")]
    pub code: i64,
    #[serde_as(as = "serde_with::DefaultOnNull")]
    pub message: String,
}

impl Status {
    /// Sets the value for [code][Status::code].
    pub fn set_code<T: Into<i64>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    /// Sets the value for [message][Status::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    /// Returns true if the status reports success.
    ///
    /// Services report success as `0` (or a missing status), or as an HTTP
    /// success code.
    pub fn is_ok(&self) -> bool {
        self.code == 0 || (200..300).contains(&self.code)
    }
}

/// Options to decode a response envelope.
///
/// # Example
/// ```
/// # use cloudmgmt_wire::DecodeOptions;
/// let options = DecodeOptions::default().set_check_status(true);
/// assert!(options.check_status());
/// assert!(options.verify_count());
/// ```
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    verify_count: bool,
    check_status: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            verify_count: true,
            check_status: false,
        }
    }
}

impl DecodeOptions {
    /// Fail list decoding if the envelope `count` differs from the number of
    /// items. Enabled by default.
    pub fn set_verify_count(mut self, v: bool) -> Self {
        self.verify_count = v;
        self
    }

    pub fn verify_count(&self) -> bool {
        self.verify_count
    }

    /// Convert a non-success envelope status into a service error. Disabled
    /// by default, as the transport layer usually reports these errors.
    pub fn set_check_status(mut self, v: bool) -> Self {
        self.check_status = v;
        self
    }

    pub fn check_status(&self) -> bool {
        self.check_status
    }
}

/// Parses the envelope, without decoding the items.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope> {
    let envelope = serde_json::from_slice::<Envelope>(bytes)
        .map_err(|e| Error::deser(DecodeError::Envelope(e)))?;
    tracing::debug!(
        items = envelope.response.items.len(),
        count = envelope.response.count,
        code = envelope.response.status.code,
        "decoded response envelope"
    );
    Ok(envelope)
}

/// Decodes one item from an envelope.
pub fn decode_item<T>(item: &RawValue) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(item.get()).map_err(|source| {
        Error::deser(DecodeError::Payload {
            type_name: std::any::type_name::<T>(),
            source,
        })
    })
}

/// Decodes all the items in a list response.
pub fn decode_list<T>(bytes: &[u8]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    decode_list_with(bytes, &DecodeOptions::default())
}

/// Decodes all the items in a list response, using custom options.
pub fn decode_list_with<T>(bytes: &[u8], options: &DecodeOptions) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let _span = tracing::debug_span!("decode_list", item = std::any::type_name::<T>()).entered();
    let envelope = decode_envelope(bytes)?;
    if options.check_status {
        envelope.check_status()?;
    }
    envelope.decode_items(options.verify_count)
}

/// Decodes the first item in a response, if any.
///
/// Create, read, and update operations return a single item.
pub fn decode_single<T>(bytes: &[u8]) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    decode_single_with(bytes, &DecodeOptions::default())
}

/// Decodes the first item in a response, if any, using custom options.
pub fn decode_single_with<T>(bytes: &[u8], options: &DecodeOptions) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let _span = tracing::debug_span!("decode_single", item = std::any::type_name::<T>()).entered();
    let envelope = decode_envelope(bytes)?;
    if options.check_status {
        envelope.check_status()?;
    }
    envelope.into_first()
}

impl Envelope {
    /// The undecoded items.
    pub fn items(&self) -> &[Box<RawValue>] {
        &self.response.items
    }

    pub fn status(&self) -> &Status {
        &self.response.status
    }

    /// Returns a service error if the envelope status is not a success.
    pub fn check_status(&self) -> Result<()> {
        match self.response.status.is_ok() {
            true => Ok(()),
            false => Err(Error::service(self.response.status.clone())),
        }
    }

    /// Decodes every item, in order.
    ///
    /// Fails if any item fails to decode, or if the envelope `count` does not
    /// match the number of items.
    pub fn into_items<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.decode_items(true)
    }

    /// Decodes the first item, returns `None` if there are no items.
    pub fn into_first<T>(self) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.response
            .items
            .first()
            .map(|item| decode_item::<T>(item))
            .transpose()
    }

    fn decode_items<T>(&self, verify_count: bool) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let items = &self.response.items;
        match self.response.count {
            Some(count) if verify_count && count != items.len() as u64 => {
                return Err(Error::deser(DecodeError::CountMismatch {
                    count,
                    found: items.len(),
                }));
            }
            _ => {}
        }
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_str(item.get()).map_err(|source| {
                    Error::deser(DecodeError::Item {
                        index,
                        type_name: std::any::type_name::<T>(),
                        source,
                    })
                })
            })
            .collect()
    }
}
