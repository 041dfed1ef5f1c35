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

//! Request and response encoding for the cloud management REST API.
//!
//! Every resource type in the client library sends its requests through the
//! same selective JSON encoder, and receives its responses through the same
//! envelope decoder. This crate contains both.
//!
//! # Selective encoding
//!
//! A request field can be in one of three states: not specified (omitted from
//! the request), explicitly forced (always sent, even when it holds a zero or
//! empty value), or explicitly null (sent as JSON `null`). Plain `serde`
//! cannot distinguish these states, as `skip_serializing_if` only sees the
//! value. Records carry a [Directives] value listing the names of the fields
//! to force or null, and [to_value] / [to_vec] combine those directives with
//! the field metadata generated by `#[derive(Record)]`.
//!
//! ```
//! use cloudmgmt_wire::{Directives, Record};
//! use serde_json::json;
//!
//! #[derive(Debug, Default, Record)]
//! pub struct Firewall {
//!     pub name: String,
//!     pub enabled: bool,
//!     #[wire(string)]
//!     pub priority: i64,
//!     #[wire(directives)]
//!     pub directives: Directives,
//! }
//!
//! let firewall = Firewall {
//!     name: "fw-1".into(),
//!     directives: Directives::new().force("enabled").null("priority"),
//!     ..Default::default()
//! };
//! let body = cloudmgmt_wire::to_value(&firewall)?;
//! assert_eq!(body, json!({"name": "fw-1", "enabled": false, "priority": null}));
//! # Ok::<(), cloudmgmt_wire::Error>(())
//! ```
//!
//! # Response envelopes
//!
//! All responses share the same wrapper:
//! `{"request": ..., "response": {"status": ..., "items": [...], "count": N}}`.
//! [decode_envelope] parses the wrapper once and keeps each item as undecoded
//! JSON, the caller then decodes the items into the type returned by each
//! endpoint.
//!
//! ```
//! #[derive(Debug, serde::Deserialize)]
//! struct Zone { name: String }
//!
//! let body = br#"{"response": {"items": [{"name": "a"}, {"name": "b"}], "count": 2}}"#;
//! let zones = cloudmgmt_wire::decode_list::<Zone>(body)?;
//! assert_eq!(zones.len(), 2);
//! assert_eq!(zones[1].name, "b");
//! # Ok::<(), cloudmgmt_wire::Error>(())
//! ```

// The derive macro refers to this crate by name, make that name available to
// the unit tests too.
extern crate self as cloudmgmt_wire;

mod classify;
pub use classify::{FieldState, classify};
mod descriptor;
pub use descriptor::{Directives, FieldDescriptor, Record};
mod dynamic;
pub use dynamic::Dynamic;
mod encoder;
pub use encoder::{Selective, to_string, to_value, to_vec};
mod envelope;
pub use envelope::{
    DecodeOptions, Envelope, ResponseBody, Status, decode_envelope, decode_item, decode_list,
    decode_list_with, decode_single, decode_single_with,
};
pub mod error;
pub use error::{Error, Result};
mod field;
pub use field::{Field, Kind, Probe};

#[doc(hidden)]
pub mod internal;

/// Derives [Record] and [Field] for a struct with named fields.
///
/// Field attributes:
/// - `#[wire(rename = "key")]`: the JSON key, defaults to the field name in
///   `lowerCamelCase`. `#[serde(rename = "key")]` is used if present.
/// - `#[wire(skip)]` (or `#[serde(skip)]`): never send this field.
/// - `#[wire(string)]`: send numbers and booleans as JSON strings.
/// - `#[wire(flatten)]` (or `#[serde(flatten)]`): promote the fields of an
///   embedded record into this record.
/// - `#[wire(directives)]`: the [Directives] for this record.
pub use cloudmgmt_wire_derive::Record;
