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

//! The selective JSON encoder.

use crate::Result;
use crate::classify::{FieldState, classify};
use crate::descriptor::Record;
use crate::error::{EncodeError, Error};
use crate::field::{Kind, Probe};
use serde_json::{Map, Value};

/// Encodes a record into a JSON object.
///
/// Fields are included, forced to their zero value, or set to `null` as
/// described in [classify]. Embedded records contribute their fields directly
/// to the returned object.
pub fn to_value(record: &dyn Record) -> Result<Value> {
    let _span = tracing::debug_span!("encode", record = record.type_name()).entered();
    encode_record(record)
}

/// Encodes a record into the bytes of a JSON object, suitable as a request
/// body.
pub fn to_vec(record: &dyn Record) -> Result<Vec<u8>> {
    let value = to_value(record)?;
    serde_json::to_vec(&value).map_err(|e| Error::ser(EncodeError::Json(e)))
}

/// Encodes a record into a JSON string.
pub fn to_string(record: &dyn Record) -> Result<String> {
    let value = to_value(record)?;
    serde_json::to_string(&value).map_err(|e| Error::ser(EncodeError::Json(e)))
}

/// Adapts a record to [serde::Serialize] using the selective encoder.
///
/// Useful with HTTP clients that accept any `Serialize` value as the request
/// body.
///
/// # Example
/// ```
/// # use cloudmgmt_wire::{Directives, Record, Selective};
/// #[derive(Default, Record)]
/// struct Label {
///     value: String,
///     #[wire(directives)]
///     directives: Directives,
/// }
/// let label = Label { directives: Directives::new().force("value"), ..Default::default() };
/// let body = serde_json::to_string(&Selective(&label))?;
/// assert_eq!(body, r#"{"value":""}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct Selective<'a>(pub &'a dyn Record);

impl serde::ser::Serialize for Selective<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::Error as _;
        to_value(self.0)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl std::fmt::Debug for Selective<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Selective").field(&self.0.type_name()).finish()
    }
}

pub(crate) fn encode_record(record: &dyn Record) -> Result<Value> {
    let mut object = Map::new();
    encode_into(record, &mut object)?;
    Ok(Value::Object(object))
}

fn encode_into(record: &dyn Record, object: &mut Map<String, Value>) -> Result<()> {
    let directives = record.directives();
    if !directives.is_empty() {
        check_directives(record);
    }
    for (index, descriptor) in record.descriptors().iter().enumerate() {
        let Some(field) = record.field(index) else {
            continue;
        };
        let state = classify(descriptor, directives, field.probe());
        tracing::trace!(field = descriptor.source_name, ?state);
        let key = descriptor.output_key;
        match state {
            FieldState::Omit => {}
            FieldState::SendNull => {
                object.insert(key.to_string(), Value::Null);
            }
            FieldState::SendZero => {
                object.insert(key.to_string(), field.encode_zero(descriptor.string_encode));
            }
            FieldState::SendValue => {
                object.insert(key.to_string(), field.encode(descriptor.string_encode)?);
            }
            FieldState::Embedded => {
                if let Some(embedded) = field.as_record() {
                    encode_into(embedded, object)?;
                }
            }
        }
    }
    Ok(())
}

// Directives naming unknown fields, or naming the same field twice, are
// programming errors in the caller. They do not fail the request.
fn check_directives(record: &dyn Record) {
    let descriptors = record.descriptors();
    let directives = record.directives();
    let known = |name: &str| descriptors.iter().any(|d| d.source_name == name);
    for name in directives.forced().chain(directives.nulled()) {
        if !known(name) {
            tracing::warn!(
                record = record.type_name(),
                field = name,
                "directive names a field that does not exist, ignoring it"
            );
        }
    }
    for name in directives.forced().filter(|n| directives.is_nulled(n)) {
        tracing::warn!(
            record = record.type_name(),
            field = name,
            "field is both forced and nulled, sending null"
        );
    }
}

/// Probes a by-value nested record.
///
/// The record is empty if it would encode to an empty object.
pub(crate) fn probe_record(record: &dyn Record) -> Probe {
    Probe::new(Kind::Record, is_empty_record(record))
}

fn is_empty_record(record: &dyn Record) -> bool {
    let directives = record.directives();
    record
        .descriptors()
        .iter()
        .enumerate()
        .all(|(index, descriptor)| {
            let Some(field) = record.field(index) else {
                return true;
            };
            match classify(descriptor, directives, field.probe()) {
                FieldState::Omit => true,
                FieldState::Embedded => field.as_record().is_none_or(is_empty_record),
                _ => false,
            }
        })
}
