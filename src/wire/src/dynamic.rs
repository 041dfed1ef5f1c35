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

use crate::Result;
use crate::descriptor::Record;
use crate::error::{DecodeError, EncodeError, Error};
use crate::field::{Field, Kind, Probe};
use serde_json::Value;

/// A dynamically typed field value.
///
/// Some API fields accept any JSON value. For these fields the request must
/// distinguish a field that was never assigned (omitted from the request)
/// from a field assigned a value that happens to be null (sent as `null`).
/// An `Option<serde_json::Value>` conflates the two, this type does not.
///
/// Forcing a dynamic field has no effect, as there is no zero value to force.
///
/// # Example
/// ```
/// # use cloudmgmt_wire::{Dynamic, Record};
/// # use serde_json::json;
/// #[derive(Default, Record)]
/// struct Metadata {
///     payload: Dynamic,
/// }
/// let unset = Metadata::default();
/// assert_eq!(cloudmgmt_wire::to_value(&unset)?, json!({}));
///
/// let typed_nil: Option<String> = None;
/// let null = Metadata { payload: Dynamic::from_serialize(&typed_nil)? };
/// assert_eq!(cloudmgmt_wire::to_value(&null)?, json!({"payload": null}));
/// # Ok::<(), cloudmgmt_wire::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Dynamic {
    /// Nothing was assigned.
    #[default]
    Unset,
    /// A value was assigned, and it is null.
    Null,
    /// A value was assigned.
    Value(Value),
}

impl Dynamic {
    /// Creates a dynamic value from anything that serializes to JSON.
    ///
    /// Values that serialize to `null`, such as `None`, become
    /// [Dynamic::Null].
    pub fn from_serialize<T>(value: &T) -> Result<Self>
    where
        T: serde::ser::Serialize + ?Sized,
    {
        let value = serde_json::to_value(value).map_err(|e| Error::ser(EncodeError::Dynamic(e)))?;
        Ok(Self::from(value))
    }

    /// Creates a dynamic value from a record, using the selective encoder.
    pub fn from_record(record: &dyn Record) -> Result<Self> {
        crate::encoder::encode_record(record).map(Self::Value)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The payload, if a non-null value was assigned.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Decodes the payload into a concrete type.
    ///
    /// Unset and null values decode as JSON `null`, which succeeds for
    /// `Option<T>` targets.
    pub fn try_into_value<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let value = self.value().cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| Error::deser(DecodeError::Dynamic(e)))
    }
}

impl From<Value> for Dynamic {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            v => Self::Value(v),
        }
    }
}

impl Field for Dynamic {
    fn probe(&self) -> Probe {
        match self {
            Self::Unset => Probe::absent(Kind::Dynamic),
            Self::Null => Probe::new(Kind::Dynamic, true),
            Self::Value(_) => Probe::new(Kind::Dynamic, false),
        }
    }

    fn encode(&self, _string_encode: bool) -> Result<Value> {
        Ok(self.value().cloned().unwrap_or(Value::Null))
    }

    fn encode_zero(&self, _string_encode: bool) -> Value {
        Value::Null
    }

    fn kind_of() -> Kind {
        Kind::Dynamic
    }

    fn zero_of(_string_encode: bool) -> Value {
        Value::Null
    }
}

impl serde::ser::Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        match self {
            Self::Value(v) => v.serialize(serializer),
            _ => serializer.serialize_unit(),
        }
    }
}

/// A missing key is only [Dynamic::Unset] if the field uses
/// `#[serde(default)]`.
impl<'de> serde::de::Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from(value))
    }
}
