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

//! Probing and encoding of individual field values.

use crate::Result;
use crate::descriptor::Record;
use crate::error::{EncodeError, Error};
use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, HashMap};

/// The shape of a field, as seen by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Booleans, numbers and strings.
    Scalar,
    /// Lists.
    Sequence,
    /// Maps with string keys.
    Mapping,
    /// A nested record held by value.
    Record,
    /// A nested record behind an `Option`.
    OptionalRecord,
    /// An open, dynamically typed value. See [Dynamic][crate::Dynamic].
    Dynamic,
}

/// A summary of a live field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    pub kind: Kind,
    /// The value is the zero or empty value for its type.
    pub empty: bool,
    /// No value at all: a `None` optional, or an unset dynamic value.
    pub absent: bool,
}

impl Probe {
    pub fn new(kind: Kind, empty: bool) -> Self {
        Self {
            kind,
            empty,
            absent: false,
        }
    }

    pub fn absent(kind: Kind) -> Self {
        Self {
            kind,
            empty: true,
            absent: true,
        }
    }
}

/// A value that can be a field in a [Record].
///
/// Implemented for the scalar types, `String`, `Option`, `Box`, `Vec`, maps
/// with string keys, [serde_json::Value], [Dynamic][crate::Dynamic] and any
/// type using `#[derive(Record)]`.
pub trait Field {
    /// Summarizes the current value for the classifier.
    fn probe(&self) -> Probe;

    /// Encodes the current value.
    fn encode(&self, string_encode: bool) -> Result<Value>;

    /// Encodes the zero value of this field's type.
    ///
    /// For optional fields this is the zero value of the wrapped type.
    fn encode_zero(&self, string_encode: bool) -> Value;

    /// Returns the value as a record, if it is one.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// The kind of any value of this type.
    fn kind_of() -> Kind
    where
        Self: Sized;

    /// The zero value of this type.
    fn zero_of(string_encode: bool) -> Value
    where
        Self: Sized;
}

fn as_string<T: std::fmt::Display>(value: T) -> Value {
    Value::String(value.to_string())
}

impl Field for bool {
    fn probe(&self) -> Probe {
        Probe::new(Kind::Scalar, !*self)
    }

    fn encode(&self, string_encode: bool) -> Result<Value> {
        Ok(match string_encode {
            true => as_string(self),
            false => Value::Bool(*self),
        })
    }

    fn encode_zero(&self, string_encode: bool) -> Value {
        Self::zero_of(string_encode)
    }

    fn kind_of() -> Kind {
        Kind::Scalar
    }

    fn zero_of(string_encode: bool) -> Value {
        match string_encode {
            true => as_string(false),
            false => Value::Bool(false),
        }
    }
}

macro_rules! integer_field {
    ($($t:ty),*) => {
        $(
            impl Field for $t {
                fn probe(&self) -> Probe {
                    Probe::new(Kind::Scalar, *self == 0)
                }

                fn encode(&self, string_encode: bool) -> Result<Value> {
                    Ok(match string_encode {
                        true => as_string(self),
                        false => Value::Number(Number::from(*self)),
                    })
                }

                fn encode_zero(&self, string_encode: bool) -> Value {
                    Self::zero_of(string_encode)
                }

                fn kind_of() -> Kind {
                    Kind::Scalar
                }

                fn zero_of(string_encode: bool) -> Value {
                    match string_encode {
                        true => as_string(0),
                        false => Value::Number(Number::from(0)),
                    }
                }
            }
        )*
    };
}

integer_field!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! float_field {
    ($($t:ty),*) => {
        $(
            impl Field for $t {
                fn probe(&self) -> Probe {
                    Probe::new(Kind::Scalar, *self == 0.0)
                }

                fn encode(&self, string_encode: bool) -> Result<Value> {
                    let value = f64::from(*self);
                    match string_encode {
                        true => Ok(special_float(value).unwrap_or_else(|| as_string(self))),
                        false => Number::from_f64(value)
                            .map(Value::Number)
                            .ok_or_else(|| Error::ser(EncodeError::NonFinite(value))),
                    }
                }

                fn encode_zero(&self, string_encode: bool) -> Value {
                    Self::zero_of(string_encode)
                }

                fn kind_of() -> Kind {
                    Kind::Scalar
                }

                fn zero_of(string_encode: bool) -> Value {
                    match string_encode {
                        true => as_string(0),
                        false => Value::from(0.0),
                    }
                }
            }
        )*
    };
}

float_field!(f32, f64);

// JSON numbers cannot represent these, string-encoded fields use the ProtoJSON
// spelling.
fn special_float(value: f64) -> Option<Value> {
    match value {
        x if x.is_nan() => Some(as_string("NaN")),
        x if x.is_infinite() && x.is_sign_negative() => Some(as_string("-Infinity")),
        x if x.is_infinite() => Some(as_string("Infinity")),
        _ => None,
    }
}

impl Field for String {
    fn probe(&self) -> Probe {
        Probe::new(Kind::Scalar, self.is_empty())
    }

    fn encode(&self, _string_encode: bool) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }

    fn encode_zero(&self, _string_encode: bool) -> Value {
        Value::String(String::new())
    }

    fn kind_of() -> Kind {
        Kind::Scalar
    }

    fn zero_of(_string_encode: bool) -> Value {
        Value::String(String::new())
    }
}

impl<T: Field> Field for Option<T> {
    fn probe(&self) -> Probe {
        let kind = match T::kind_of() {
            Kind::Record => Kind::OptionalRecord,
            k => k,
        };
        match self {
            None => Probe::absent(kind),
            // A present optional is never empty, `Some(0)` is sent as `0`.
            Some(_) => Probe::new(kind, false),
        }
    }

    fn encode(&self, string_encode: bool) -> Result<Value> {
        match self {
            None => Ok(Value::Null),
            Some(v) => v.encode(string_encode),
        }
    }

    fn encode_zero(&self, string_encode: bool) -> Value {
        T::zero_of(string_encode)
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(|v| v.as_record())
    }

    fn kind_of() -> Kind {
        match T::kind_of() {
            Kind::Record => Kind::OptionalRecord,
            k => k,
        }
    }

    fn zero_of(string_encode: bool) -> Value {
        T::zero_of(string_encode)
    }
}

impl<T: Field> Field for Box<T> {
    fn probe(&self) -> Probe {
        self.as_ref().probe()
    }

    fn encode(&self, string_encode: bool) -> Result<Value> {
        self.as_ref().encode(string_encode)
    }

    fn encode_zero(&self, string_encode: bool) -> Value {
        self.as_ref().encode_zero(string_encode)
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().as_record()
    }

    fn kind_of() -> Kind {
        T::kind_of()
    }

    fn zero_of(string_encode: bool) -> Value {
        T::zero_of(string_encode)
    }
}

impl<T: Field> Field for Vec<T> {
    fn probe(&self) -> Probe {
        Probe::new(Kind::Sequence, self.is_empty())
    }

    fn encode(&self, string_encode: bool) -> Result<Value> {
        self.iter()
            .map(|v| v.encode(string_encode))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn encode_zero(&self, _string_encode: bool) -> Value {
        Value::Array(Vec::new())
    }

    fn kind_of() -> Kind {
        Kind::Sequence
    }

    fn zero_of(_string_encode: bool) -> Value {
        Value::Array(Vec::new())
    }
}

fn encode_entries<'a, I, T>(entries: I, string_encode: bool) -> Result<Value>
where
    I: Iterator<Item = (&'a String, &'a T)>,
    T: Field + 'a,
{
    entries
        .map(|(k, v)| Ok((k.clone(), v.encode(string_encode)?)))
        .collect::<Result<Map<_, _>>>()
        .map(Value::Object)
}

impl<T: Field> Field for BTreeMap<String, T> {
    fn probe(&self) -> Probe {
        Probe::new(Kind::Mapping, self.is_empty())
    }

    fn encode(&self, string_encode: bool) -> Result<Value> {
        encode_entries(self.iter(), string_encode)
    }

    fn encode_zero(&self, _string_encode: bool) -> Value {
        Value::Object(Map::new())
    }

    fn kind_of() -> Kind {
        Kind::Mapping
    }

    fn zero_of(_string_encode: bool) -> Value {
        Value::Object(Map::new())
    }
}

impl<T: Field, S> Field for HashMap<String, T, S> {
    fn probe(&self) -> Probe {
        Probe::new(Kind::Mapping, self.is_empty())
    }

    fn encode(&self, string_encode: bool) -> Result<Value> {
        encode_entries(self.iter(), string_encode)
    }

    fn encode_zero(&self, _string_encode: bool) -> Value {
        Value::Object(Map::new())
    }

    fn kind_of() -> Kind {
        Kind::Mapping
    }

    fn zero_of(_string_encode: bool) -> Value {
        Value::Object(Map::new())
    }
}

/// Free-form JSON, such as a `labels` object with arbitrary values.
///
/// Behaves like [Dynamic][crate::Dynamic]: `Value::Null` is absent and any
/// other value, including `false`, `0`, `""`, `{}` and `[]`, is sent as-is.
impl Field for Value {
    fn probe(&self) -> Probe {
        match self {
            Value::Null => Probe::absent(Kind::Dynamic),
            _ => Probe::new(Kind::Dynamic, false),
        }
    }

    fn encode(&self, _string_encode: bool) -> Result<Value> {
        Ok(self.clone())
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
