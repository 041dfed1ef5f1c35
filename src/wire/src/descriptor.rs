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

use crate::field::Field;
use std::collections::BTreeSet;

/// Static metadata for one field of a [Record] type.
///
/// The `#[derive(Record)]` macro creates one descriptor per field, in
/// declaration order, and stores them in a `static` table. The table is never
/// modified after it is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct FieldDescriptor {
    /// The name of the field in the Rust type, as used in [Directives].
    pub source_name: &'static str,
    /// The JSON key for the field. Empty if and only if `ignore` is set.
    pub output_key: &'static str,
    /// The field is never serialized.
    pub ignore: bool,
    /// Numbers and booleans are sent as JSON strings.
    pub string_encode: bool,
    /// The field is an embedded record, its fields are promoted into the
    /// parent object.
    pub anonymous: bool,
}

impl FieldDescriptor {
    /// Creates a descriptor for a field sent under `output_key`.
    pub const fn new(source_name: &'static str, output_key: &'static str) -> Self {
        Self {
            source_name,
            output_key,
            ignore: false,
            string_encode: false,
            anonymous: false,
        }
    }

    /// Creates a descriptor for a field that is never serialized.
    pub const fn ignored(source_name: &'static str) -> Self {
        Self {
            source_name,
            output_key: "",
            ignore: true,
            string_encode: false,
            anonymous: false,
        }
    }

    /// Creates a descriptor for an embedded record.
    ///
    /// Embedded records have no key of their own.
    pub const fn embedded(source_name: &'static str) -> Self {
        Self {
            source_name,
            output_key: "",
            ignore: false,
            string_encode: false,
            anonymous: true,
        }
    }

    /// Marks the field as string-encoded.
    pub const fn with_string_encoding(mut self) -> Self {
        self.string_encode = true;
        self
    }
}

/// The per-call directives for a record: which fields to force and which
/// fields to send as `null`.
///
/// Field names are the Rust field names (the descriptor's `source_name`), not
/// the JSON keys. A name in both sets is a programming error, the record is
/// encoded as if the name was only in the `null` set.
///
/// # Example
/// ```
/// # use cloudmgmt_wire::Directives;
/// let directives = Directives::new().force("enabled").null("description");
/// assert!(directives.is_forced("enabled"));
/// assert!(directives.is_nulled("description"));
/// assert!(!directives.is_forced("description"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directives {
    forced: BTreeSet<String>,
    nulled: BTreeSet<String>,
}

static EMPTY: Directives = Directives {
    forced: BTreeSet::new(),
    nulled: BTreeSet::new(),
};

impl Directives {
    /// Creates an empty set of directives.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared, empty, set of directives.
    ///
    /// Used by records that do not have a directives field.
    pub fn empty() -> &'static Directives {
        &EMPTY
    }

    /// Send the field even if it holds a zero or empty value.
    pub fn force<T: Into<String>>(mut self, name: T) -> Self {
        self.forced.insert(name.into());
        self
    }

    /// Send the field as JSON `null`.
    pub fn null<T: Into<String>>(mut self, name: T) -> Self {
        self.nulled.insert(name.into());
        self
    }

    /// Adds a field to the forced set.
    pub fn set_forced<T: Into<String>>(&mut self, name: T) {
        self.forced.insert(name.into());
    }

    /// Adds a field to the null set.
    pub fn set_nulled<T: Into<String>>(&mut self, name: T) {
        self.nulled.insert(name.into());
    }

    pub fn is_forced(&self, name: &str) -> bool {
        self.forced.contains(name)
    }

    pub fn is_nulled(&self, name: &str) -> bool {
        self.nulled.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.forced.is_empty() && self.nulled.is_empty()
    }

    /// The names in the forced set, in lexicographic order.
    pub fn forced(&self) -> impl Iterator<Item = &str> {
        self.forced.iter().map(String::as_str)
    }

    /// The names in the null set, in lexicographic order.
    pub fn nulled(&self) -> impl Iterator<Item = &str> {
        self.nulled.iter().map(String::as_str)
    }

    /// Removes all the directives, typically after a request is sent.
    pub fn clear(&mut self) {
        self.forced.clear();
        self.nulled.clear();
    }
}

/// A type with a static table of [FieldDescriptor]s.
///
/// Implemented by `#[derive(Record)]`, application code should have no need
/// to implement this trait manually. The trait is object safe, the encoder
/// works with `&dyn Record`.
pub trait Record {
    /// The name of the Rust type, used in logs and errors.
    fn type_name(&self) -> &'static str;

    /// The field descriptors, in declaration order.
    fn descriptors(&self) -> &'static [FieldDescriptor];

    /// The directives for the current encode call.
    fn directives(&self) -> &Directives;

    /// The value of the field described by `descriptors()[index]`.
    ///
    /// Returns `None` for ignored fields and for out of range indices.
    fn field(&self, index: usize) -> Option<&dyn Field>;
}
