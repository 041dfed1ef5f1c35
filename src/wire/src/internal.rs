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

//! Implementation details used by `#[derive(Record)]` and by the generated
//! resource types.
//!
//! These items are not part of the public API. They are undocumented and may
//! change at any time.

use crate::Result;
use crate::descriptor::Record;
use crate::field::Probe;
pub use serde_json::Value;

/// Accepts a value in its natural JSON type or as a string.
///
/// Fields encoded with `#[wire(string)]` are sent as strings, and some
/// services echo them back as strings too. Use this with `serde_with` to
/// decode both forms:
///
/// ```
/// #[serde_with::serde_as]
/// #[derive(serde::Deserialize)]
/// struct Volume {
///     #[serde_as(as = "cloudmgmt_wire::internal::Lenient")]
///     size: i64,
/// }
/// let v: Volume = serde_json::from_str(r#"{"size": "1152921504606846976"}"#)?;
/// assert_eq!(v.size, 1_i64 << 60);
/// let v: Volume = serde_json::from_str(r#"{"size": 42}"#)?;
/// assert_eq!(v.size, 42);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub type Lenient = serde_with::PickFirst<(serde_with::Same, serde_with::DisplayFromStr)>;

pub fn probe_record(record: &dyn Record) -> Probe {
    crate::encoder::probe_record(record)
}

pub fn encode_record(record: &dyn Record) -> Result<Value> {
    crate::encoder::encode_record(record)
}

pub fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
