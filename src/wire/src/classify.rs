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

//! Decides how each field of a record appears in the request body.

use crate::descriptor::{Directives, FieldDescriptor};
use crate::field::{Kind, Probe};

/// How a single field appears in the encoded object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    /// The field is not in the output.
    Omit,
    /// The field is sent with the zero value of its type.
    SendZero,
    /// The field is sent as JSON `null`.
    SendNull,
    /// The field is sent with its current value.
    SendValue,
    /// The field is an embedded record, its own fields are spliced into the
    /// parent object.
    Embedded,
}

/// Classifies one field given its metadata, the record directives, and a
/// summary of its current value.
///
/// The rules, in priority order:
/// 1. Ignored fields are omitted.
/// 2. Embedded records are spliced, using their own directives.
/// 3. Fields in the null set are sent as `null`, whatever their kind. This
///    includes fields that are also in the forced set.
/// 4. Dynamic fields are omitted if unset and sent otherwise. Forcing them
///    has no effect.
/// 5. Forced fields are sent, with the zero value if they are empty. Forcing
///    never creates a missing nested record.
/// 6. Everything else is omitted if empty.
///
/// # Example
/// ```
/// # use cloudmgmt_wire::*;
/// let descriptor = FieldDescriptor::new("enabled", "enabled");
/// let directives = Directives::new().force("enabled");
/// let state = classify(&descriptor, &directives, false.probe());
/// assert_eq!(state, FieldState::SendZero);
/// ```
pub fn classify(descriptor: &FieldDescriptor, directives: &Directives, probe: Probe) -> FieldState {
    if descriptor.ignore {
        return FieldState::Omit;
    }
    if descriptor.anonymous {
        return FieldState::Embedded;
    }
    let name = descriptor.source_name;
    if directives.is_nulled(name) {
        return FieldState::SendNull;
    }
    if probe.kind == Kind::Dynamic {
        return match probe.absent {
            true => FieldState::Omit,
            false => FieldState::SendValue,
        };
    }
    if directives.is_forced(name) {
        return match probe {
            Probe {
                kind: Kind::OptionalRecord,
                absent: true,
                ..
            } => FieldState::Omit,
            Probe {
                kind: Kind::Record | Kind::OptionalRecord,
                ..
            } => FieldState::SendValue,
            Probe { empty: true, .. } => FieldState::SendZero,
            _ => FieldState::SendValue,
        };
    }
    match probe.empty {
        true => FieldState::Omit,
        false => FieldState::SendValue,
    }
}
