// Copyright 2026 plugkit
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the event dispatch layer.

use thiserror::Error;

/// A runtime capability query asked for a type the object does not have.
///
/// Returned by [`dyn EventSource::get_as`](crate::EventSource) and
/// [`dyn Event::get_as`](crate::Event) when the requested concrete type does
/// not match the object's actual type. Recoverable: callers can inspect the
/// error, or avoid it entirely by checking with `valid_type` first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("runtime type query failed: object is not a `{requested}`")]
pub struct TypeMismatch {
    /// Name of the concrete type the caller asked for.
    pub requested: &'static str,
}

impl TypeMismatch {
    /// Builds the error for a failed narrowing to `T`.
    pub(crate) fn for_type<T>() -> Self {
        Self {
            requested: std::any::type_name::<T>(),
        }
    }
}
