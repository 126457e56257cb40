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

//! The opaque event payload contract.

use std::any::Any;

use super::error::TypeMismatch;

/// An opaque event payload dispatched through an
/// [`EventSource`](crate::EventSource).
///
/// The dispatch layer never looks inside an event; it only passes it by
/// reference to each attached sink. Sinks identify the payloads they care
/// about by runtime type, using the `get_as` or `valid_type` queries on the
/// `&dyn Event` they receive.
///
/// Implementations only need to provide the [`Any`] view of themselves:
///
/// ```rust
/// use std::any::Any;
/// use plugkit_core::Event;
///
/// struct Resized { width: u32, height: u32 }
///
/// impl Event for Resized {
///     fn as_any(&self) -> &dyn Any { self }
/// }
/// ```
pub trait Event: Any + Send + Sync {
    /// Returns the [`Any`] view of this event, used for runtime type queries.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Event {
    /// Attempts to narrow this event to its concrete type `T`.
    ///
    /// This is a query, not a cast of convenience: callers must be prepared
    /// for [`TypeMismatch`] when the event is not actually a `T`.
    pub fn get_as<T: Event>(&self) -> Result<&T, TypeMismatch> {
        self.as_any()
            .downcast_ref::<T>()
            .ok_or_else(TypeMismatch::for_type::<T>)
    }

    /// Returns `true` if this event's concrete type is `T`.
    ///
    /// Succeeds exactly when [`get_as`](Self::get_as) would succeed for the
    /// same `T`; use it to test before committing to the narrowing call.
    pub fn valid_type<T: Event>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct KeyPressed {
        key_code: String,
    }

    impl Event for KeyPressed {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct ShutdownRequested;

    impl Event for ShutdownRequested {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn narrows_to_concrete_type() {
        let event = KeyPressed {
            key_code: "Esc".to_string(),
        };
        let opaque: &dyn Event = &event;

        assert!(opaque.valid_type::<KeyPressed>());
        let narrowed = opaque.get_as::<KeyPressed>().expect("narrowing failed");
        assert_eq!(narrowed.key_code, "Esc");
    }

    #[test]
    fn mismatched_type_fails_with_error() {
        let event = ShutdownRequested;
        let opaque: &dyn Event = &event;

        assert!(!opaque.valid_type::<KeyPressed>());
        let err = opaque
            .get_as::<KeyPressed>()
            .expect_err("narrowing should fail");
        assert!(err.requested.contains("KeyPressed"));
    }

    #[test]
    fn valid_type_agrees_with_get_as() {
        let event = KeyPressed {
            key_code: "A".to_string(),
        };
        let opaque: &dyn Event = &event;

        assert_eq!(
            opaque.valid_type::<KeyPressed>(),
            opaque.get_as::<KeyPressed>().is_ok()
        );
        assert_eq!(
            opaque.valid_type::<ShutdownRequested>(),
            opaque.get_as::<ShutdownRequested>().is_ok()
        );
    }
}
