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

//! Provides the foundational primitives for event-driven communication.
//!
//! This module contains the generic observer machinery used by anything that
//! needs to fire events at interested parties: a [`EventSource`] owns an
//! [`ObserverRegistry`] of weak references to attached [`EventSink`]s and
//! dispatches opaque [`Event`] payloads to whichever of them are still alive.
//!
//! By keeping the payload type opaque (identified only by runtime type),
//! `plugkit-core` stays decoupled from the specific event types defined in
//! higher-level crates, which filter events with the `get_as` and
//! `valid_type` queries on `dyn Event`.

mod error;
mod event;
mod registry;
mod sink;
mod source;

pub use self::error::TypeMismatch;
pub use self::event::Event;
pub use self::registry::ObserverRegistry;
pub use self::sink::EventSink;
pub use self::source::{into_shared, EventSource};
