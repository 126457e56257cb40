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

//! # Plugkit Core
//!
//! Foundational crate containing the traits, core types, and interface
//! contracts of the plugkit event dispatch layer.
//!
//! The central abstraction is the [`EventSource`]/[`EventSink`] pair: a
//! source owns a registry of weakly-referenced observers and fans typed
//! [`Event`]s out to them, while sinks remain owned exclusively by their
//! creators and may disappear at any time without corrupting the source.

#![warn(missing_docs)]

pub mod event;

pub use event::{into_shared, Event, EventSink, EventSource, ObserverRegistry, TypeMismatch};
