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

//! The observer-side contract of the event dispatch layer.

use super::event::Event;
use super::source::EventSource;

/// An observer capable of receiving events from an [`EventSource`].
///
/// A sink is owned exclusively by its creator; the source it attaches to
/// holds only a weak reference and never extends its lifetime. Dropping the
/// last owning handle to a sink is a valid way to stop receiving events,
/// with no detach call required.
///
/// Handlers may re-enter the source that is dispatching to them: calling
/// `attach_observer`, `detach_observer`, or `send_event` on `source` from
/// inside [`handle_event`](Self::handle_event) is safe and will not
/// deadlock. A sink attached during a dispatch pass is not visited by that
/// pass.
pub trait EventSink: Send + Sync {
    /// Processes one event dispatched by `source`.
    ///
    /// Returns `true` if this sink consumed the event. Returning `true` does
    /// not stop propagation; every live sink in the pass is still invoked,
    /// and the source aggregates the results.
    fn handle_event(&self, event: &dyn Event, source: &dyn EventSource) -> bool;
}
