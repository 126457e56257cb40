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

//! The observer registry backing every event source.

use std::sync::{Arc, Mutex, OnceLock, Weak};

use super::event::Event;
use super::sink::EventSink;
use super::source::EventSource;

/// Ordered collection of weak references to attached [`EventSink`]s.
///
/// Every concrete [`EventSource`] embeds one of these and exposes it through
/// [`EventSource::registry`]; the trait's provided methods do all their work
/// here. The registry confers no ownership: entries whose sink has been
/// dropped become inert and are skipped (or swept out) rather than
/// dereferenced.
///
/// # Locking
///
/// A single [`Mutex`] guards the entry list. The lock is held for attach,
/// detach, and the snapshot step of a dispatch, but **never** across sink
/// callbacks: [`dispatch`](Self::dispatch) upgrades the live entries into a
/// snapshot first and releases the lock before invoking anyone. That is what
/// makes re-entrant attach/detach/send from inside a handler safe, and it is
/// also why observers attached mid-pass are not visited until the next pass.
///
/// # Duplicates
///
/// Attaching the same sink twice registers it twice, and it will receive
/// each subsequent event twice. This mirrors the list semantics callers
/// expect from an ordered registry; a single [`detach`](Self::detach)
/// removes every entry for the sink at once.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    observers: Mutex<Vec<Weak<dyn EventSink>>>,
    self_handle: OnceLock<Weak<dyn EventSource>>,
}

impl ObserverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
            self_handle: OnceLock::new(),
        }
    }

    /// Seeds the weak self-handle of the owning source.
    ///
    /// Called exactly once by [`into_shared`](super::into_shared); a second
    /// enrollment keeps the original handle.
    pub(crate) fn enroll(&self, handle: Weak<dyn EventSource>) {
        if self.self_handle.set(handle).is_err() {
            log::warn!("event source enrolled twice; keeping the original handle");
        }
    }

    /// Returns a new owning handle to the source that embeds this registry.
    ///
    /// # Panics
    ///
    /// Panics if the source was never enrolled through
    /// [`into_shared`](super::into_shared), or if its last owning handle is
    /// already gone. Both indicate a programming error in the caller, not a
    /// recoverable condition.
    pub fn source_handle(&self) -> Arc<dyn EventSource> {
        self.self_handle
            .get()
            .and_then(Weak::upgrade)
            .unwrap_or_else(|| {
                panic!("event source has no live owning handle; construct sources with `into_shared`")
            })
    }

    /// Records a weak reference to `sink`.
    ///
    /// No uniqueness check is performed; see the type-level notes on
    /// duplicates. Always succeeds.
    pub fn attach(&self, sink: &Arc<dyn EventSink>) {
        let mut observers = self.observers.lock().unwrap();
        observers.push(Arc::downgrade(sink));
        log::trace!("observer attached ({} entries)", observers.len());
    }

    /// Removes every entry referring to `sink`.
    ///
    /// Identity is the sink's allocation, so all duplicate attachments go at
    /// once. Detaching a sink that is not attached is a silent no-op. The
    /// sweep also drops entries whose sink has been dropped; those were
    /// already inert, so this is invisible to callers.
    pub fn detach(&self, sink: &Arc<dyn EventSink>) {
        let target = Arc::as_ptr(sink) as *const ();
        let mut observers = self.observers.lock().unwrap();
        let before = observers.len();
        observers.retain(|entry| match entry.upgrade() {
            Some(live) => Arc::as_ptr(&live) as *const () != target,
            None => false,
        });
        log::trace!(
            "observer detached ({} entries removed)",
            before - observers.len()
        );
    }

    /// Returns the number of registered entries whose sink is still alive.
    ///
    /// Duplicate attachments count once per entry.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }

    /// Dispatches `event` to every live observer, in attach order.
    ///
    /// Takes a snapshot of the live sinks under the lock, releases the lock,
    /// then invokes each sink with `(event, source)`. Entries whose sink is
    /// gone are skipped without error. Returns `true` if any invoked sink
    /// reported handling the event; `false` otherwise, including when the
    /// registry is empty.
    pub fn dispatch(&self, event: &dyn Event, source: &dyn EventSource) -> bool {
        let snapshot: Vec<Arc<dyn EventSink>> = {
            let observers = self.observers.lock().unwrap();
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        log::trace!("dispatching event to {} live observer(s)", snapshot.len());

        let mut handled = false;
        for sink in &snapshot {
            handled |= sink.handle_event(event, source);
        }
        handled
    }
}
