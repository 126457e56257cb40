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

//! The event source contract and its construction factory.

use std::any::Any;
use std::sync::{Arc, Weak};

use super::error::TypeMismatch;
use super::event::Event;
use super::registry::ObserverRegistry;
use super::sink::EventSink;

/// An object that fires events at attached [`EventSink`] observers.
///
/// Implement this for any type that needs to emit events (a window, a
/// stream, a device). The implementation is two accessor methods; attach,
/// detach, dispatch, and self-handle minting are all provided:
///
/// ```rust
/// use std::any::Any;
/// use plugkit_core::{into_shared, EventSource, ObserverRegistry};
///
/// struct Stream {
///     registry: ObserverRegistry,
/// }
///
/// impl EventSource for Stream {
///     fn registry(&self) -> &ObserverRegistry { &self.registry }
///     fn as_any(&self) -> &dyn Any { self }
/// }
///
/// let stream = into_shared(Stream { registry: ObserverRegistry::new() });
/// ```
///
/// Sources must be created through [`into_shared`], which seeds the weak
/// self-handle behind [`source_ref`](Self::source_ref) and
/// [`send_event`](Self::send_event). A source constructed any other way will
/// panic on its first dispatch.
pub trait EventSource: Any + Send + Sync {
    /// Returns the observer registry embedded in this source.
    fn registry(&self) -> &ObserverRegistry;

    /// Returns the [`Any`] view of this source, used for runtime type
    /// queries.
    fn as_any(&self) -> &dyn Any;

    /// Attaches `sink` to receive events from this source.
    ///
    /// The source records only a weak reference: it never extends the sink's
    /// lifetime. Attaching the same sink twice registers it twice; see
    /// [`ObserverRegistry`] for the duplicate semantics.
    fn attach_observer(&self, sink: &Arc<dyn EventSink>) {
        self.registry().attach(sink);
    }

    /// Detaches `sink` so it no longer receives events from this source.
    ///
    /// Removes every entry for the sink; a sink that is not attached is a
    /// silent no-op.
    fn detach_observer(&self, sink: &Arc<dyn EventSink>) {
        self.registry().detach(sink);
    }

    /// Sends `event` to all attached sinks, in attach order.
    ///
    /// Returns `true` if any live sink reported handling the event, `false`
    /// otherwise (including when nothing is attached). Sinks that were
    /// dropped since attaching are skipped without error. A strong handle to
    /// this source is held for the duration of the pass, so a handler cannot
    /// destroy the source out from under the dispatch loop.
    ///
    /// # Panics
    ///
    /// Panics if the source was not created through [`into_shared`].
    fn send_event(&self, event: &dyn Event) -> bool {
        let this = self.registry().source_handle();
        self.registry().dispatch(event, this.as_ref())
    }

    /// Returns a new owning handle to this source.
    ///
    /// Use this to hand the source to code that needs ownership when all you
    /// have inside a method is `&self`.
    ///
    /// # Panics
    ///
    /// Panics if the source was not created through [`into_shared`] (or if
    /// its last owning handle is already gone). That is a programming error,
    /// not a recoverable condition.
    fn source_ref(&self) -> Arc<dyn EventSource> {
        self.registry().source_handle()
    }
}

impl dyn EventSource {
    /// Attempts to narrow this source to its concrete type `T`.
    ///
    /// This is a query, not a cast of convenience: callers must be prepared
    /// for [`TypeMismatch`] when the source is not actually a `T`. The
    /// object is left untouched either way.
    pub fn get_as<T: EventSource>(&self) -> Result<&T, TypeMismatch> {
        self.as_any()
            .downcast_ref::<T>()
            .ok_or_else(TypeMismatch::for_type::<T>)
    }

    /// Returns `true` if this source's concrete type is `T`.
    ///
    /// Succeeds exactly when [`get_as`](Self::get_as) would succeed for the
    /// same `T`; use it to test a capability before committing to the
    /// narrowing call.
    pub fn valid_type<T: EventSource>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Wraps a concrete source in an [`Arc`] and enrolls its self-handle.
///
/// This is the only supported way to create a usable [`EventSource`]: the
/// factory seeds the weak self-reference that [`EventSource::source_ref`]
/// and [`EventSource::send_event`] rely on.
pub fn into_shared<T: EventSource>(source: T) -> Arc<T> {
    let shared = Arc::new(source);
    let weak = Arc::downgrade(&shared);
    let handle: Weak<dyn EventSource> = weak;
    shared.registry().enroll(handle);
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct WindowSource {
        registry: ObserverRegistry,
        title: &'static str,
    }

    impl EventSource for WindowSource {
        fn registry(&self) -> &ObserverRegistry {
            &self.registry
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Debug)]
    struct StreamSource {
        registry: ObserverRegistry,
    }

    impl EventSource for StreamSource {
        fn registry(&self) -> &ObserverRegistry {
            &self.registry
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Ping;

    impl Event for Ping {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn window() -> Arc<WindowSource> {
        into_shared(WindowSource {
            registry: ObserverRegistry::new(),
            title: "main",
        })
    }

    #[test]
    fn narrows_to_concrete_source_type() {
        let source = window();
        let opaque: Arc<dyn EventSource> = source;

        assert!(opaque.valid_type::<WindowSource>());
        let narrowed = opaque.get_as::<WindowSource>().expect("narrowing failed");
        assert_eq!(narrowed.title, "main");
    }

    #[test]
    fn mismatched_source_type_fails_with_error() {
        let source = window();
        let opaque: Arc<dyn EventSource> = source;

        assert!(!opaque.valid_type::<StreamSource>());
        let err = opaque
            .get_as::<StreamSource>()
            .expect_err("narrowing should fail");
        assert!(err.requested.contains("StreamSource"));

        // The failed query must leave the source usable.
        assert!(opaque.valid_type::<WindowSource>());
    }

    #[test]
    fn source_ref_points_to_the_same_allocation() {
        let source = window();
        let minted = source.source_ref();

        let original = Arc::as_ptr(&source) as *const ();
        let reissued = Arc::as_ptr(&minted) as *const ();
        assert_eq!(original, reissued);
    }

    #[test]
    #[should_panic(expected = "into_shared")]
    fn source_ref_without_enrollment_is_fatal() {
        let orphan = WindowSource {
            registry: ObserverRegistry::new(),
            title: "orphan",
        };
        let _ = orphan.source_ref();
    }

    /// Asserts inside the handler that the source reference it receives can
    /// be narrowed back to the concrete source type.
    struct NarrowingSink {
        saw_window: AtomicBool,
    }

    impl EventSink for NarrowingSink {
        fn handle_event(&self, _event: &dyn Event, source: &dyn EventSource) -> bool {
            if source.valid_type::<WindowSource>() {
                self.saw_window.store(true, Ordering::SeqCst);
            }
            source.get_as::<WindowSource>().is_ok()
        }
    }

    #[test]
    fn handler_receives_a_narrowable_source_reference() {
        let source = window();
        let sink = Arc::new(NarrowingSink {
            saw_window: AtomicBool::new(false),
        });
        source.attach_observer(&(sink.clone() as Arc<dyn EventSink>));

        assert!(source.send_event(&Ping));
        assert!(sink.saw_window.load(Ordering::SeqCst));
    }

    /// Mints an owning handle to the source from inside a handler.
    struct HandleMintingSink {
        minted: std::sync::Mutex<Option<Arc<dyn EventSource>>>,
    }

    impl EventSink for HandleMintingSink {
        fn handle_event(&self, _event: &dyn Event, source: &dyn EventSource) -> bool {
            *self.minted.lock().unwrap() = Some(source.source_ref());
            true
        }
    }

    #[test]
    fn handler_can_mint_an_owning_handle_to_the_source() {
        let source = window();
        let sink = Arc::new(HandleMintingSink {
            minted: std::sync::Mutex::new(None),
        });
        source.attach_observer(&(sink.clone() as Arc<dyn EventSink>));

        assert!(source.send_event(&Ping));

        let minted = sink.minted.lock().unwrap().take().expect("no handle minted");
        assert_eq!(
            Arc::as_ptr(&minted) as *const (),
            Arc::as_ptr(&source) as *const ()
        );
    }
}
