//! Minimal end-to-end tour of the event dispatch layer: a window-like
//! source fires typed events at two observers, one of which filters by
//! runtime event type.

use std::any::Any;
use std::sync::Arc;

use plugkit_core::{into_shared, Event, EventSink, EventSource, ObserverRegistry};

/// A stand-in for a real windowing source.
struct Window {
    registry: ObserverRegistry,
    title: String,
}

impl Window {
    fn new(title: &str) -> Self {
        Self {
            registry: ObserverRegistry::new(),
            title: title.to_string(),
        }
    }
}

impl EventSource for Window {
    fn registry(&self) -> &ObserverRegistry {
        &self.registry
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Resized {
    width: u32,
    height: u32,
}

impl Event for Resized {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Redraw;

impl Event for Redraw {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Logs every event it sees, without claiming any of them.
struct Tracer;

impl EventSink for Tracer {
    fn handle_event(&self, _event: &dyn Event, source: &dyn EventSource) -> bool {
        let title = source
            .get_as::<Window>()
            .map(|window| window.title.as_str())
            .unwrap_or("<unknown source>");
        log::info!("[tracer] event observed from '{title}'");
        false
    }
}

/// Only consumes resize events; everything else passes through.
struct ResizeWatcher;

impl EventSink for ResizeWatcher {
    fn handle_event(&self, event: &dyn Event, _source: &dyn EventSource) -> bool {
        match event.get_as::<Resized>() {
            Ok(resized) => {
                log::info!("[resize] {}x{}", resized.width, resized.height);
                true
            }
            Err(_) => false,
        }
    }
}

fn main() {
    env_logger::init();

    let window = into_shared(Window::new("sandbox"));
    let tracer: Arc<dyn EventSink> = Arc::new(Tracer);
    let watcher: Arc<dyn EventSink> = Arc::new(ResizeWatcher);

    window.attach_observer(&tracer);
    window.attach_observer(&watcher);

    let consumed = window.send_event(&Resized {
        width: 1280,
        height: 720,
    });
    log::info!("resize consumed: {consumed}");

    let consumed = window.send_event(&Redraw);
    log::info!("redraw consumed: {consumed}");

    // Dropping an observer is a valid way to unsubscribe: the source holds
    // only weak references and skips the dead entry on the next dispatch.
    drop(watcher);
    let consumed = window.send_event(&Resized {
        width: 640,
        height: 480,
    });
    log::info!("resize after watcher dropped, consumed: {consumed}");

    window.detach_observer(&tracer);
    log::info!(
        "observers remaining: {}",
        window.registry().observer_count()
    );
}
