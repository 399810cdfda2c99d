use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tracing::{subscriber::DefaultGuard, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer, Registry,
};

/// Counts `warn!` and `error!` events emitted on the current thread.
#[derive(Clone, Default)]
pub struct Diagnostics(Arc<AtomicUsize>);

impl Diagnostics {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for Diagnostics {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() <= Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Install a counting subscriber for the rest of the test. `#[tokio::test]`
/// runs on a current-thread runtime, so the whole test body is covered.
pub fn capture_diagnostics() -> (Diagnostics, DefaultGuard) {
    let diagnostics = Diagnostics::default();
    let subscriber = Registry::default().with(diagnostics.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (diagnostics, guard)
}
