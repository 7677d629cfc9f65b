//! Tracing support for graph mutations.
//!
//! With the `tracing` feature enabled, graph operations open debug spans and
//! emit events through the `tracing` crate.  Without it, the same macros
//! expand to no-ops.

#[cfg(feature = "tracing")]
mod enabled {
    use std::sync::Once;

    pub(crate) use tracing::{debug, debug_span, trace};

    /// Installs a `fmt` subscriber that writes through the test harness.
    /// Safe to call from many tests; only the first call has an effect.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::TRACE)
                .with_test_writer()
                .try_init();
        });
    }
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    pub fn init_tracing() {
        // No-op when tracing is disabled
    }

    macro_rules! debug_span {
        ($($args:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    macro_rules! debug {
        ($($args:tt)*) => {{}};
    }

    macro_rules! trace {
        ($($args:tt)*) => {{}};
    }

    pub(crate) use {debug, debug_span, trace};

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(feature = "tracing")]
pub(crate) use enabled::{debug, debug_span, trace};
#[cfg(feature = "tracing")]
pub use enabled::init_tracing;

#[cfg(not(feature = "tracing"))]
pub(crate) use disabled::{debug, debug_span, trace};
#[cfg(not(feature = "tracing"))]
pub use disabled::{NoOpSpan, NoOpSpanGuard, init_tracing};
