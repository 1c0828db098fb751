//! Logging bootstrap.
//!
//! `init` installs a `tracing-subscriber` fmt subscriber once per process and
//! returns a [`LogHandle`]. Every launcher component takes the handle by
//! reference and parents its events to the handle's root span, so the log
//! lifecycle is explicit: nothing logs before `init` returned the handle.

use std::sync::OnceLock;

use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

static SUBSCRIBER_INIT: OnceLock<()> = OnceLock::new();

/// Logging settings for the launcher process.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Name recorded on the root span.
    pub name: &'static str,
    /// Fallback filter directive used when `RUST_LOG` is absent or invalid.
    pub default_filter: String,
    /// Emit ANSI colours.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "devlaunch",
            default_filter: DEFAULT_FILTER.to_owned(),
            ansi: true,
        }
    }
}

/// Explicit logging handle passed to each launcher component.
#[derive(Debug, Clone)]
pub struct LogHandle {
    span: Span,
}

impl LogHandle {
    /// Handle whose events are not attached to any span.
    ///
    /// Used by tests and by callers that manage their own subscriber.
    #[must_use]
    pub fn detached() -> Self {
        Self { span: Span::none() }
    }

    /// Handle bound to whatever span is current on this thread.
    #[must_use]
    pub fn current() -> Self {
        Self {
            span: Span::current(),
        }
    }

    /// Root span every component event is parented to.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }
}

/// Install the process subscriber (if none is active yet) and open the root span.
///
/// The subscriber honours `RUST_LOG`; otherwise `cfg.default_filter` applies.
/// Calling this more than once only opens a new root span.
#[must_use]
pub fn init(cfg: &LoggingConfig) -> LogHandle {
    SUBSCRIBER_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&cfg.default_filter));

        // Another subscriber may already be installed (e.g. by a test harness).
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(cfg.ansi)
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
    });

    LogHandle {
        span: tracing::info_span!("launcher", name = cfg.name, pid = std::process::id()),
    }
}
