//! Console logging for search runs.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (search start/end)
//! - **DEBUG**: Committed steps
//! - **TRACE**: Strategy detail
//!
//! `RUST_LOG` overrides the default filter.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "paintshop=info,paintshop_solver=info";

/// Initializes console logging.
///
/// Safe to call multiple times - only the first call has effect. A global
/// subscriber installed elsewhere is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init();
    });
}
