use std::io;
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "meal_suggest_rs=info";
const VERBOSE_DIRECTIVE: &str = "meal_suggest_rs=debug";

/// Install the stderr subscriber. Later calls are no-ops.
///
/// `RUST_LOG` wins over the defaults; `verbose` raises the crate to debug.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        let directive = if verbose {
            VERBOSE_DIRECTIVE
        } else {
            DEFAULT_DIRECTIVE
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .try_init();
    });
}
