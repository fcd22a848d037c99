use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber: a fmt layer on stderr filtered by
/// `RUST_LOG`, defaulting to `default_filter`. Later calls are no-ops and
/// return `false`.
pub fn init_tracing(default_filter: &str) -> bool {
    if INITIALISED.set(()).is_err() {
        return false;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    // Another subscriber may already be installed by an embedding program.
    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        init_tracing("warn");
        assert!(!init_tracing("debug"));
    }
}
