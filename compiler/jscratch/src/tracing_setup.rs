use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Installs a hierarchical subscriber filtered by `RUST_LOG`, so nested
/// statements and lambda calls print as an indented tree. Does nothing when
/// `RUST_LOG` is unset or another subscriber is already installed. Safe to
/// call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let tree = HierarchicalLayer::new(2)
                .with_targets(true)
                .with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tree)
                .try_init();
        }
    });
}
