use std::{
    fs,
    path::{Path, PathBuf},
    sync::Once,
};

use dirs::data_dir;

const DEFAULT_DIR_NAME: &str = "budget-tracker";
const DEFAULT_FILTER: &str = "budget_tracker=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, honouring `RUST_LOG` when set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A subscriber installed by an embedding test harness wins.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Returns the platform data directory for the service, defaulting to `./data`.
pub fn default_data_dir() -> PathBuf {
    data_dir()
        .map(|base| base.join(DEFAULT_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}
