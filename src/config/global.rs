use std::sync::OnceLock;

use super::AppConfig;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Load and install the process-wide configuration. Later calls are no-ops.
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::load)
}

/// Panics if `init_config` has not run yet.
pub fn get_config() -> &'static AppConfig {
    CONFIG
        .get()
        .expect("config not initialized, call init_config() first")
}
