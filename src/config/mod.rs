//! Dispatcher configuration (layered: code > env > defaults).

use std::sync::OnceLock;

/// Global default config (lazy-initialized from env).
static DEFAULT_CONFIG: OnceLock<DispatchConfig> = OnceLock::new();

const VALIDATE_ARGUMENTS_ENV: &str = "TOOLCALL_VALIDATE_ARGUMENTS";
const VERBOSE_ENV: &str = "TOOLCALL_VERBOSE";

/// Settings for the call dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Check arguments against the tool schema before invoking.
    ///
    /// Off by default: argument problems then surface as ordinary function
    /// errors from binding.
    pub validate_arguments: bool,
    /// Log dispatches at `info` instead of `debug`.
    pub verbose: bool,
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validate_arguments(mut self, validate: bool) -> Self {
        self.validate_arguments = validate;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Load from environment variables (TOOLCALL_VALIDATE_ARGUMENTS, TOOLCALL_VERBOSE).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Get (or create) the global default config.
    pub fn global() -> &'static DispatchConfig {
        DEFAULT_CONFIG.get_or_init(Self::from_env)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).map(|v| parse_flag(&v)).unwrap_or(false);
        Self {
            validate_arguments: flag(VALIDATE_ARGUMENTS_ENV),
            verbose: flag(VERBOSE_ENV),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
