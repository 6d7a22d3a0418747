pub mod toml_config;

use std::sync::LazyLock;

/// Message recorded when `add` is called without one.
pub const DEFAULT_MESSAGE: &str = "Maintenance mode is enabled";

/// Owner used when the process identity cannot be determined.
pub const FALLBACK_OWNER: &str = "unknown";

static PROCESS_DEFAULTS: LazyLock<Defaults> = LazyLock::new(Defaults::from_env);

/// Values used by `add` and `remove` when the caller supplies none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub owner: String,
    pub message: String,
}

impl Defaults {
    /// `user@host` when both are known, otherwise [`FALLBACK_OWNER`].
    pub fn from_identity(user: Option<&str>, host: Option<&str>) -> Self {
        let owner = match (user, host) {
            (Some(user), Some(host)) if !user.is_empty() && !host.is_empty() => {
                format!("{}@{}", user, host)
            }
            _ => FALLBACK_OWNER.to_string(),
        };

        Self {
            owner,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Identity from the `USER` and `HOSTNAME` environment variables.
    pub fn from_env() -> Self {
        let user = std::env::var("USER").ok();
        let host = std::env::var("HOSTNAME").ok();
        Self::from_identity(user.as_deref(), host.as_deref())
    }

    /// Computed from the environment on first use, then fixed for the process.
    pub fn process() -> &'static Defaults {
        &PROCESS_DEFAULTS
    }
}
