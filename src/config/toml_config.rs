use crate::config::Defaults;
use crate::utils::error::{MaintenanceError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid placeholder pattern: {e}"))
});

/// On-disk form of [`Defaults`]:
///
/// ```toml
/// [defaults]
/// owner = "${USER}@release-host"
/// message = "Frozen for the quarterly release"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsFile {
    #[serde(default)]
    pub defaults: DefaultsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsSection {
    pub owner: Option<String>,
    pub message: Option<String>,
}

impl Validate for DefaultsFile {
    fn validate(&self) -> Result<()> {
        let section = &self.defaults;
        for (field, value) in [("defaults.owner", &section.owner), ("defaults.message", &section.message)] {
            if let Some(value) = value {
                validate_non_empty_string(field, value).map_err(|e| MaintenanceError::ConfigError {
                    message: e.to_string(),
                })?;
            }
        }
        Ok(())
    }
}

impl DefaultsFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        let file: Self = toml::from_str(&processed).map_err(|e| MaintenanceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Fill unset values from `base`.
    pub fn resolve(self, base: &Defaults) -> Defaults {
        Defaults {
            owner: self.defaults.owner.unwrap_or_else(|| base.owner.clone()),
            message: self.defaults.message.unwrap_or_else(|| base.message.clone()),
        }
    }
}

impl Defaults {
    /// Defaults from TOML text; anything not set comes from [`Defaults::process`].
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(DefaultsFile::from_toml_str(content)?.resolve(Defaults::process()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }
}

/// Replace `${VAR}` with the variable's value; unknown variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    ENV_PLACEHOLDER
        .replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MESSAGE;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_defaults() {
        let defaults = Defaults::from_toml_str(
            r#"
[defaults]
owner = "release-bot"
message = "Frozen for release"
"#,
        )
        .unwrap();

        assert_eq!(defaults.owner, "release-bot");
        assert_eq!(defaults.message, "Frozen for release");
    }

    #[test]
    fn test_missing_values_fall_back() {
        let defaults = Defaults::from_toml_str("").unwrap();
        assert_eq!(&defaults, Defaults::process());

        let defaults = Defaults::from_toml_str("[defaults]\nowner = \"bob\"\n").unwrap();
        assert_eq!(defaults.owner, "bob");
        assert_eq!(defaults.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("REPO_MAINTENANCE_TEST_OWNER", "carol");
        let defaults =
            Defaults::from_toml_str("[defaults]\nowner = \"${REPO_MAINTENANCE_TEST_OWNER}@host\"\n")
                .unwrap();
        assert_eq!(defaults.owner, "carol@host");

        let defaults = Defaults::from_toml_str(
            "[defaults]\nowner = \"${REPO_MAINTENANCE_SURELY_UNSET_VAR}\"\n",
        )
        .unwrap();
        assert_eq!(defaults.owner, "${REPO_MAINTENANCE_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Defaults::from_toml_str("[defaults]\nowner = \"  \"\n").unwrap_err();
        assert!(matches!(err, MaintenanceError::ConfigError { .. }));

        let err = Defaults::from_toml_str("[defaults]\ncolour = \"red\"\n").unwrap_err();
        assert!(matches!(err, MaintenanceError::ConfigError { .. }));

        let err = Defaults::from_toml_str("[defaults").unwrap_err();
        assert!(matches!(err, MaintenanceError::ConfigError { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\nmessage = \"Disk migration\"").unwrap();

        let defaults = Defaults::from_file(file.path()).unwrap();
        assert_eq!(defaults.message, "Disk migration");

        let err = Defaults::from_file("/nonexistent/maintenance.toml").unwrap_err();
        assert!(matches!(err, MaintenanceError::IoError(_)));
    }
}
