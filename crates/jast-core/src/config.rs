//! Computed fields registry configuration.

/// Environment variable marking an interactive session, where computed
/// fields are routinely redefined.
pub const INTERACTIVE_ENV: &str = "JAST_INTERACTIVE";

/// What `register` does when a field name is already taken for a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateFieldPolicy {
    /// Fail with `AstError::DuplicateField`.
    #[default]
    Reject,
    /// Replace the earlier computator.
    Overwrite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    pub duplicate_policy: DuplicateFieldPolicy,
}

impl RegistryConfig {
    pub fn new(duplicate_policy: DuplicateFieldPolicy) -> Self {
        RegistryConfig { duplicate_policy }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_interactive_flag(std::env::var(INTERACTIVE_ENV).ok().as_deref())
    }

    fn from_interactive_flag(flag: Option<&str>) -> Self {
        let interactive = flag.is_some_and(|value| {
            matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
        });
        let duplicate_policy = if interactive {
            DuplicateFieldPolicy::Overwrite
        } else {
            DuplicateFieldPolicy::Reject
        };
        RegistryConfig { duplicate_policy }
    }
}
