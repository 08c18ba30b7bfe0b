//! Container options.
//!
//! Options are fixed when a root container is created and are inherited by
//! every child container created from it.

use std::env;

use crate::{DiError, DiResult};

const ENV_DUPLICATES: &str = "FUNQ_DUPLICATE_REGISTRATIONS";
const ENV_DISPOSE_ON_DROP: &str = "FUNQ_DISPOSE_ON_DROP";

/// What `configure` does when two registrations share one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum DuplicatePolicy {
    /// The chronologically first pending registration for a key governs.
    #[default]
    FirstWins,
    /// Collisions fail `configure` with [`DiError::DuplicateRegistration`].
    Reject,
}

impl DuplicatePolicy {
    fn parse(value: &str) -> DiResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first-wins" | "first_wins" | "firstwins" => Ok(DuplicatePolicy::FirstWins),
            "reject" => Ok(DuplicatePolicy::Reject),
            _ => Err(DiError::InvalidOption {
                key: ENV_DUPLICATES,
                value: value.to_string(),
            }),
        }
    }
}

/// Options controlling container behavior.
///
/// # Examples
///
/// ```rust
/// use funq::{Container, ContainerOptions, DuplicatePolicy, DiError};
/// use std::rc::Rc;
///
/// let options = ContainerOptions {
///     duplicate_registrations: DuplicatePolicy::Reject,
///     ..ContainerOptions::default()
/// };
/// let container = Container::with_options(options);
/// container.register::<u32, _>(|_| Ok(Rc::new(1)));
/// container.register::<u32, _>(|_| Ok(Rc::new(2)));
///
/// assert!(matches!(container.configure(), Err(DiError::DuplicateRegistration(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Collision handling during `configure`.
    pub duplicate_registrations: DuplicatePolicy,
    /// Whether dropping a container disposes the instances it owns.
    pub dispose_on_drop: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            duplicate_registrations: DuplicatePolicy::FirstWins,
            dispose_on_drop: true,
        }
    }
}

impl ContainerOptions {
    /// Defaults overridden by `FUNQ_DUPLICATE_REGISTRATIONS` and
    /// `FUNQ_DISPOSE_ON_DROP` when they are set.
    pub fn from_env() -> DiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> DiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(value) = lookup(ENV_DUPLICATES) {
            options.duplicate_registrations = DuplicatePolicy::parse(&value)?;
        }
        if let Some(value) = lookup(ENV_DISPOSE_ON_DROP) {
            options.dispose_on_drop = parse_bool(ENV_DISPOSE_ON_DROP, &value)?;
        }
        Ok(options)
    }

    /// Parses options from JSON; missing fields take their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        serde_json::from_str(json).map_err(|e| DiError::InvalidOption {
            key: "json",
            value: e.to_string(),
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> DiResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DiError::InvalidOption {
            key,
            value: value.to_string(),
        }),
    }
}
