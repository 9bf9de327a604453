#![forbid(unsafe_code)]

//! Color mode context with page-scoped overrides.
//!
//! [`ThemeContext`] is the single source of truth for the rendered color
//! mode. It holds the user's stored preference plus a stack of overrides,
//! each keyed by the page that registered it.
//!
//! # Invariants
//!
//! 1. Exactly one effective mode: the most recent override if any, else the
//!    preference.
//! 2. Releasing an override removes only the releasing owner's entry, so a
//!    page can never leave a stale override behind after it unmounts.
//! 3. Toggling always flips the preference. While an override is active the
//!    effective mode does not change; the new preference shows once the
//!    override is released.
//!
//! # Failure Modes
//!
//! | Scenario | Behavior |
//! |----------|----------|
//! | Second owner registers while one is active | Warn, stack both |
//! | Same owner registers twice | Replace its mode, no duplicate entry |
//! | Release by an owner that holds nothing | No-op, returns `false` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rendered color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light backgrounds, dark text.
    #[default]
    Light,
    /// Dark backgrounds, light text.
    Dark,
}

impl ThemeMode {
    /// The opposite mode.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stable lowercase name, also used as the stored preference value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// CSS class applied to the application root.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownThemeMode(pub String);

impl fmt::Display for UnknownThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme mode: {:?}", self.0)
    }
}

impl std::error::Error for UnknownThemeMode {}

impl FromStr for ThemeMode {
    type Err = UnknownThemeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownThemeMode(other.to_string())),
        }
    }
}

/// An active page-scoped override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ThemeOverride {
    owner: &'static str,
    mode: ThemeMode,
}

/// Process-wide theme state.
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    preference: ThemeMode,
    overrides: Vec<ThemeOverride>,
}

impl ThemeContext {
    /// Create a context with the given stored preference and no overrides.
    pub fn new(preference: ThemeMode) -> Self {
        Self {
            preference,
            overrides: Vec::new(),
        }
    }

    /// The mode that should be rendered right now.
    pub fn effective(&self) -> ThemeMode {
        self.overrides
            .last()
            .map_or(self.preference, |o| o.mode)
    }

    /// The user's preference, ignoring overrides.
    pub fn preference(&self) -> ThemeMode {
        self.preference
    }

    /// Owner of the override currently in force, if any.
    pub fn override_owner(&self) -> Option<&'static str> {
        self.overrides.last().map(|o| o.owner)
    }

    /// Whether any override is active.
    pub fn is_overridden(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Flip the stored preference and return the new preference.
    pub fn toggle(&mut self) -> ThemeMode {
        self.preference = self.preference.flipped();
        tracing::debug!(
            preference = %self.preference,
            effective = %self.effective(),
            "theme preference toggled"
        );
        self.preference
    }

    /// Register an override for `owner`.
    pub fn push_override(&mut self, owner: &'static str, mode: ThemeMode) {
        if let Some(existing) = self.overrides.iter_mut().find(|o| o.owner == owner) {
            existing.mode = mode;
            return;
        }
        if let Some(current) = self.override_owner() {
            tracing::warn!(
                current,
                owner,
                "theme override registered while another owner holds one"
            );
        }
        self.overrides.push(ThemeOverride { owner, mode });
        tracing::debug!(owner, %mode, "theme override pushed");
    }

    /// Release the override held by `owner`. Returns `true` if one was held.
    pub fn release_override(&mut self, owner: &'static str) -> bool {
        let before = self.overrides.len();
        self.overrides.retain(|o| o.owner != owner);
        let released = self.overrides.len() != before;
        if released {
            tracing::debug!(owner, effective = %self.effective(), "theme override released");
        }
        released
    }

    /// Page-scope registration: `true` forces `mode` for `owner`, `false`
    /// releases whatever `owner` holds.
    pub fn set_is_home_page(&mut self, owner: &'static str, active: bool, mode: ThemeMode) {
        if active {
            self.push_override(owner, mode);
        } else {
            self.release_override(owner);
        }
    }
}
