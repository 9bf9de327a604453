#![forbid(unsafe_code)]

//! Site configuration.
//!
//! The host hands a JSON document to the site at mount time. Every field
//! has a default, so `{}` is a valid configuration; the defaults describe a
//! placeholder owner and an unconfigured relay. No credentials ship as
//! defaults.
//!
//! ```
//! use folio_site::config::SiteConfig;
//!
//! let cfg = SiteConfig::from_json(r#"{ "owner": { "name": "Sam Rivera" } }"#).unwrap();
//! assert_eq!(cfg.owner.name, "Sam Rivera");
//! assert_eq!(cfg.shell.scroll_threshold, 50.0);
//! assert!(!cfg.relay.is_configured());
//! ```

use std::fmt;

use folio_core::theme::ThemeMode;
use serde::{Deserialize, Serialize};

use crate::rain::{MIN_CELL_SIZE, RainConfig};

/// Errors produced while loading configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The document is not valid JSON or has the wrong shape.
    Parse(String),
    /// A field holds a value outside its accepted range.
    Invalid {
        /// Dotted field path, e.g. `rain.cellSize`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid site configuration: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid value for {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Complete site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Who the portfolio belongs to.
    pub owner: OwnerConfig,
    /// Direct contact details and social links.
    pub contact: ContactConfig,
    /// Color mode defaults and persistence.
    pub theme: ThemeConfig,
    /// Layout shell tuning.
    pub shell: ShellConfig,
    /// Animated background tuning.
    pub rain: RainConfig,
    /// Outbound email relay.
    pub relay: RelayConfig,
    /// Static asset locations.
    pub assets: AssetConfig,
    /// Maximum log level: `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner: OwnerConfig::default(),
            contact: ContactConfig::default(),
            theme: ThemeConfig::default(),
            shell: ShellConfig::default(),
            rain: RainConfig::default(),
            relay: RelayConfig::default(),
            assets: AssetConfig::default(),
            log_level: "info".into(),
        }
    }
}

/// Owner identity shown in the header, hero and footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OwnerConfig {
    pub name: String,
    pub title: String,
    pub tagline: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            name: "Avery Quinn".into(),
            title: "Full-Stack Developer & Digital Artist".into(),
            tagline: "Building web and mobile products with clean engineering and a designer's eye."
                .into(),
        }
    }
}

impl OwnerConfig {
    /// Up to two uppercase initials, used when the profile image is missing.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// A labelled external profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

impl SocialLink {
    fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Direct contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub social: Vec<SocialLink>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: "hello@example.com".into(),
            phone: "+1 555 0100".into(),
            location: "Remote".into(),
            social: vec![
                SocialLink::new("GitHub", "https://github.com/example"),
                SocialLink::new("LinkedIn", "https://www.linkedin.com/in/example"),
                SocialLink::new("Dribbble", "https://dribbble.com/example"),
            ],
        }
    }
}

/// Color mode settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Preference used when nothing is stored.
    pub default_mode: ThemeMode,
    /// Mode forced while the home page is mounted.
    pub home_mode: ThemeMode,
    /// Storage key for the persisted preference.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_mode: ThemeMode::Light,
            home_mode: ThemeMode::Dark,
            storage_key: "folio.theme".into(),
        }
    }
}

/// Layout shell settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    /// Vertical offset in CSS pixels past which the header turns opaque.
    pub scroll_threshold: f64,
    /// Viewport width below which pages use their compact layout.
    pub mobile_breakpoint: f64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            mobile_breakpoint: 768.0,
        }
    }
}

/// EmailJS-compatible relay settings.
///
/// All three credentials must be present for the contact form to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelayConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Routing field identifying the recipient by name.
    pub recipient_name: String,
    /// Routing field identifying the recipient mailbox.
    pub recipient_email: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".into(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            recipient_name: String::new(),
            recipient_email: String::new(),
        }
    }
}

impl RelayConfig {
    /// Whether the relay has everything it needs to send.
    pub fn is_configured(&self) -> bool {
        [&self.endpoint, &self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

/// Static asset locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetConfig {
    pub resume_path: String,
    /// File name suggested to the browser for the download.
    pub resume_file_name: String,
    pub profile_image: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            resume_path: "/resume.pdf".into(),
            resume_file_name: "resume.pdf".into(),
            profile_image: "/images/profile.jpg".into(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl SiteConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check numeric ranges and enumerated values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rain = &self.rain;
        check(
            "rain.cellSize",
            rain.cell_size.is_finite() && rain.cell_size >= MIN_CELL_SIZE,
            || format!("{} is below the minimum of {MIN_CELL_SIZE}", rain.cell_size),
        )?;
        check("rain.tickMs", rain.tick_ms > 0, || "must be at least 1".into())?;
        check("rain.fadeAlpha", in_unit(rain.fade_alpha), || {
            format!("{} is outside [0, 1]", rain.fade_alpha)
        })?;
        check(
            "rain.minAlpha",
            in_unit(rain.min_alpha) && in_unit(rain.max_alpha) && rain.min_alpha <= rain.max_alpha,
            || format!("[{}, {}] is not a range within [0, 1]", rain.min_alpha, rain.max_alpha),
        )?;
        check(
            "rain.minStep",
            rain.min_step.is_finite()
                && rain.max_step.is_finite()
                && rain.min_step > 0.0
                && rain.min_step <= rain.max_step,
            || format!("[{}, {}] is not a positive range", rain.min_step, rain.max_step),
        )?;
        check("rain.respawnChance", in_unit(rain.respawn_chance), || {
            format!("{} is outside [0, 1]", rain.respawn_chance)
        })?;
        check(
            "rain.spawnDepth",
            rain.spawn_depth.is_finite() && rain.spawn_depth >= 0.0,
            || format!("{} must be zero or more", rain.spawn_depth),
        )?;
        check(
            "shell.scrollThreshold",
            self.shell.scroll_threshold.is_finite() && self.shell.scroll_threshold >= 0.0,
            || format!("{} must be zero or more", self.shell.scroll_threshold),
        )?;
        check(
            "shell.mobileBreakpoint",
            self.shell.mobile_breakpoint.is_finite() && self.shell.mobile_breakpoint > 0.0,
            || format!("{} must be positive", self.shell.mobile_breakpoint),
        )?;
        check("theme.storageKey", !self.theme.storage_key.trim().is_empty(), || {
            "must not be empty".into()
        })?;
        check("logLevel", LOG_LEVELS.contains(&self.log_level.as_str()), || {
            format!("{:?} is not one of {}", self.log_level, LOG_LEVELS.join(", "))
        })?;
        Ok(())
    }
}

fn in_unit(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

fn check(
    field: &'static str,
    ok: bool,
    reason: impl FnOnce() -> String,
) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: reason(),
        })
    }
}
