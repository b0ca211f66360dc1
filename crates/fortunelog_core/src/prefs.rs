//! Local per-device preferences.
//!
//! # Responsibility
//! - Persist the display name and the "name prompt already shown" flag.
//! - Read once at startup; write once when the user confirms or skips the
//!   naming prompt.
//!
//! # Invariants
//! - A missing preferences file means first run and loads as defaults.
//! - The display name only affects entries created after it is set.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

pub type PrefsResult<T> = Result<T, PrefsError>;

/// Preferences persistence failure.
#[derive(Debug)]
pub enum PrefsError {
    Io(std::io::Error),
    /// The file exists but does not parse as preferences.
    Malformed(String),
}

impl Display for PrefsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "preferences io error: {err}"),
            Self::Malformed(message) => write!(f, "malformed preferences file: {message}"),
        }
    }
}

impl Error for PrefsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(_) => None,
        }
    }
}

impl From<std::io::Error> for PrefsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Per-device key-value preferences backing the first-run naming prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Default `author` for newly created entries.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Set once the user has confirmed or explicitly skipped the prompt.
    #[serde(default)]
    pub name_prompt_shown: bool,
}

impl Preferences {
    /// Loads preferences from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> PrefsResult<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(PrefsError::Io(err)),
        };
        serde_json::from_str(&raw).map_err(|err| PrefsError::Malformed(err.to_string()))
    }

    /// Writes preferences to `path` as JSON.
    pub fn store(&self, path: &Path) -> PrefsResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| PrefsError::Malformed(err.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Records a confirmed display name and marks the prompt as handled.
    ///
    /// Blank names are ignored except for marking the prompt shown.
    pub fn confirm_name(&mut self, name: &str) {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.display_name = Some(trimmed.to_string());
        }
        self.name_prompt_shown = true;
    }

    /// Marks the prompt as handled without recording a name.
    pub fn skip_prompt(&mut self) {
        self.name_prompt_shown = true;
    }

    /// Whether the first-run naming prompt should be shown.
    pub fn needs_name_prompt(&self) -> bool {
        !self.name_prompt_shown
    }
}
