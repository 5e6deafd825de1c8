//! Container settings
//!
//! Interface bindings can be kept out of code and loaded from TOML:
//!
//! ```toml
//! [implementations]
//! Mailer = "SmtpMailer"
//! Clock = "SystemClock"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read settings file: {0}")]
	Io(#[from] std::io::Error),

	#[error("Failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Declarative container configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
	/// Interface name to implementation name, applied in file order
	pub implementations: IndexMap<String, String>,
}

impl ContainerSettings {
	/// Parses settings from a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use bucket_di::ContainerSettings;
	///
	/// let settings = ContainerSettings::from_toml_str(
	///     r#"
	///     [implementations]
	///     AnInterface = "ConcreteImplementation"
	///     "#,
	/// )
	/// .unwrap();
	/// assert_eq!(
	///     settings.implementations.get("AnInterface").map(String::as_str),
	///     Some("ConcreteImplementation")
	/// );
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let source = std::fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}

	/// Adds a binding, replacing an existing one for the same interface.
	pub fn bind(mut self, interface: impl Into<String>, implementation: impl Into<String>) -> Self {
		self.implementations
			.insert(interface.into(), implementation.into());
		self
	}
}
