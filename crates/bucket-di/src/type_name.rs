//! Case-insensitive type names

use std::borrow::Borrow;
use std::fmt;

/// Canonical, case-insensitive name of a constructible type.
///
/// All lookups and storage inside the container go through this type, so
/// `"NoDependencies"` and `"nodependencies"` address the same entry.
///
/// # Examples
///
/// ```
/// use bucket_di::TypeName;
///
/// let name = TypeName::new("NoDependencies");
/// assert_eq!(name.as_str(), "nodependencies");
/// assert_eq!(name, TypeName::new("NODEPENDENCIES"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(String);

impl TypeName {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self(name.as_ref().to_ascii_lowercase())
	}

	/// Returns the canonical (lowercase) form.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Derives a runtime type name for `T` from [`std::any::type_name`].
	///
	/// The module path and any generic arguments are dropped, so
	/// `my_app::services::Mailer<Smtp>` becomes `mailer`.
	///
	/// # Examples
	///
	/// ```
	/// use bucket_di::TypeName;
	///
	/// struct Mailer;
	/// assert_eq!(TypeName::short_name_of::<Mailer>().as_str(), "mailer");
	/// assert_eq!(TypeName::short_name_of::<Vec<Mailer>>().as_str(), "vec");
	/// ```
	pub fn short_name_of<T: ?Sized>() -> Self {
		let full = std::any::type_name::<T>();
		let base = full.split('<').next().unwrap_or(full);
		Self::new(base.rsplit("::").next().unwrap_or(base))
	}
}

impl fmt::Display for TypeName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for TypeName {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for TypeName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for TypeName {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for TypeName {
	fn from(name: String) -> Self {
		Self::new(name)
	}
}

impl From<&TypeName> for TypeName {
	fn from(name: &TypeName) -> Self {
		name.clone()
	}
}
