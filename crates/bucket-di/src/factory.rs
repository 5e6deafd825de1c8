//! Factory delegates
//!
//! A factory overrides reflective construction for selected types. Two
//! sources are consulted, in order:
//!
//! 1. explicit per-type callbacks registered on the [`FactoryDelegate`]
//! 2. a method factory implementing [`Factory`], which answers by name
//!
//! Anything neither source knows falls through to the type registry.

use crate::{Container, DiResult, TypeName};
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A shared, type-erased instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Builds an instance, with the requesting container as its only argument.
pub type Constructor = Arc<dyn Fn(&Container) -> DiResult<Instance> + Send + Sync>;

/// Wraps a typed closure into a [`Constructor`].
///
/// # Examples
///
/// ```
/// use bucket_di::{Container, TypeRegistry, constructor};
/// use std::sync::Arc;
///
/// struct Clock;
/// let build = constructor(|_container: &Container| Ok(Clock));
///
/// let container = Container::new(Arc::new(TypeRegistry::new()));
/// let clock = build(&container).unwrap();
/// assert!(clock.is::<Clock>());
/// ```
pub fn constructor<T, F>(f: F) -> Constructor
where
	T: Any + Send + Sync,
	F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
{
	Arc::new(move |container| f(container).map(|value| Arc::new(value) as Instance))
}

/// Factory answering by type name.
///
/// Names are passed in canonical (lowercase) form, so implementations match
/// on lowercase literals:
///
/// ```
/// use bucket_di::{Constructor, Factory, TypeName, constructor};
///
/// struct Mailer;
/// struct AppFactory;
///
/// impl Factory for AppFactory {
///     fn constructor_for(&self, type_name: &TypeName) -> Option<Constructor> {
///         match type_name.as_str() {
///             "mailer" => Some(constructor(|_| Ok(Mailer))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Factory: Send + Sync {
	fn constructor_for(&self, type_name: &TypeName) -> Option<Constructor>;
}

/// The factory a container consults before reflective construction.
#[derive(Clone, Default)]
pub struct FactoryDelegate {
	callbacks: HashMap<TypeName, Constructor>,
	methods: Option<Arc<dyn Factory>>,
}

impl FactoryDelegate {
	/// An empty delegate; every type falls through to reflection.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_methods(methods: impl Factory + 'static) -> Self {
		Self {
			callbacks: HashMap::new(),
			methods: Some(Arc::new(methods)),
		}
	}

	/// Registers an explicit callback, which wins over the method factory.
	pub fn with_callback<T, F>(mut self, type_name: impl Into<TypeName>, f: F) -> Self
	where
		T: Any + Send + Sync,
		F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
	{
		self.callbacks.insert(type_name.into(), constructor(f));
		self
	}

	/// Registers an already type-erased callback.
	pub fn with_constructor(mut self, type_name: impl Into<TypeName>, ctor: Constructor) -> Self {
		self.callbacks.insert(type_name.into(), ctor);
		self
	}

	pub fn lookup(&self, type_name: &TypeName) -> Option<Constructor> {
		self.callbacks.get(type_name).cloned().or_else(|| {
			self.methods
				.as_ref()
				.and_then(|methods| methods.constructor_for(type_name))
		})
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty() && self.methods.is_none()
	}
}

impl fmt::Debug for FactoryDelegate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FactoryDelegate")
			.field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
			.field("methods", &self.methods.is_some())
			.finish()
	}
}

impl<K: Into<TypeName>> FromIterator<(K, Constructor)> for FactoryDelegate {
	fn from_iter<I: IntoIterator<Item = (K, Constructor)>>(iter: I) -> Self {
		Self {
			callbacks: iter
				.into_iter()
				.map(|(name, ctor)| (name.into(), ctor))
				.collect(),
			methods: None,
		}
	}
}

impl<K: Into<TypeName>> From<HashMap<K, Constructor>> for FactoryDelegate {
	fn from(callbacks: HashMap<K, Constructor>) -> Self {
		callbacks.into_iter().collect()
	}
}

impl<K: Into<TypeName>> From<IndexMap<K, Constructor>> for FactoryDelegate {
	fn from(callbacks: IndexMap<K, Constructor>) -> Self {
		callbacks.into_iter().collect()
	}
}

impl<K: Into<TypeName>> From<Vec<(K, Constructor)>> for FactoryDelegate {
	fn from(callbacks: Vec<(K, Constructor)>) -> Self {
		callbacks.into_iter().collect()
	}
}
