//! Dependency scopes

use crate::{Instance, TypeName};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Layered store of instances and interface bindings.
///
/// Lookups that miss locally fall through to the parent scope; writes only
/// ever touch the local maps, so state set on a child is invisible to its
/// parent while the parent's state stays visible to the child.
///
/// A child keeps its parent alive through an `Arc`; the chain is read-only
/// from below.
pub struct Scope {
	parent: Option<Arc<Scope>>,
	instances: RwLock<HashMap<TypeName, Instance>>,
	implementations: RwLock<HashMap<TypeName, TypeName>>,
}

impl Scope {
	/// Creates a root scope with empty maps.
	///
	/// # Examples
	///
	/// ```
	/// use bucket_di::Scope;
	///
	/// let scope = Scope::new();
	/// assert!(scope.parent().is_none());
	/// ```
	pub fn new() -> Self {
		Self {
			parent: None,
			instances: RwLock::new(HashMap::new()),
			implementations: RwLock::new(HashMap::new()),
		}
	}

	/// Creates an empty scope chained onto `parent`.
	///
	/// # Examples
	///
	/// ```
	/// use bucket_di::{Scope, TypeName};
	/// use std::sync::Arc;
	///
	/// let root = Arc::new(Scope::new());
	/// root.set(TypeName::new("Config"), Arc::new(42i32));
	///
	/// let child = Scope::with_parent(root.clone());
	/// assert!(child.has(&TypeName::new("config")));
	/// assert_eq!(child.depth(), 1);
	/// ```
	pub fn with_parent(parent: Arc<Scope>) -> Self {
		Self {
			parent: Some(parent),
			..Self::new()
		}
	}

	pub fn parent(&self) -> Option<&Arc<Scope>> {
		self.parent.as_ref()
	}

	/// Number of ancestors above this scope.
	pub fn depth(&self) -> usize {
		self.parent.as_ref().map_or(0, |parent| parent.depth() + 1)
	}

	/// Returns `true` if this scope or any ancestor holds an instance.
	pub fn has(&self, type_name: &TypeName) -> bool {
		let local = self
			.instances
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.contains_key(type_name);
		local || self.parent.as_ref().is_some_and(|parent| parent.has(type_name))
	}

	/// Retrieves an instance, checking locally first and then the ancestors.
	///
	/// Returns `None` if no scope in the chain holds one.
	///
	/// # Examples
	///
	/// ```
	/// use bucket_di::{Scope, TypeName};
	/// use std::sync::Arc;
	///
	/// let scope = Scope::new();
	/// assert!(scope.get(&TypeName::new("Config")).is_none());
	///
	/// scope.set(TypeName::new("Config"), Arc::new(7u8));
	/// let value = scope.get(&TypeName::new("CONFIG")).unwrap();
	/// assert_eq!(value.downcast_ref::<u8>(), Some(&7));
	/// ```
	pub fn get(&self, type_name: &TypeName) -> Option<Instance> {
		let local = self
			.instances
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(type_name)
			.cloned();
		local.or_else(|| self.parent.as_ref().and_then(|parent| parent.get(type_name)))
	}

	/// Stores an instance in this scope, replacing any local entry.
	///
	/// Ancestors are never modified.
	pub fn set(&self, type_name: TypeName, instance: Instance) {
		let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
		instances.insert(type_name, instance);
	}

	/// Resolves the implementation bound to `interface`.
	///
	/// Falls back to the ancestors, and finally to `interface` itself, so an
	/// unbound name is its own implementation.
	///
	/// # Examples
	///
	/// ```
	/// use bucket_di::{Scope, TypeName};
	///
	/// let scope = Scope::new();
	/// let logger = TypeName::new("Logger");
	/// assert_eq!(scope.implementation(&logger), logger);
	///
	/// scope.set_implementation(logger.clone(), TypeName::new("FileLogger"));
	/// assert_eq!(scope.implementation(&logger).as_str(), "filelogger");
	/// ```
	pub fn implementation(&self, interface: &TypeName) -> TypeName {
		self.bound_implementation(interface)
			.unwrap_or_else(|| interface.clone())
	}

	/// Like [`implementation`](Self::implementation), without the identity fallback.
	pub fn bound_implementation(&self, interface: &TypeName) -> Option<TypeName> {
		let local = self
			.implementations
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(interface)
			.cloned();
		local.or_else(|| {
			self.parent
				.as_ref()
				.and_then(|parent| parent.bound_implementation(interface))
		})
	}

	/// Binds `interface` to `implementation` in this scope only.
	pub fn set_implementation(&self, interface: TypeName, implementation: TypeName) {
		let mut implementations = self
			.implementations
			.write()
			.unwrap_or_else(PoisonError::into_inner);
		implementations.insert(interface, implementation);
	}

	pub(crate) fn local_len(&self) -> usize {
		self.instances
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}
}

impl Default for Scope {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
		let implementations = self
			.implementations
			.read()
			.unwrap_or_else(PoisonError::into_inner);
		f.debug_struct("Scope")
			.field("depth", &self.depth())
			.field("instances", &instances.keys().collect::<Vec<_>>())
			.field("implementations", &*implementations)
			.finish()
	}
}
