//! Type description registry
//!
//! Rust has no runtime reflection over constructors, so every type the
//! container may build is described up front (or lazily, by a
//! [`TypeLoader`](crate::TypeLoader)) with a [`TypeDescriptor`]: its kind, its
//! supertypes, its ordered constructor parameters and a build function.

use crate::{DiError, DiResult, Instance, TypeName};
use indexmap::IndexMap;
use std::any::{Any, TypeId};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

type BuildFn = Arc<dyn Fn(Arguments) -> DiResult<Instance> + Send + Sync>;

/// Whether a described type can be constructed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
	Concrete,
	Interface,
	Abstract,
}

/// A constructor parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
	name: String,
	type_ref: Option<TypeName>,
	optional: bool,
}

impl Parameter {
	/// A required parameter resolved through the container.
	pub fn typed(name: impl Into<String>, type_ref: impl Into<TypeName>) -> Self {
		Self {
			name: name.into(),
			type_ref: Some(type_ref.into()),
			optional: false,
		}
	}

	/// A required parameter without a type reference; it cannot be auto-wired.
	pub fn untyped(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			type_ref: None,
			optional: false,
		}
	}

	/// A parameter with a default value, left to the build function.
	pub fn optional(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			type_ref: None,
			optional: true,
		}
	}

	pub fn optional_typed(name: impl Into<String>, type_ref: impl Into<TypeName>) -> Self {
		Self {
			name: name.into(),
			type_ref: Some(type_ref.into()),
			optional: true,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn type_ref(&self) -> Option<&TypeName> {
		self.type_ref.as_ref()
	}

	pub fn is_optional(&self) -> bool {
		self.optional
	}
}

/// Resolved constructor arguments, consumed front to back.
///
/// Only required parameters are ever supplied; optional ones are absent and
/// the build function falls back to its own defaults.
pub struct Arguments {
	type_name: String,
	values: VecDeque<Instance>,
}

impl Arguments {
	pub(crate) fn new(type_name: impl Into<String>, values: Vec<Instance>) -> Self {
		Self {
			type_name: type_name.into(),
			values: values.into(),
		}
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Takes the next argument without downcasting it.
	pub fn next_instance(&mut self) -> DiResult<Instance> {
		self.values.pop_front().ok_or_else(|| DiError::Internal {
			message: format!("Not enough arguments to construct '{}'", self.type_name),
		})
	}

	/// Takes the next argument as an `Arc<T>`.
	pub fn next<T: Any + Send + Sync>(&mut self) -> DiResult<Arc<T>> {
		self.next_instance()?
			.downcast::<T>()
			.map_err(|_| DiError::TypeMismatch {
				type_name: self.type_name.clone(),
				expected: std::any::type_name::<T>(),
			})
	}
}

/// Description of one type: what it is, what it extends, how to build it.
///
/// # Examples
///
/// ```
/// use bucket_di::{Parameter, TypeDescriptor, TypeKind};
///
/// struct Engine;
/// struct Car {
///     engine: std::sync::Arc<Engine>,
/// }
///
/// let engine = TypeDescriptor::concrete("Engine", |_| Ok(Engine));
/// let car = TypeDescriptor::concrete("Car", |mut args| {
///     Ok(Car {
///         engine: args.next::<Engine>()?,
///     })
/// })
/// .param(Parameter::typed("engine", "Engine"));
///
/// assert_eq!(car.kind(), TypeKind::Concrete);
/// assert_eq!(car.parameters().len(), 1);
/// assert_eq!(engine.display_name(), "Engine");
/// ```
#[derive(Clone)]
pub struct TypeDescriptor {
	name: TypeName,
	display_name: String,
	kind: TypeKind,
	parent: Option<TypeName>,
	interfaces: Vec<TypeName>,
	parameters: Vec<Parameter>,
	build: Option<BuildFn>,
	type_id: Option<TypeId>,
}

impl TypeDescriptor {
	fn bare(display_name: impl Into<String>, kind: TypeKind) -> Self {
		let display_name = display_name.into();
		Self {
			name: TypeName::new(&display_name),
			display_name,
			kind,
			parent: None,
			interfaces: Vec::new(),
			parameters: Vec::new(),
			build: None,
			type_id: None,
		}
	}

	/// Describes a constructible type built by `build`.
	pub fn concrete<T, F>(display_name: impl Into<String>, build: F) -> Self
	where
		T: Any + Send + Sync,
		F: Fn(Arguments) -> DiResult<T> + Send + Sync + 'static,
	{
		let mut descriptor = Self::bare(display_name, TypeKind::Concrete);
		descriptor.type_id = Some(TypeId::of::<T>());
		descriptor.build = Some(Arc::new(move |args| {
			build(args).map(|value| Arc::new(value) as Instance)
		}));
		descriptor
	}

	/// Describes a type with no constructor parameters, built via `Default`.
	pub fn with_default<T>(display_name: impl Into<String>) -> Self
	where
		T: Any + Default + Send + Sync,
	{
		Self::concrete(display_name, |_| Ok(T::default()))
	}

	pub fn interface(display_name: impl Into<String>) -> Self {
		Self::bare(display_name, TypeKind::Interface)
	}

	pub fn abstract_type(display_name: impl Into<String>) -> Self {
		Self::bare(display_name, TypeKind::Abstract)
	}

	/// Sets the supertype this type extends.
	pub fn extends(mut self, parent: impl Into<TypeName>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	/// Adds an implemented (or, for interfaces, extended) interface.
	pub fn implements(mut self, interface: impl Into<TypeName>) -> Self {
		self.interfaces.push(interface.into());
		self
	}

	/// Appends a constructor parameter.
	pub fn param(mut self, parameter: Parameter) -> Self {
		self.parameters.push(parameter);
		self
	}

	pub fn name(&self) -> &TypeName {
		&self.name
	}

	pub fn display_name(&self) -> &str {
		&self.display_name
	}

	pub fn kind(&self) -> TypeKind {
		self.kind
	}

	/// Interfaces and abstract types cannot be instantiated.
	pub fn is_instantiable(&self) -> bool {
		self.kind == TypeKind::Concrete && self.build.is_some()
	}

	pub fn parent(&self) -> Option<&TypeName> {
		self.parent.as_ref()
	}

	pub fn interfaces(&self) -> &[TypeName] {
		&self.interfaces
	}

	pub fn parameters(&self) -> &[Parameter] {
		&self.parameters
	}

	pub fn type_id(&self) -> Option<TypeId> {
		self.type_id
	}

	/// Runs the build function with already-resolved arguments.
	pub fn instantiate(&self, arguments: Arguments) -> DiResult<Instance> {
		let build = self.build.as_ref().ok_or_else(|| DiError::Internal {
			message: format!("'{}' has no build function", self.display_name),
		})?;
		build(arguments)
	}

	fn supertypes(&self) -> impl Iterator<Item = &TypeName> {
		self.parent.iter().chain(self.interfaces.iter())
	}
}

impl fmt::Debug for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDescriptor")
			.field("name", &self.display_name)
			.field("kind", &self.kind)
			.field("parent", &self.parent)
			.field("interfaces", &self.interfaces)
			.field("parameters", &self.parameters)
			.finish_non_exhaustive()
	}
}

/// Thread-safe, insertion-ordered table of type descriptions.
#[derive(Default)]
pub struct TypeRegistry {
	types: RwLock<IndexMap<TypeName, Arc<TypeDescriptor>>>,
}

impl TypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a description, replacing any previous one with the same name.
	pub fn register(&self, descriptor: TypeDescriptor) {
		let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
		types.insert(descriptor.name.clone(), Arc::new(descriptor));
	}

	pub fn contains(&self, name: &TypeName) -> bool {
		let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
		types.contains_key(name)
	}

	pub fn describe(&self, name: &TypeName) -> Option<Arc<TypeDescriptor>> {
		let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
		types.get(name).cloned()
	}

	pub fn len(&self) -> usize {
		self.types.read().unwrap_or_else(PoisonError::into_inner).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Finds the registered name of the concrete Rust type `type_id`.
	pub fn name_of(&self, type_id: TypeId) -> Option<TypeName> {
		let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
		types
			.values()
			.find(|descriptor| descriptor.type_id == Some(type_id))
			.map(|descriptor| descriptor.name.clone())
	}

	/// Returns `true` if `candidate` extends or implements `target`,
	/// directly or through its ancestors.
	pub fn is_subtype(&self, candidate: &TypeName, target: &TypeName) -> bool {
		let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
		is_subtype_in(&types, candidate, target)
	}

	/// Lists every concrete type that implements or extends `target`.
	///
	/// The result depends on what has been registered so far and is meant for
	/// diagnostics only.
	pub fn candidates_for(&self, target: &TypeName) -> Vec<String> {
		let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
		types
			.values()
			.filter(|descriptor| descriptor.is_instantiable())
			.filter(|descriptor| is_subtype_in(&types, &descriptor.name, target))
			.map(|descriptor| descriptor.display_name.clone())
			.collect()
	}
}

impl fmt::Debug for TypeRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
		f.debug_struct("TypeRegistry")
			.field("types", &types.keys().collect::<Vec<_>>())
			.finish()
	}
}

fn is_subtype_in(
	types: &IndexMap<TypeName, Arc<TypeDescriptor>>,
	candidate: &TypeName,
	target: &TypeName,
) -> bool {
	let mut visited = HashSet::new();
	let mut pending: Vec<&TypeName> = types
		.get(candidate)
		.map(|descriptor| descriptor.supertypes().collect())
		.unwrap_or_default();

	while let Some(name) = pending.pop() {
		if name == target {
			return true;
		}
		if !visited.insert(name) {
			continue;
		}
		if let Some(descriptor) = types.get(name) {
			pending.extend(descriptor.supertypes());
		}
	}
	false
}
