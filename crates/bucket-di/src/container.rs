//! The container: shared instances, fresh creation and auto-wiring

use crate::registry::Arguments;
use crate::settings::ContainerSettings;
use crate::{
	CreationError, DiError, DiResult, FactoryDelegate, Instance, Scope, TypeLoader, TypeName,
	TypeRegistry,
};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Resolves type names into instances.
///
/// `get` returns the instance shared within this container's scope chain,
/// creating and caching it on first use. `create` always builds a fresh
/// instance: first through the factory delegate, then by auto-wiring the
/// constructor parameters described in the [`TypeRegistry`].
///
/// # Examples
///
/// ```
/// use bucket_di::{Container, Parameter, TypeDescriptor, TypeRegistry};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Pool;
/// struct Repository {
///     pool: Arc<Pool>,
/// }
///
/// let registry = Arc::new(TypeRegistry::new());
/// registry.register(TypeDescriptor::with_default::<Pool>("Pool"));
/// registry.register(
///     TypeDescriptor::concrete("Repository", |mut args| {
///         Ok(Repository {
///             pool: args.next::<Pool>()?,
///         })
///     })
///     .param(Parameter::typed("pool", "Pool")),
/// );
///
/// let container = Container::new(registry);
/// let repository = container.get_as::<Repository>("Repository").unwrap();
/// let pool = container.get_as::<Pool>("Pool").unwrap();
/// assert!(Arc::ptr_eq(&repository.pool, &pool));
/// ```
pub struct Container {
	factory: Arc<FactoryDelegate>,
	scope: Arc<Scope>,
	registry: Arc<TypeRegistry>,
	loader: Option<Arc<dyn TypeLoader>>,
}

impl Container {
	/// Creates a root container with an empty factory and no type loader.
	pub fn new(registry: Arc<TypeRegistry>) -> Self {
		Self::builder(registry).build()
	}

	pub fn builder(registry: Arc<TypeRegistry>) -> ContainerBuilder {
		ContainerBuilder::new(registry)
	}

	/// Derives a container sharing this factory, whose scope is chained onto
	/// this container's scope.
	///
	/// Instances the child caches stay invisible to this container; instances
	/// already cached here are shared with the child.
	pub fn make_child(&self) -> Container {
		Container {
			factory: Arc::clone(&self.factory),
			scope: Arc::new(Scope::with_parent(Arc::clone(&self.scope))),
			registry: Arc::clone(&self.registry),
			loader: self.loader.clone(),
		}
	}

	/// Returns the shared instance for `type_name`, creating it on first use.
	pub fn get(&self, type_name: &str) -> DiResult<Instance> {
		let name = TypeName::new(type_name);
		if let Some(instance) = self.scope.get(&name) {
			tracing::trace!(type_name = %name, "scope hit");
			return Ok(instance);
		}

		tracing::debug!(type_name = %name, "scope miss, creating instance");
		let instance = self.create(name.as_str())?;
		self.scope.set(name, Arc::clone(&instance));
		Ok(instance)
	}

	/// Typed variant of [`get`](Self::get).
	pub fn get_as<T: Any + Send + Sync>(&self, type_name: &str) -> DiResult<Arc<T>> {
		downcast_instance(self.get(type_name)?, type_name)
	}

	/// Builds a new instance of `type_name`, bypassing the cache.
	pub fn create(&self, type_name: &str) -> DiResult<Instance> {
		let requested = TypeName::new(type_name);
		let (actual, display) = match self.scope.bound_implementation(&requested) {
			Some(bound) => {
				let display = bound.as_str().to_owned();
				(bound, display)
			}
			None => (requested, type_name.to_owned()),
		};

		if let Some(ctor) = self.factory.lookup(&actual) {
			tracing::debug!(type_name = %actual, "constructing through factory");
			return ctor(self);
		}

		self.construct(&actual, &display)
	}

	/// Typed variant of [`create`](Self::create).
	pub fn create_as<T: Any + Send + Sync>(&self, type_name: &str) -> DiResult<Arc<T>> {
		downcast_instance(self.create(type_name)?, type_name)
	}

	/// Uses `implementation` wherever `interface` is requested from this
	/// container or its children.
	pub fn register_implementation(&self, interface: &str, implementation: &str) {
		self.scope
			.set_implementation(TypeName::new(interface), TypeName::new(implementation));
	}

	/// Registers every binding from `settings`, in order.
	pub fn apply_settings(&self, settings: &ContainerSettings) {
		for (interface, implementation) in &settings.implementations {
			self.register_implementation(interface, implementation);
		}
	}

	/// Seeds this container's scope with a pre-built instance.
	///
	/// Without an explicit name the instance is stored under the registry's
	/// name for `T`, or else under [`TypeName::short_name_of`]. Scalar values
	/// (numbers, booleans, characters, strings, unit) are rejected.
	pub fn set_instance<T: Any + Send + Sync>(
		&self,
		instance: T,
		type_name: Option<&str>,
	) -> DiResult<()> {
		self.set_instance_arc(Arc::new(instance), type_name)
	}

	/// Like [`set_instance`](Self::set_instance), for an already shared value.
	pub fn set_instance_arc<T: Any + Send + Sync>(
		&self,
		instance: Arc<T>,
		type_name: Option<&str>,
	) -> DiResult<()> {
		if is_scalar::<T>() {
			return Err(DiError::InvalidArgument {
				message: format!(
					"First argument must be an object, got {}",
					std::any::type_name::<T>()
				),
			});
		}

		let name = match type_name {
			Some(name) => TypeName::new(name),
			None => self
				.registry
				.name_of(TypeId::of::<T>())
				.unwrap_or_else(TypeName::short_name_of::<T>),
		};
		tracing::debug!(type_name = %name, "seeding instance");
		self.scope.set(name, instance);
		Ok(())
	}

	/// Returns `true` if an instance is cached in this container's scope chain.
	pub fn has(&self, type_name: &str) -> bool {
		self.scope.has(&TypeName::new(type_name))
	}

	pub fn scope(&self) -> &Arc<Scope> {
		&self.scope
	}

	pub fn registry(&self) -> &Arc<TypeRegistry> {
		&self.registry
	}

	pub fn factory(&self) -> &Arc<FactoryDelegate> {
		&self.factory
	}

	fn construct(&self, name: &TypeName, requested: &str) -> DiResult<Instance> {
		if let Some(loader) = &self.loader {
			tracing::debug!(type_name = requested, "invoking type loader");
			loader
				.load(requested, &self.registry)
				.map_err(|source| DiError::TypeLoad {
					type_name: requested.to_owned(),
					source,
				})?;
		}

		let descriptor = self
			.registry
			.describe(name)
			.ok_or_else(|| DiError::UnresolvableType {
				type_name: requested.to_owned(),
			})?;

		if !descriptor.is_instantiable() {
			return Err(CreationError::NoImplementation {
				type_name: name.clone(),
				candidates: self.registry.candidates_for(name),
			}
			.into());
		}

		let mut arguments = Vec::new();
		for parameter in descriptor.parameters() {
			if parameter.is_optional() {
				continue;
			}
			let Some(dependency) = parameter.type_ref() else {
				return Err(CreationError::UntypedParameter {
					parameter: parameter.name().to_owned(),
					type_name: descriptor.display_name().to_owned(),
				}
				.into());
			};
			arguments.push(self.get(dependency.as_str())?);
		}

		tracing::debug!(
			type_name = descriptor.display_name(),
			arguments = arguments.len(),
			"constructing through registry"
		);
		descriptor.instantiate(Arguments::new(descriptor.display_name(), arguments))
	}
}

impl fmt::Debug for Container {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Container")
			.field("scope", &self.scope)
			.field("factory", &self.factory)
			.field("loader", &self.loader.is_some())
			.finish()
	}
}

/// Builder for [`Container`].
pub struct ContainerBuilder {
	registry: Arc<TypeRegistry>,
	factory: FactoryDelegate,
	loader: Option<Arc<dyn TypeLoader>>,
	parent_scope: Option<Arc<Scope>>,
	settings: Option<ContainerSettings>,
}

impl ContainerBuilder {
	fn new(registry: Arc<TypeRegistry>) -> Self {
		Self {
			registry,
			factory: FactoryDelegate::new(),
			loader: None,
			parent_scope: None,
			settings: None,
		}
	}

	pub fn factory(mut self, factory: impl Into<FactoryDelegate>) -> Self {
		self.factory = factory.into();
		self
	}

	pub fn loader(mut self, loader: impl TypeLoader + 'static) -> Self {
		self.loader = Some(Arc::new(loader));
		self
	}

	/// Chains the new container's scope onto an existing one.
	pub fn parent_scope(mut self, scope: Arc<Scope>) -> Self {
		self.parent_scope = Some(scope);
		self
	}

	pub fn settings(mut self, settings: ContainerSettings) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn build(self) -> Container {
		let scope = match self.parent_scope {
			Some(parent) => Scope::with_parent(parent),
			None => Scope::new(),
		};
		let container = Container {
			factory: Arc::new(self.factory),
			scope: Arc::new(scope),
			registry: self.registry,
			loader: self.loader,
		};
		if let Some(settings) = &self.settings {
			container.apply_settings(settings);
		}
		container
	}
}

fn downcast_instance<T: Any + Send + Sync>(instance: Instance, type_name: &str) -> DiResult<Arc<T>> {
	instance.downcast::<T>().map_err(|_| DiError::TypeMismatch {
		type_name: type_name.to_owned(),
		expected: std::any::type_name::<T>(),
	})
}

fn is_scalar<T: Any>() -> bool {
	let id = TypeId::of::<T>();
	[
		TypeId::of::<()>(),
		TypeId::of::<bool>(),
		TypeId::of::<char>(),
		TypeId::of::<i8>(),
		TypeId::of::<i16>(),
		TypeId::of::<i32>(),
		TypeId::of::<i64>(),
		TypeId::of::<i128>(),
		TypeId::of::<isize>(),
		TypeId::of::<u8>(),
		TypeId::of::<u16>(),
		TypeId::of::<u32>(),
		TypeId::of::<u64>(),
		TypeId::of::<u128>(),
		TypeId::of::<usize>(),
		TypeId::of::<f32>(),
		TypeId::of::<f64>(),
		TypeId::of::<String>(),
		TypeId::of::<&'static str>(),
	]
	.contains(&id)
}
