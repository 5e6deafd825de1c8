//! rstest fixtures and sample types
//!
//! The sample table covers the shapes the container has to deal with: a type
//! without dependencies, a subtype, a typed dependency, an optional parameter,
//! an untyped parameter, an interface with one implementation and a type
//! depending on a name nobody describes.

use bucket_di::{
	Constructor, Container, Factory, Instance, Parameter, TypeDescriptor, TypeName, TypeRegistry,
	constructor,
};
use rstest::fixture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct NoDependencies;

#[derive(Debug, Default)]
pub struct ExtendsNoDependencies;

#[derive(Debug)]
pub struct SingleClassDependency {
	pub val: Instance,
}

#[derive(Debug)]
pub struct DefaultValue {
	pub val: i64,
}

impl Default for DefaultValue {
	fn default() -> Self {
		Self { val: 42 }
	}
}

#[derive(Debug)]
pub struct UnTypedDependency {
	pub val: Instance,
}

#[derive(Debug, Default)]
pub struct ConcreteImplementation;

#[derive(Debug)]
pub struct DependsOnInterface {
	pub val: Instance,
}

#[derive(Debug)]
pub struct RequireUndefinedClass {
	pub autoloaded: Instance,
}

/// A value produced by factories instead of the requested type.
#[derive(Debug, Default)]
pub struct PlainObject;

/// Describes every sample type in `registry`.
pub fn register_sample_types(registry: &TypeRegistry) {
	registry.register(TypeDescriptor::with_default::<NoDependencies>("NoDependencies"));
	registry.register(
		TypeDescriptor::with_default::<ExtendsNoDependencies>("ExtendsNoDependencies")
			.extends("NoDependencies"),
	);
	registry.register(
		TypeDescriptor::concrete("SingleClassDependency", |mut args| {
			Ok(SingleClassDependency {
				val: args.next_instance()?,
			})
		})
		.param(Parameter::typed("val", "NoDependencies")),
	);
	registry.register(
		TypeDescriptor::with_default::<DefaultValue>("DefaultValue")
			.param(Parameter::optional("val")),
	);
	registry.register(
		TypeDescriptor::concrete("UnTypedDependency", |mut args| {
			Ok(UnTypedDependency {
				val: args.next_instance()?,
			})
		})
		.param(Parameter::untyped("val")),
	);
	registry.register(TypeDescriptor::interface("AnInterface"));
	registry.register(
		TypeDescriptor::with_default::<ConcreteImplementation>("ConcreteImplementation")
			.implements("AnInterface"),
	);
	registry.register(
		TypeDescriptor::concrete("DependsOnInterface", |mut args| {
			Ok(DependsOnInterface {
				val: args.next_instance()?,
			})
		})
		.param(Parameter::typed("val", "AnInterface")),
	);
	registry.register(
		TypeDescriptor::concrete("RequireUndefinedClass", |mut args| {
			Ok(RequireUndefinedClass {
				autoloaded: args.next_instance()?,
			})
		})
		.param(Parameter::typed("autoloaded", "ClassThatDoesntExist")),
	);
	registry.register(TypeDescriptor::with_default::<PlainObject>("PlainObject"));
}

/// Factory answering for `NoDependencies` and `ConcreteImplementation`.
///
/// Both names produce a [`NoDependencies`]; every call is recorded.
#[derive(Debug, Clone, Default)]
pub struct TestFactory {
	invoked: Arc<AtomicBool>,
	calls: Arc<AtomicUsize>,
}

impl TestFactory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn invoked(&self) -> bool {
		self.invoked.load(Ordering::SeqCst)
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn record(&self) -> Constructor {
		let invoked = Arc::clone(&self.invoked);
		let calls = Arc::clone(&self.calls);
		constructor(move |_| {
			invoked.store(true, Ordering::SeqCst);
			calls.fetch_add(1, Ordering::SeqCst);
			Ok(NoDependencies)
		})
	}
}

impl Factory for TestFactory {
	fn constructor_for(&self, type_name: &TypeName) -> Option<Constructor> {
		match type_name.as_str() {
			"nodependencies" | "concreteimplementation" => Some(self.record()),
			_ => None,
		}
	}
}

#[fixture]
pub fn sample_registry() -> Arc<TypeRegistry> {
	let registry = Arc::new(TypeRegistry::new());
	register_sample_types(&registry);
	registry
}

#[fixture]
pub fn container(sample_registry: Arc<TypeRegistry>) -> Container {
	Container::new(sample_registry)
}

#[fixture]
pub fn test_factory() -> TestFactory {
	TestFactory::new()
}
