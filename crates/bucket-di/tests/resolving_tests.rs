//! Reflective construction through the type registry

use bucket_di::{Container, CreationError, DiError, Parameter, TypeDescriptor, TypeRegistry};
use bucket_test::fixtures::*;
use rstest::*;
use std::sync::Arc;

#[rstest]
fn can_create_empty_container(sample_registry: Arc<TypeRegistry>) {
	// Act
	let container = Container::new(sample_registry);

	// Assert
	assert!(!container.has("NoDependencies"));
	assert!(container.scope().parent().is_none());
}

#[rstest]
fn can_create_type_with_no_dependencies(container: Container) {
	// Act
	let instance = container.create("NoDependencies").unwrap();

	// Assert
	assert!(instance.is::<NoDependencies>());
}

#[rstest]
fn create_returns_new_instance_each_call(container: Container) {
	// Act
	let first = container.create("NoDependencies").unwrap();
	let second = container.create("NoDependencies").unwrap();

	// Assert
	assert!(!Arc::ptr_eq(&first, &second));
	assert!(!container.has("NoDependencies"));
}

#[rstest]
fn can_create_type_with_type_dependency(container: Container) {
	// Act
	let instance = container
		.create_as::<SingleClassDependency>("SingleClassDependency")
		.unwrap();

	// Assert
	assert!(instance.val.is::<NoDependencies>());
}

#[rstest]
fn dependency_is_shared_instance(container: Container) {
	// Arrange
	let shared = container.get("NoDependencies").unwrap();

	// Act
	let instance = container
		.create_as::<SingleClassDependency>("SingleClassDependency")
		.unwrap();

	// Assert
	assert!(Arc::ptr_eq(&instance.val, &shared));
}

#[rstest]
fn can_create_type_with_default_value(container: Container) {
	// Act
	let instance = container.create_as::<DefaultValue>("DefaultValue").unwrap();

	// Assert
	assert_eq!(instance.val, 42);
}

#[rstest]
fn barks_on_untyped_dependency(container: Container) {
	// Act
	let result = container.create("UnTypedDependency");

	// Assert
	match result {
		Err(DiError::Creation(CreationError::UntypedParameter {
			parameter,
			type_name,
		})) => {
			assert_eq!(parameter, "val");
			assert_eq!(type_name, "UnTypedDependency");
		}
		other => panic!("Expected UntypedParameter, got {:?}", other.map(|_| ())),
	}
}

#[rstest]
fn barks_on_interface_dependency_when_unregistered(container: Container) {
	// Act
	let result = container.create("DependsOnInterface");

	// Assert
	let error = result.unwrap_err();
	assert!(error.is_creation());
	match error {
		DiError::Creation(CreationError::NoImplementation {
			type_name,
			candidates,
		}) => {
			assert_eq!(type_name.as_str(), "aninterface");
			assert_eq!(candidates, vec!["ConcreteImplementation".to_string()]);
		}
		other => panic!("Expected NoImplementation, got {other:?}"),
	}
}

#[rstest]
fn failed_dependency_is_not_cached(container: Container) {
	// Act
	let result = container.get("DependsOnInterface");

	// Assert
	assert!(result.is_err());
	assert!(!container.has("DependsOnInterface"));
	assert!(!container.has("AnInterface"));
}

#[rstest]
fn can_create_type_with_interface_dependency(container: Container) {
	// Arrange
	container.register_implementation("AnInterface", "ConcreteImplementation");

	// Act
	let instance = container
		.create_as::<DependsOnInterface>("DependsOnInterface")
		.unwrap();

	// Assert
	assert!(instance.val.is::<ConcreteImplementation>());
}

#[rstest]
fn interface_binding_is_case_insensitive(container: Container) {
	// Arrange
	container.register_implementation("ANINTERFACE", "concreteIMPLEMENTATION");

	// Act
	let instance = container.get("aninterface").unwrap();

	// Assert
	assert!(instance.is::<ConcreteImplementation>());
}

#[rstest]
fn can_set_different_implementation_for_concrete_type(container: Container) {
	// Arrange
	container.register_implementation("NoDependencies", "ExtendsNoDependencies");

	// Act
	let instance = container
		.create_as::<SingleClassDependency>("SingleClassDependency")
		.unwrap();

	// Assert
	assert!(instance.val.is::<ExtendsNoDependencies>());
}

struct Outer {
	inner: Arc<SingleClassDependency>,
}

#[rstest]
fn dependencies_are_built_transitively(container: Container) {
	// Arrange
	container.registry().register(
		TypeDescriptor::concrete("Outer", |mut args| {
			Ok(Outer {
				inner: args.next::<SingleClassDependency>()?,
			})
		})
		.param(Parameter::typed("inner", "SingleClassDependency")),
	);

	// Act
	let outer = container.create_as::<Outer>("Outer").unwrap();

	// Assert
	assert!(outer.inner.val.is::<NoDependencies>());
	assert!(container.has("SingleClassDependency"));
	assert!(container.has("NoDependencies"));
}

#[rstest]
fn unknown_type_without_loader_is_unresolvable(container: Container) {
	// Act
	let result = container.create("Missing");

	// Assert
	assert!(matches!(
		result,
		Err(DiError::UnresolvableType { ref type_name }) if type_name == "Missing"
	));
}
