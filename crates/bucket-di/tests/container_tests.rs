//! Shared instances and explicit seeding

use bucket_di::{Container, DiError, TypeName};
use bucket_test::fixtures::*;
use bucket_test::logging::init_test_logging;
use rstest::*;
use std::sync::Arc;

#[rstest]
fn get_creates_new_object(container: Container) {
	// Arrange
	init_test_logging();

	// Act
	let instance = container.get("NoDependencies").unwrap();

	// Assert
	assert!(instance.is::<NoDependencies>());
	assert!(container.has("nodependencies"));
}

#[rstest]
fn get_returns_same_instance_on_subsequent_calls(container: Container) {
	// Act
	let first = container.get("NoDependencies").unwrap();
	let second = container.get("NODEPENDENCIES").unwrap();

	// Assert
	assert!(Arc::ptr_eq(&first, &second));
}

#[rstest]
fn get_and_create_are_independent(container: Container) {
	// Arrange
	let shared = container.get("NoDependencies").unwrap();

	// Act
	let fresh = container.create("NoDependencies").unwrap();

	// Assert
	assert!(!Arc::ptr_eq(&shared, &fresh));
	assert!(Arc::ptr_eq(&shared, &container.get("NoDependencies").unwrap()));
}

#[rstest]
fn set_instance_with_explicit_name(container: Container) {
	// Arrange
	let seeded = Arc::new(PlainObject);

	// Act
	container
		.set_instance_arc(seeded.clone(), Some("NoDependencies"))
		.unwrap();

	// Assert
	let found = container.get("nodependencies").unwrap();
	assert!(found.is::<PlainObject>());
	let found = container.get_as::<PlainObject>("NoDependencies").unwrap();
	assert!(Arc::ptr_eq(&found, &seeded));
}

#[rstest]
fn set_instance_uses_registered_runtime_name(container: Container) {
	// Act
	container
		.set_instance(ConcreteImplementation, None)
		.unwrap();

	// Assert
	assert!(container.has("ConcreteImplementation"));
}

#[rstest]
fn set_instance_falls_back_to_rust_type_name(container: Container) {
	// Arrange
	struct Unregistered;

	// Act
	container.set_instance(Unregistered, None).unwrap();

	// Assert
	assert!(container.has(TypeName::short_name_of::<Unregistered>().as_str()));
	assert!(container.has("unregistered"));
}

#[rstest]
#[case::integer(|c: &Container| c.set_instance(42i64, None))]
#[case::boolean(|c: &Container| c.set_instance(true, Some("Flag")))]
#[case::string(|c: &Container| c.set_instance(String::from("text"), Some("Name")))]
fn set_instance_rejects_scalars(
	container: Container,
	#[case] seed: fn(&Container) -> bucket_di::DiResult<()>,
) {
	// Act
	let result = seed(&container);

	// Assert
	assert!(matches!(result, Err(DiError::InvalidArgument { .. })));
	assert!(!container.has("Flag"));
	assert!(!container.has("Name"));
}

#[rstest]
fn get_as_downcasts(container: Container) {
	// Act
	let value = container.get_as::<DefaultValue>("DefaultValue").unwrap();

	// Assert
	assert_eq!(value.val, 42);
	assert!(matches!(
		container.get_as::<NoDependencies>("DefaultValue"),
		Err(DiError::TypeMismatch { .. })
	));
}
