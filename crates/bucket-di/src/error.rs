//! Error types for dependency resolution

use crate::TypeName;

/// Boxed error returned by type loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type used throughout the container.
pub type DiResult<T> = Result<T, DiError>;

/// Errors raised while resolving or constructing instances.
#[derive(Debug, thiserror::Error)]
pub enum DiError {
	/// The type is not described in the registry, even after the loader ran
	#[error("Type '{type_name}' could not be resolved")]
	UnresolvableType {
		/// Name as it was requested
		type_name: String,
	},

	/// Reflective construction could not satisfy a dependency
	#[error(transparent)]
	Creation(#[from] CreationError),

	/// A caller passed a value the container cannot store
	#[error("Invalid argument: {message}")]
	InvalidArgument { message: String },

	/// The type loader failed while trying to make a type available
	#[error("Type loader failed for '{type_name}': {source}")]
	TypeLoad {
		type_name: String,
		#[source]
		source: BoxError,
	},

	/// An instance could not be downcast to the requested Rust type
	#[error("Instance of '{type_name}' is not a {expected}")]
	TypeMismatch {
		type_name: String,
		expected: &'static str,
	},

	#[error("Internal error: {message}")]
	Internal { message: String },
}

impl DiError {
	/// Returns `true` for failures of the reflective construction path.
	pub fn is_creation(&self) -> bool {
		matches!(self, DiError::Creation(_))
	}
}

/// Failures of reflective construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreationError {
	/// The resolved type is an interface or abstract type with no binding
	#[error(
		"No implementation registered for '{type_name}'. Possible candidates are: {}",
		.candidates.join(", ")
	)]
	NoImplementation {
		type_name: TypeName,
		candidates: Vec<String>,
	},

	/// A required constructor parameter carries no type reference
	#[error("Can't auto-assign parameter '{parameter}' for '{type_name}'")]
	UntypedParameter { parameter: String, type_name: String },
}
