//! # Bucket
//!
//! Facade crate for the bucket dependency-injection container.
//!
//! ```rust
//! use bucket::di::{Container, TypeDescriptor, TypeRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Clock;
//!
//! let registry = Arc::new(TypeRegistry::new());
//! registry.register(TypeDescriptor::with_default::<Clock>("Clock"));
//!
//! let container = Container::new(registry);
//! assert!(container.get_as::<Clock>("clock").is_ok());
//! ```

#[cfg(feature = "di")]
pub use bucket_di as di;

#[cfg(feature = "di")]
pub mod prelude {
	pub use bucket_di::{
		Container, ContainerSettings, DiError, DiResult, Factory, FactoryDelegate, Instance,
		Parameter, Scope, TypeDescriptor, TypeLoader, TypeName, TypeRegistry, constructor,
	};
}
