//! # Bucket Dependency Injection
//!
//! A small dependency-injection container: ask it for a type by name and it
//! hands back an instance, building the constructor dependencies on the way.
//!
//! ## Features
//!
//! - **Shared instances**: `get` caches per scope, `create` always builds anew
//! - **Scoped**: child containers see their parent's instances, never the reverse
//! - **Interface bindings**: map an interface or abstract type to an implementation
//! - **Factories**: per-type callbacks and name-based factories override auto-wiring
//! - **Auto-wiring**: required, typed constructor parameters are resolved recursively
//!
//! Type names are case-insensitive throughout.
//!
//! ## Describing types
//!
//! Constructors are described in a [`TypeRegistry`], which stands in for
//! runtime reflection. Types the registry does not know yet can be supplied on
//! demand by a [`TypeLoader`].
//!
//! ```rust
//! use bucket_di::{Container, Parameter, TypeDescriptor, TypeRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct English;
//!
//! struct Reception {
//!     greeter: bucket_di::Instance,
//! }
//!
//! let registry = Arc::new(TypeRegistry::new());
//! registry.register(TypeDescriptor::interface("Greeter"));
//! registry.register(TypeDescriptor::with_default::<English>("English").implements("Greeter"));
//! registry.register(
//!     TypeDescriptor::concrete("Reception", |mut args| {
//!         Ok(Reception {
//!             greeter: args.next_instance()?,
//!         })
//!     })
//!     .param(Parameter::typed("greeter", "Greeter")),
//! );
//!
//! let container = Container::new(registry);
//! container.register_implementation("Greeter", "English");
//!
//! let reception = container.get_as::<Reception>("Reception").unwrap();
//! assert!(reception.greeter.is::<English>());
//! ```
//!
//! ## Factories
//!
//! ```rust
//! use bucket_di::{Container, FactoryDelegate, TypeRegistry};
//! use std::sync::Arc;
//!
//! struct Settings {
//!     debug: bool,
//! }
//!
//! let factory = FactoryDelegate::new().with_callback("Settings", |_| Ok(Settings { debug: true }));
//! let container = Container::builder(Arc::new(TypeRegistry::new()))
//!     .factory(factory)
//!     .build();
//!
//! assert!(container.get_as::<Settings>("settings").unwrap().debug);
//! ```
//!
//! ## Child containers
//!
//! ```rust
//! use bucket_di::{Container, TypeDescriptor, TypeRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Session;
//!
//! let registry = Arc::new(TypeRegistry::new());
//! registry.register(TypeDescriptor::with_default::<Session>("Session"));
//!
//! let app = Container::new(registry);
//! let request = app.make_child();
//!
//! let from_request = request.get("Session").unwrap();
//! let from_app = app.get("Session").unwrap();
//! assert!(!Arc::ptr_eq(&from_request, &from_app));
//! ```

pub mod container;
pub mod error;
pub mod factory;
pub mod loader;
pub mod registry;
pub mod scope;
pub mod settings;
pub mod type_name;

pub use container::{Container, ContainerBuilder};
pub use error::{BoxError, CreationError, DiError, DiResult};
pub use factory::{Constructor, Factory, FactoryDelegate, Instance, constructor};
pub use loader::TypeLoader;
pub use registry::{Arguments, Parameter, TypeDescriptor, TypeKind, TypeRegistry};
pub use scope::Scope;
pub use settings::{ContainerSettings, SettingsError};
pub use type_name::TypeName;
