//! On-demand type loading
//!
//! A [`TypeLoader`] runs once per reflective construction, right before the
//! container introspects the type, and gets the chance to describe a type the
//! registry does not know yet. This is where a host would plug in lazy plugin
//! discovery or generated type tables. Loaders must tolerate being asked for
//! types that are already registered.

use crate::{BoxError, TypeRegistry};

pub trait TypeLoader: Send + Sync {
	/// Makes `requested` available in `registry`, if it can.
	///
	/// `requested` is passed exactly as it reached the container. Returning
	/// `Ok(())` without registering anything is allowed; the container then
	/// reports the type as unresolvable.
	fn load(&self, requested: &str, registry: &TypeRegistry) -> Result<(), BoxError>;
}

impl<F> TypeLoader for F
where
	F: Fn(&str, &TypeRegistry) -> Result<(), BoxError> + Send + Sync,
{
	fn load(&self, requested: &str, registry: &TypeRegistry) -> Result<(), BoxError> {
		self(requested, registry)
	}
}
