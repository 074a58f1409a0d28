//! Sample hierarchies shared by the unit tests.
//!
//! Every builder registers its types in the given registry and returns the type that is meant
//! to be introspected. Supertypes are built first, so method bodies can bind to inherited
//! fields.

mod hierarchies;

pub use hierarchies::*;
