//! Codec implementations for built-in types.
//!
//! Records, enumerations and tagged unions are declared with the macros at the crate root.

pub mod array;
pub mod boxed;
pub mod option;
pub mod primitives;
pub mod vec;
