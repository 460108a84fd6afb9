//! Core data model for modelgen.
//!
//! This crate defines the types shared between the generation engine and
//! its external collaborators: character sets, distribution tags,
//! annotation values attached to rules, and the `Value` type carried in
//! candidate tuples and named lists.

pub mod annotation;
pub mod charset;
pub mod distribution;
pub mod error;
pub mod value;

pub use annotation::{AnnotationSet, AnnotationValue};
pub use charset::CharacterSet;
pub use distribution::{Distribution, DistributionConfig};
pub use error::UnknownCharacterSet;
pub use value::{InstanceRef, Value};
