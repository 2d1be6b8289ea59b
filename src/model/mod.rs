//! The annotation data model: typed spans with a property bag, sequence
//! and containment links, and their RDF serialization.

pub mod annotation;
pub mod collection;

pub use annotation::{Annotation, Locator, PropertyKey, PropertyValue, Scalar};
pub use collection::AnnotationCollection;
