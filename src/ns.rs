//! Fixed RDF vocabulary for the DADA annotation model.
//!
//! These terms must match the published schema exactly; nothing here is
//! configurable except the default property namespace, which collections
//! may override.

use crate::Result;
use anyhow::Context;
use oxrdf::NamedNode;

/// DADA annotation schema terms.
pub mod dada {
    use oxrdf::NamedNodeRef;

    pub const ANNOTATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#Annotation");
    pub const ANNOTATION_COLLECTION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#AnnotationCollection");
    pub const TEXT_REGION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#TextRegion");
    pub const SECOND_REGION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#SecondRegion");
    pub const HMS_REGION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#HMSRegion");
    pub const PART_OF: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#partOf");
    pub const TARGETS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#targets");
    pub const START: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#start");
    pub const END: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#end");
    pub const TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#type");
    pub const LABEL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#label");
    pub const NEXT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#next");
    pub const HAS_CHILD: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#hasChild");
    pub const ANNOTATES: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dada/schema/0.2#annotates");
}

/// MAUS tier annotation types.
pub mod maus {
    use oxrdf::NamedNodeRef;

    pub const PHONETIC: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://ns.ausnc.org.au/schemas/annotation/maus/phonetic");
    pub const ORTHOGRAPHIC: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://ns.ausnc.org.au/schemas/annotation/maus/orthographic");
    pub const CANONICAL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://ns.ausnc.org.au/schemas/annotation/maus/canonical");
}

/// Corpus-specific metadata terms.
pub mod ausnc {
    use oxrdf::NamedNodeRef;

    pub const SPEAKERID: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://ns.ausnc.org.au/schemas/ausnc_md_model/speakerid");
}

/// Default namespace for property keys that have no fixed predicate.
pub const DEFAULT_PROPERTY_NS: &str = "http://example.org/properties/";

/// Build a predicate for a bare property name under `base`.
pub fn property(base: &str, name: &str) -> Result<NamedNode> {
    NamedNode::new(format!("{}{}", base, name))
        .with_context(|| format!("property name {:?} does not form a valid IRI", name))
}
