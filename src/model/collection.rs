//! All the annotations on one corpus item: factory, containment linking,
//! and graph assembly.

use crate::Result;
use crate::model::{Annotation, Locator, PropertyKey, PropertyValue};
use crate::ns;
use anyhow::bail;
use oxrdf::vocab::rdf;
use oxrdf::{Graph, NamedNode, Triple};
use std::collections::BTreeMap;
use uuid::Uuid;

/// An ordered set of annotations sharing corpus/item identity.
///
/// Annotations are appended in processing order (which `next` linking
/// relies on), linked with [`link_children`](Self::link_children) once all
/// tiers are in, and emitted with [`to_rdf`](Self::to_rdf). Re-emitting
/// after further mutation reflects the current state; nothing is cached.
#[derive(Debug, Clone)]
pub struct AnnotationCollection {
    pub annotations: Vec<Annotation>,
    /// Random unique identifier for this collection instance.
    pub id: String,
    pub corpusid: NamedNode,
    pub itemid: NamedNode,
    /// Locator serialization applied to every annotation created here.
    pub locator: Locator,
    /// Namespace for property keys without a fixed predicate.
    pub property_ns: String,
    uri: NamedNode,
    next_id: u64,
}

impl AnnotationCollection {
    pub fn new(corpusid: NamedNode, itemid: NamedNode, locator: Locator) -> Self {
        let id = Uuid::new_v4().to_string();
        // itemid is a valid IRI and the uuid is IRI-safe.
        let uri = NamedNode::new_unchecked(format!("{}/{}", itemid.as_str(), id));

        Self {
            annotations: Vec::new(),
            id,
            corpusid,
            itemid,
            locator,
            property_ns: ns::DEFAULT_PROPERTY_NS.to_string(),
            uri,
            next_id: 0,
        }
    }

    /// The collection IRI: `itemid + "/" + id`.
    pub fn uri(&self) -> &NamedNode {
        &self.uri
    }

    /// The corpus identifier associated with these annotations.
    pub fn corpus_id(&self) -> &NamedNode {
        &self.corpusid
    }

    /// Namespace for otherwise-unmapped property keys.
    pub fn property_namespace(&self) -> &str {
        &self.property_ns
    }

    /// Create an annotation of this collection's locator variant and append
    /// it. Ids default to a per-collection counter starting at 0; explicit
    /// ids do not advance the counter, and their uniqueness is the caller's
    /// responsibility. Ranges are not checked for overlap.
    pub fn add_annotation(
        &mut self,
        ty: NamedNode,
        val: &str,
        start: f64,
        end: f64,
        id: Option<&str>,
        properties: Option<BTreeMap<PropertyKey, PropertyValue>>,
    ) -> Result<&mut Annotation> {
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                let id = self.next_id.to_string();
                self.next_id += 1;
                id
            }
        };

        let ann = Annotation::new(ty, val, start, end, self.locator, &self.uri, id, properties)?;
        self.annotations.push(ann);

        // Just pushed, so the vec is non-empty.
        match self.annotations.last_mut() {
            Some(ann) => Ok(ann),
            None => bail!("annotation vanished after insertion"),
        }
    }

    /// Link every `parent_ty` annotation to each `child_ty` annotation it
    /// contains (inclusive on both endpoints). O(P×C), which is fine at
    /// utterance scale. Additive: calling twice duplicates child entries.
    /// Types that match nothing produce no links and no error.
    pub fn link_children(&mut self, parent_ty: &NamedNode, child_ty: &NamedNode) {
        let children: Vec<(f64, f64, NamedNode)> = self
            .annotations
            .iter()
            .filter(|a| &a.ty == child_ty)
            .map(|a| (a.start, a.end, a.uri().clone()))
            .collect();

        for parent in self.annotations.iter_mut().filter(|a| &a.ty == parent_ty) {
            for (start, end, uri) in &children {
                if *start >= parent.start && *end <= parent.end {
                    parent.add_child(uri.clone());
                }
            }
        }
    }

    /// Build the RDF graph for the whole collection: every annotation in
    /// collection order, then the collection's own triples.
    pub fn to_rdf(&self) -> Result<Graph> {
        let mut graph = Graph::new();

        for ann in &self.annotations {
            ann.to_rdf(self, &mut graph)?;
        }

        graph.insert(&Triple::new(
            self.uri.clone(),
            rdf::TYPE,
            ns::dada::ANNOTATION_COLLECTION.into_owned(),
        ));
        graph.insert(&Triple::new(
            self.uri.clone(),
            ns::dada::ANNOTATES,
            self.itemid.clone(),
        ));

        Ok(graph)
    }
}
