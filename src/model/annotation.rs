//! A single labeled span plus its property bag.
//!
//! The original dynamic-dictionary model becomes a `BTreeMap` from tagged
//! keys to tagged values, with typed accessors for the well-known keys
//! (`val`, `next`, `hasChild`). Locator serialization variants are a
//! closed enum rather than subclasses; only three interpretations of
//! `start`/`end` exist.

use crate::Result;
use crate::model::AnnotationCollection;
use crate::ns;
use anyhow::bail;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Graph, Literal, NamedNode, Term, Triple};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Property keys: either a full predicate IRI or a bare name that gets
/// mapped to a predicate at emission time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PropertyKey {
    Uri(NamedNode),
    Name(String),
}

impl PropertyKey {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(u) => write!(f, "<{}>", u.as_str()),
            Self::Name(n) => f.write_str(n),
        }
    }
}

/// A single property value: plain text, a number, or a resource reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Uri(NamedNode),
}

impl Scalar {
    /// The RDF object this scalar maps to: IRIs pass through, everything
    /// else becomes a plain literal.
    fn to_term(&self) -> Term {
        match self {
            Self::Uri(u) => u.clone().into(),
            Self::Text(t) => Literal::new_simple_literal(t).into(),
            Self::Number(n) => Literal::new_simple_literal(n.to_string()).into(),
        }
    }
}

/// A property value: one scalar or an ordered list of scalars (used for
/// multi-valued properties such as child links).
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl PropertyValue {
    pub fn text(t: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(t.into()))
    }

    fn scalars(&self) -> &[Scalar] {
        match self {
            Self::Scalar(s) => std::slice::from_ref(s),
            Self::List(v) => v,
        }
    }

    /// Empty-text values suppress triple emission.
    fn is_empty_text(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Text(t)) if t.is_empty())
    }
}

/// Interpretation of `start`/`end` offsets, selected once per collection
/// and applied to every annotation it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// UTF-8 character offsets; emits a TextRegion with integer endpoints.
    Text,
    /// Second offsets into audio/video; emits a SecondRegion with floats.
    Seconds,
    /// Clock-time offsets; emits an HMSRegion with plain "HH:MM:SS" literals.
    ClockTime,
}

impl Locator {
    /// Emit the locator resource for one annotation and return its IRI.
    fn to_rdf(self, locator_uri: NamedNode, start: f64, end: f64, graph: &mut Graph) -> NamedNode {
        let (region, start_term, end_term): (_, Term, Term) = match self {
            Self::Text => (
                ns::dada::TEXT_REGION,
                Literal::new_typed_literal((start as i64).to_string(), xsd::INTEGER).into(),
                Literal::new_typed_literal((end as i64).to_string(), xsd::INTEGER).into(),
            ),
            Self::Seconds => (
                ns::dada::SECOND_REGION,
                Literal::new_typed_literal(start.to_string(), xsd::FLOAT).into(),
                Literal::new_typed_literal(end.to_string(), xsd::FLOAT).into(),
            ),
            Self::ClockTime => (
                ns::dada::HMS_REGION,
                Literal::new_simple_literal(format_hms(start)).into(),
                Literal::new_simple_literal(format_hms(end)).into(),
            ),
        };

        graph.insert(&Triple::new(locator_uri.clone(), rdf::TYPE, region.into_owned()));
        graph.insert(&Triple::new(locator_uri.clone(), ns::dada::START, start_term));
        graph.insert(&Triple::new(locator_uri.clone(), ns::dada::END, end_term));

        locator_uri
    }
}

/// Format a second offset as zero-padded "HH:MM:SS" (fraction truncated).
fn format_hms(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// An annotation on a region of a source document, with the region defined
/// by `start`/`end` offsets interpreted per the collection's [`Locator`].
///
/// Identity (`id`, `ty`, `start`, `end`) is fixed at creation; the property
/// bag stays mutable for the lifetime of the owning collection.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub id: String,
    pub ty: NamedNode,
    pub start: f64,
    pub end: f64,
    pub locator: Locator,
    uri: NamedNode,
    properties: BTreeMap<PropertyKey, PropertyValue>,
}

impl Annotation {
    /// Created only through [`AnnotationCollection::add_annotation`].
    pub(crate) fn new(
        ty: NamedNode,
        val: &str,
        start: f64,
        end: f64,
        locator: Locator,
        collection_uri: &NamedNode,
        id: String,
        properties: Option<BTreeMap<PropertyKey, PropertyValue>>,
    ) -> Result<Self> {
        let uri = match NamedNode::new(format!("{}/annotation/{}", collection_uri.as_str(), id)) {
            Ok(uri) => uri,
            Err(_) => bail!("annotation id {:?} does not form a valid IRI", id),
        };

        let mut properties = properties.unwrap_or_default();
        // val is a special property, always present.
        properties.insert(PropertyKey::name("val"), PropertyValue::text(val));

        Ok(Self {
            id,
            ty,
            start,
            end,
            locator,
            uri,
            properties,
        })
    }

    /// The annotation IRI: `collection.uri() + "/annotation/" + id`.
    pub fn uri(&self) -> &NamedNode {
        &self.uri
    }

    /// The label text (the `"val"` property, always present).
    pub fn val(&self) -> &str {
        match self.properties.get(&PropertyKey::name("val")) {
            Some(PropertyValue::Scalar(Scalar::Text(t))) => t,
            _ => "",
        }
    }

    pub fn get(&self, key: &PropertyKey) -> Result<&PropertyValue> {
        match self.properties.get(key) {
            Some(v) => Ok(v),
            None => bail!("annotation {} has no property {}", self.id, key),
        }
    }

    pub fn set(&mut self, key: PropertyKey, value: PropertyValue) {
        self.properties.insert(key, value);
    }

    pub fn remove(&mut self, key: &PropertyKey) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PropertyKey> {
        self.properties.keys()
    }

    /// Record `next_uri` as the single successor of this annotation,
    /// overwriting any previous one.
    pub fn set_next(&mut self, next_uri: NamedNode) {
        self.properties.insert(
            PropertyKey::Uri(ns::dada::NEXT.into()),
            PropertyValue::Scalar(Scalar::Uri(next_uri)),
        );
    }

    /// The successor IRI, if one was recorded.
    pub fn get_next(&self) -> Option<&NamedNode> {
        match self.properties.get(&PropertyKey::Uri(ns::dada::NEXT.into())) {
            Some(PropertyValue::Scalar(Scalar::Uri(u))) => Some(u),
            _ => None,
        }
    }

    /// Append `child_uri` to the child list. Not idempotent: adding the
    /// same child twice records it twice.
    pub fn add_child(&mut self, child_uri: NamedNode) {
        let key = PropertyKey::Uri(ns::dada::HAS_CHILD.into());
        match self.properties.get_mut(&key) {
            Some(PropertyValue::List(list)) => list.push(Scalar::Uri(child_uri)),
            _ => {
                self.properties
                    .insert(key, PropertyValue::List(vec![Scalar::Uri(child_uri)]));
            }
        }
    }

    /// The child IRIs in insertion order, if any were recorded.
    pub fn get_children(&self) -> Option<Vec<&NamedNode>> {
        match self
            .properties
            .get(&PropertyKey::Uri(ns::dada::HAS_CHILD.into()))
        {
            Some(value) => Some(
                value
                    .scalars()
                    .iter()
                    .filter_map(|s| match s {
                        Scalar::Uri(u) => Some(u),
                        _ => None,
                    })
                    .collect(),
            ),
            None => None,
        }
    }

    /// Add the triples representing this annotation to `graph`.
    pub fn to_rdf(&self, collection: &AnnotationCollection, graph: &mut Graph) -> Result<()> {
        let uri = self.uri.clone();

        graph.insert(&Triple::new(
            uri.clone(),
            rdf::TYPE,
            ns::dada::ANNOTATION.into_owned(),
        ));
        graph.insert(&Triple::new(
            uri.clone(),
            ns::dada::PART_OF,
            collection.uri().clone(),
        ));

        // Locator serialization depends on the collection's variant.
        let locator_uri = match NamedNode::new(format!("{}L", uri.as_str())) {
            Ok(u) => u,
            Err(_) => bail!("annotation {} has no valid locator IRI", self.id),
        };
        let locator_uri = self
            .locator
            .to_rdf(locator_uri, self.start, self.end, graph);
        graph.insert(&Triple::new(uri.clone(), ns::dada::TARGETS, locator_uri));

        graph.insert(&Triple::new(uri.clone(), ns::dada::TYPE, self.ty.clone()));

        for (key, value) in &self.properties {
            if value.is_empty_text() {
                continue;
            }

            let predicate = match key {
                PropertyKey::Uri(u) => u.clone(),
                PropertyKey::Name(n) if n == "val" => ns::dada::LABEL.into(),
                PropertyKey::Name(n) if n == "speakerid" => ns::ausnc::SPEAKERID.into(),
                PropertyKey::Name(n) => ns::property(collection.property_namespace(), n)?,
            };

            for scalar in value.scalars() {
                graph.insert(&Triple::new(uri.clone(), predicate.clone(), scalar.to_term()));
            }
        }

        Ok(())
    }

    fn sort_key(&self) -> (&str, &str, f64, f64) {
        (self.ty.as_str(), self.val(), self.start, self.end)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} -> {}",
            self.ty.as_str(),
            self.val(),
            self.start,
            self.end
        )
    }
}

/// Annotations order by `(type, label, start, end)`, all ascending.
impl Ord for Annotation {
    fn cmp(&self, other: &Self) -> Ordering {
        let (ty_a, val_a, start_a, end_a) = self.sort_key();
        let (ty_b, val_b, start_b, end_b) = other.sort_key();
        ty_a.cmp(ty_b)
            .then_with(|| val_a.cmp(val_b))
            .then_with(|| start_a.total_cmp(&start_b))
            .then_with(|| end_a.total_cmp(&end_b))
    }
}

impl PartialOrd for Annotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Annotation {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collection_uri() -> NamedNode {
        NamedNode::new("http://example.org/corpora/corpus99/item123/abc").unwrap()
    }

    fn phonetic() -> NamedNode {
        NamedNode::new("http://example.org/schema/maus/phonetic").unwrap()
    }

    fn ann(id: &str, val: &str, start: f64, end: f64) -> Annotation {
        Annotation::new(
            phonetic(),
            val,
            start,
            end,
            Locator::Seconds,
            &collection_uri(),
            id.to_string(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn uri_is_a_function_of_collection_and_id() {
        let a = ann("foobar", "test", 1.0, 2.0);
        assert_eq!(
            "http://example.org/corpora/corpus99/item123/abc/annotation/foobar",
            a.uri().as_str()
        );

        // Same collection, same explicit id: same URI.
        let b = ann("foobar", "other", 4.0, 5.0);
        assert_eq!(a.uri(), b.uri());
    }

    #[test]
    fn val_is_always_present() {
        let a = ann("0", "", 0.0, 1.0);
        assert_eq!("", a.val());
        let keys: Vec<_> = a.keys().collect();
        assert_eq!(vec![&PropertyKey::name("val")], keys);
    }

    #[test]
    fn set_and_remove_properties() {
        let mut a = ann("0", "test", 0.0, 1.0);
        let key = PropertyKey::name("size");

        a.set(key.clone(), PropertyValue::text("one"));
        assert_eq!(&PropertyValue::text("one"), a.get(&key).unwrap());

        assert_eq!(Some(PropertyValue::text("one")), a.remove(&key));
        assert!(a.get(&key).is_err());
        assert_eq!(None, a.remove(&key));
    }

    #[test]
    fn get_fails_on_missing_key() {
        let a = ann("0", "test", 0.0, 1.0);
        assert!(a.get(&PropertyKey::name("nope")).is_err());
    }

    #[test]
    fn set_next_overwrites() {
        let mut a = ann("0", "test", 0.0, 1.0);
        let b = ann("1", "test", 1.0, 2.0);
        let c = ann("2", "test", 2.0, 3.0);

        assert_eq!(None, a.get_next());
        a.set_next(b.uri().clone());
        assert_eq!(Some(b.uri()), a.get_next());
        a.set_next(c.uri().clone());
        assert_eq!(Some(c.uri()), a.get_next());
    }

    #[test]
    fn add_child_is_not_idempotent() {
        let mut a = ann("0", "parent", 0.0, 3.0);
        let b = ann("1", "child", 1.0, 2.0);

        assert_eq!(None, a.get_children());
        a.add_child(b.uri().clone());
        a.add_child(b.uri().clone());
        assert_eq!(Some(vec![b.uri(), b.uri()]), a.get_children());
    }

    #[test]
    fn ordering_by_type_label_then_offsets() {
        let a = ann("0", "aa", 1.0, 2.0);
        let b = ann("1", "ab", 0.0, 1.0);
        let c = ann("2", "aa", 1.0, 3.0);

        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
        assert_eq!(a, ann("9", "aa", 1.0, 2.0));
    }

    #[test]
    fn invalid_id_is_rejected() {
        let res = Annotation::new(
            phonetic(),
            "test",
            0.0,
            1.0,
            Locator::Seconds,
            &collection_uri(),
            "not a valid id".to_string(),
            None,
        );
        assert!(res.is_err());
    }

    #[test]
    fn hms_formatting() {
        assert_eq!("00:00:00", format_hms(0.0));
        assert_eq!("01:02:05", format_hms(3725.9));
    }
}
