//! MAUS TextGrid to annotation-collection wiring.
//!
//! Tier names map to fixed annotation types; empty labels become the "#"
//! placeholder; annotations on one tier are chained with `next` links; the
//! orthographic tier dominates the canonical and phonetic tiers.

use crate::Result;
use crate::model::{AnnotationCollection, Locator};
use crate::ns;
use crate::textgrid::{TextGrid, parse_textgrid_file};
use anyhow::bail;
use oxrdf::NamedNode;

/// Read a MAUS TextGrid file into an annotation collection.
pub fn maus_annotations(
    path: &str,
    corpusid: NamedNode,
    itemid: NamedNode,
) -> Result<AnnotationCollection> {
    let grid = parse_textgrid_file(path)?;
    annotations_from_textgrid(&grid, corpusid, itemid)
}

/// The annotation type for a MAUS tier name.
fn tier_type(name: &str) -> Result<NamedNode> {
    match name {
        "MAU" => Ok(ns::maus::PHONETIC.into_owned()),
        "ORT" => Ok(ns::maus::ORTHOGRAPHIC.into_owned()),
        "KAN" => Ok(ns::maus::CANONICAL.into_owned()),
        other => bail!("no annotation type mapping for tier {:?}", other),
    }
}

/// Build a second-offset collection from a parsed TextGrid.
pub fn annotations_from_textgrid(
    grid: &TextGrid,
    corpusid: NamedNode,
    itemid: NamedNode,
) -> Result<AnnotationCollection> {
    let mut collection = AnnotationCollection::new(corpusid, itemid, Locator::Seconds);

    for tier in &grid.tiers {
        let ty = tier_type(&tier.name)?;

        let mut last: Option<usize> = None;
        for interval in &tier.intervals {
            let label = if interval.text.is_empty() {
                "#"
            } else {
                interval.text.as_str()
            };

            collection.add_annotation(
                ty.clone(),
                label,
                interval.xmin,
                interval.xmax,
                None,
                None,
            )?;

            let idx = collection.annotations.len() - 1;
            if let Some(prev) = last {
                let uri = collection.annotations[idx].uri().clone();
                collection.annotations[prev].set_next(uri);
            }
            last = Some(idx);
        }
    }

    collection.link_children(&ns::maus::ORTHOGRAPHIC.into_owned(), &ns::maus::CANONICAL.into_owned());
    collection.link_children(&ns::maus::ORTHOGRAPHIC.into_owned(), &ns::maus::PHONETIC.into_owned());

    Ok(collection)
}
