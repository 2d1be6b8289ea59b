//! Parser for Praat long-format ("ooTextFile") TextGrid files, the shape
//! MAUS writes.
//!
//! Expected structure:
//!
//! File type = "ooTextFile"
//! Object class = "TextGrid"
//!
//! xmin = 0
//! xmax = 2.3
//! tiers? <exists>
//! size = 3
//! item []:
//!     item [1]:
//!         class = "IntervalTier"
//!         name = "MAU"
//!         xmin = 0
//!         xmax = 2.3
//!         intervals: size = 4
//!         intervals [1]:
//!             xmin = 0
//!             xmax = 0.1
//!             text = ""
//!
//! Point tiers (class "TextTier") are skipped with a warning; anything
//! else is an error. Quoted values un-escape "" to ".

use crate::Result;
use crate::textgrid::tier::{Interval, TextGrid, Tier};
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;

pub fn parse_textgrid_file(path: &str) -> Result<TextGrid> {
    let text = fs::read_to_string(path).with_context(|| format!("read TextGrid file {}", path))?;
    parse_textgrid(&text).with_context(|| format!("parse TextGrid file {}", path))
}

/// Tier under construction; finalized when the next tier (or EOF) arrives.
#[derive(Default)]
struct TierBuilder {
    class: String,
    name: String,
    xmin: f64,
    xmax: f64,
    intervals: Vec<Interval>,
    in_interval: bool,
}

pub fn parse_textgrid(text: &str) -> Result<TextGrid> {
    // attribute line: key = value  (key may contain a space, e.g. "File type")
    let re_attr = Regex::new(r#"^\s*([A-Za-z][A-Za-z ]*?)\s*=\s*(.*?)\s*$"#)?;
    // block openers: item [1]:  /  intervals [2]:  /  points [3]:
    let re_block = Regex::new(r#"^\s*(item|intervals|points)\s*\[\s*(\d*)\s*\]\s*:\s*$"#)?;
    // size lines inside a tier: intervals: size = 4
    let re_size = Regex::new(r#"^\s*(intervals|points)\s*:\s*size\s*=\s*\d+\s*$"#)?;

    let mut grid = TextGrid::default();
    let mut current: Option<TierBuilder> = None;
    let mut saw_header = false;

    for (lineno, raw) in text.lines().enumerate() {
        let lno = lineno + 1;
        let line = raw.trim();

        if line.is_empty() || line == "tiers? <exists>" {
            continue;
        }

        if let Some(caps) = re_block.captures(line) {
            let kind = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let index = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            match kind {
                // "item []:" opens the tier list; "item [n]:" starts a tier.
                "item" if index.is_empty() => {}
                "item" => {
                    if let Some(done) = current.take() {
                        finish_tier(done, &mut grid, lno)?;
                    }
                    current = Some(TierBuilder::default());
                }
                "intervals" | "points" => match current.as_mut() {
                    Some(tier) => {
                        tier.in_interval = true;
                        if kind == "intervals" {
                            tier.intervals.push(Interval {
                                xmin: 0.0,
                                xmax: 0.0,
                                text: String::new(),
                            });
                        }
                    }
                    None => bail!("line {}: {} block outside of a tier", lno, kind),
                },
                _ => {}
            }
            continue;
        }

        if re_size.is_match(line) {
            continue;
        }

        let caps = match re_attr.captures(line) {
            Some(c) => c,
            None => bail!("line {}: cannot parse line: {:?}", lno, raw),
        };
        let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let value = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        match (key, current.as_mut()) {
            ("File type", _) => {
                if unquote(value) != "ooTextFile" {
                    bail!("line {}: not an ooTextFile TextGrid: {}", lno, value);
                }
                saw_header = true;
            }
            ("Object class", _) => {
                if unquote(value) != "TextGrid" {
                    bail!("line {}: object class is not TextGrid: {}", lno, value);
                }
            }
            ("size", None) => {}
            ("class", Some(tier)) => tier.class = unquote(value),
            ("name", Some(tier)) => tier.name = unquote(value),
            ("text", Some(tier)) => match tier.intervals.last_mut() {
                Some(interval) if tier.in_interval => interval.text = unquote(value),
                _ => bail!("line {}: text outside of an interval", lno),
            },
            // "mark" belongs to point tiers, which get skipped wholesale.
            ("mark", Some(_)) => {}
            ("number", Some(_)) => {}
            ("xmin", scope) => {
                let v = parse_number(value, lno)?;
                match scope {
                    Some(tier) if tier.in_interval => match tier.intervals.last_mut() {
                        Some(interval) => interval.xmin = v,
                        None => {}
                    },
                    Some(tier) => tier.xmin = v,
                    None => grid.xmin = v,
                }
            }
            ("xmax", scope) => {
                let v = parse_number(value, lno)?;
                match scope {
                    Some(tier) if tier.in_interval => match tier.intervals.last_mut() {
                        Some(interval) => interval.xmax = v,
                        None => {}
                    },
                    Some(tier) => tier.xmax = v,
                    None => grid.xmax = v,
                }
            }
            (key, _) => bail!("line {}: unexpected attribute {:?}", lno, key),
        }
    }

    if !saw_header {
        bail!("missing ooTextFile header");
    }

    if let Some(done) = current.take() {
        finish_tier(done, &mut grid, text.lines().count())?;
    }

    Ok(grid)
}

fn finish_tier(tier: TierBuilder, grid: &mut TextGrid, lno: usize) -> Result<()> {
    match tier.class.as_str() {
        "IntervalTier" => {
            grid.tiers.push(Tier {
                name: tier.name,
                xmin: tier.xmin,
                xmax: tier.xmax,
                intervals: tier.intervals,
            });
        }
        "TextTier" => {
            eprintln!("WARN: skipping point tier '{}'", tier.name);
        }
        other => bail!("line {}: unsupported tier class {:?}", lno, other),
    }
    Ok(())
}

fn parse_number(s: &str, lno: usize) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("line {}: bad number: {:?}", lno, s))
}

/// Strip surrounding quotes and un-escape doubled quotes.
fn unquote(s: &str) -> String {
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.replace("\"\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 2.3
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "IntervalTier"
        name = "ORT"
        xmin = 0
        xmax = 2.3
        intervals: size = 2
        intervals [1]:
            xmin = 0
            xmax = 1.1
            text = "hello"
        intervals [2]:
            xmin = 1.1
            xmax = 2.3
            text = ""
    item [2]:
        class = "IntervalTier"
        name = "MAU"
        xmin = 0
        xmax = 2.3
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 0.5
            text = "h"
        intervals [2]:
            xmin = 0.5
            xmax = 1.1
            text = "V"
        intervals [3]:
            xmin = 1.1
            xmax = 2.3
            text = "say ""hi"""
"#;

    #[test]
    fn parses_tiers_and_intervals() {
        let grid = parse_textgrid(SAMPLE).unwrap();

        assert_eq!(0.0, grid.xmin);
        assert_eq!(2.3, grid.xmax);
        assert_eq!(2, grid.tiers.len());

        let ort = &grid.tiers[0];
        assert_eq!("ORT", ort.name);
        assert_eq!(2, ort.intervals.len());
        assert_eq!(
            Interval {
                xmin: 0.0,
                xmax: 1.1,
                text: "hello".to_string()
            },
            ort.intervals[0]
        );
        assert_eq!("", ort.intervals[1].text);

        let mau = &grid.tiers[1];
        assert_eq!("MAU", mau.name);
        assert_eq!(3, mau.intervals.len());
        assert_eq!("say \"hi\"", mau.intervals[2].text);
    }

    #[test]
    fn skips_point_tiers_with_a_warning() {
        let text = r#"File type = "ooTextFile"
Object class = "TextGrid"
xmin = 0
xmax = 1
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "TextTier"
        name = "clicks"
        xmin = 0
        xmax = 1
        points: size = 1
        points [1]:
            number = 0.5
            mark = "x"
    item [2]:
        class = "IntervalTier"
        name = "ORT"
        xmin = 0
        xmax = 1
        intervals: size = 1
        intervals [1]:
            xmin = 0
            xmax = 1
            text = "hi"
"#;
        let grid = parse_textgrid(text).unwrap();
        assert_eq!(1, grid.tiers.len());
        assert_eq!("ORT", grid.tiers[0].name);
    }

    #[test]
    fn rejects_non_textgrid_files() {
        assert!(parse_textgrid("just some text").is_err());
        assert!(parse_textgrid("File type = \"ooTextFile\"\nObject class = \"Sound\"").is_err());
    }

    #[test]
    fn rejects_unknown_tier_classes() {
        let text = r#"File type = "ooTextFile"
Object class = "TextGrid"
xmin = 0
xmax = 1
item []:
    item [1]:
        class = "FancyTier"
        name = "X"
        xmin = 0
        xmax = 1
"#;
        assert!(parse_textgrid(text).is_err());
    }

    #[test]
    fn reports_malformed_lines_with_position() {
        let text = "File type = \"ooTextFile\"\nObject class = \"TextGrid\"\n???\n";
        let err = parse_textgrid(text).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}
