use crate::error::{ScanError, ScanErrorKind};
use crate::tracker::{Callout, Region};
use serde::Serialize;
use std::collections::HashMap;

/// The rendered contribution of one region to an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    /// Ordering key within the example.
    pub part: u32,
    /// Declared language override, if the region carried one. Absent
    /// means the renderer infers the language externally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Final text after indentation stripping.
    pub text: String,
    pub callouts: Vec<Callout>,
}

/// A logical, possibly multi-file, multi-part documentation snippet.
///
/// This is the sole shape the engine exposes to renderers; serializing an
/// example with serde yields `{ name, title?, parts: [...] }` with parts
/// in ascending part order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub name: String,
    /// Display title: the first declared title among the parts, in part
    /// order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub parts: Vec<Part>,
}

impl Example {
    /// The example's language: the first part that declares one, in part
    /// order. Individual parts may still override it.
    pub fn language(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| p.language.as_deref())
    }

    /// Serializes the example into the JSON shape renderers consume.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// All parts joined into one flat text, for renderers that do not
    /// distinguish parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The result of grouping regions into examples.
#[derive(Debug, Default)]
pub struct Assembly {
    /// Assembled examples, in first-seen name order.
    pub examples: Vec<Example>,
    /// Duplicate-part conflicts. Recoverable: the first-arrived region
    /// won, the rest were discarded.
    pub errors: Vec<ScanError>,
}

/// Groups completed regions by example name and builds the final
/// examples.
///
/// Assembly is a pure reduction over the region list: regions may come
/// from any number of files scanned in any order, and the arrival order
/// of the list is the deterministic tiebreaker for duplicate parts.
pub fn assemble_examples(regions: Vec<Region>) -> Assembly {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Region>> = HashMap::new();
    let mut errors = Vec::new();

    for region in regions {
        if !groups.contains_key(&region.name) {
            order.push(region.name.clone());
        }
        let group = groups.entry(region.name.clone()).or_default();

        if let Some(kept) = group.iter().find(|r| r.part == region.part) {
            errors.push(ScanError::new(
                ScanErrorKind::DuplicatePart {
                    name: region.name.clone(),
                    part: region.part,
                    kept_file: kept.file.clone(),
                    kept_line: kept.start_line,
                },
                region.file.clone(),
                region.start_line,
            ));
            continue;
        }

        group.push(region);
    }

    let examples = order
        .into_iter()
        .map(|name| {
            let mut group = groups.remove(&name).unwrap_or_default();
            group.sort_by_key(|r| r.part);
            build_example(name, group)
        })
        .collect();

    Assembly { examples, errors }
}

fn build_example(name: String, regions: Vec<Region>) -> Example {
    let title = regions.iter().find_map(|r| r.title.clone());

    let parts = regions
        .into_iter()
        .map(|region| Part {
            part: region.part,
            language: region.language.clone(),
            text: strip_indentation(&region.lines, region.indentation),
            callouts: region.callouts,
        })
        .collect();

    Example { name, title, parts }
}

/// Removes the first `indentation` characters from every line. A line
/// shorter than that is reduced to the empty string, never an error.
fn strip_indentation(lines: &[String], indentation: usize) -> String {
    lines
        .iter()
        .map(|line| {
            match line.char_indices().nth(indentation) {
                Some((byte_idx, _)) => &line[byte_idx..],
                None => "",
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
