//! Sectioned docstring parsing.
//!
//! Docstrings follow a sectioned convention: a plain description, then
//! sections introduced by a title line with a dashed underline:
//!
//! ```text
//! Summary of the function.
//!
//! Parameters
//! ----------
//! package : str
//!     The package name
//! version : str
//!     The full version tag
//!
//! Returns
//! -------
//! str
//!     The rendered module
//! ```
//!
//! `Parameters`, `Returns`, `Yields` and `Raises` are parsed structurally;
//! any other section is preserved verbatim, re-appended to the description
//! title-cased and underlined.

use crate::constants::{item_header_re, underline_re};
use crate::model::{ParamDoc, RaiseDoc, ReturnDoc};
use crate::utils::title_case;

/// The structural outcome of parsing one docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    /// The plain description (text before the first section header, plus
    /// any unrecognized sections appended back).
    pub description: String,
    /// Documented parameters, in section order.
    pub params: Vec<(String, ParamDoc)>,
    /// Returns entries.
    pub returns: Vec<ReturnDoc>,
    /// Yields entries.
    pub yields: Vec<ReturnDoc>,
    /// Raises entries.
    pub raises: Vec<RaiseDoc>,
}

/// A raw section: title plus its content lines.
struct Section<'a> {
    title: &'a str,
    lines: Vec<&'a str>,
}

/// Splits a cleaned docstring on section headers: a title line immediately
/// followed by a dashed underline. Returns the leading description and the
/// sections in order.
fn split_sections(doc: &str) -> (String, Vec<Section<'_>>) {
    let lines: Vec<&str> = doc.lines().collect();
    let mut headers: Vec<usize> = Vec::new();
    for i in 0..lines.len() {
        if !lines[i].trim().is_empty()
            && !underline_re().is_match(lines[i])
            && i + 1 < lines.len()
            && underline_re().is_match(lines[i + 1])
        {
            headers.push(i);
        }
    }

    let description_end = headers.first().copied().unwrap_or(lines.len());
    let description = lines[..description_end].join("\n").trim().to_owned();

    let mut sections = Vec::new();
    for (n, &start) in headers.iter().enumerate() {
        let end = headers.get(n + 1).copied().unwrap_or(lines.len());
        sections.push(Section {
            title: lines[start].trim(),
            // Skip the title and its underline.
            lines: lines[start + 2..end].to_vec(),
        });
    }

    (description, sections)
}

/// Pairs up the non-blank lines of a section: an item header line followed
/// by a description line. A trailing header without description yields an
/// empty description.
fn items(lines: &[&str]) -> Vec<(String, String)> {
    let mut result = Vec::new();
    let mut pending: Option<String> = None;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match pending.take() {
            None => pending = Some((*line).trim().to_owned()),
            Some(header) => result.push((header, (*line).trim().to_owned())),
        }
    }
    if let Some(header) = pending {
        result.push((header, String::new()));
    }
    result
}

/// Parses a Returns/Yields item header. `name : type` carries both groups;
/// without the `name :` prefix the sole captured text is the type and the
/// name is empty.
fn parse_return_item(header: &str, description: String) -> ReturnDoc {
    if let Some(caps) = item_header_re().captures(header) {
        ReturnDoc {
            type_text: caps[2].trim().to_owned(),
            description,
            name: caps[1].to_owned(),
        }
    } else {
        ReturnDoc {
            type_text: header.to_owned(),
            description,
            name: String::new(),
        }
    }
}

/// Parses a cleaned docstring into its structured form.
#[must_use]
pub fn parse(doc: &str) -> ParsedDoc {
    let (description, sections) = split_sections(doc);
    let mut parsed = ParsedDoc {
        description,
        ..ParsedDoc::default()
    };

    for section in sections {
        match section.title.to_lowercase().as_str() {
            "parameters" => {
                for (header, description) in items(&section.lines) {
                    let (name, type_text) = match item_header_re().captures(&header) {
                        Some(caps) => (caps[1].to_owned(), caps[2].trim().to_owned()),
                        None => (header, String::new()),
                    };
                    parsed.params.push((
                        name,
                        ParamDoc {
                            type_text,
                            description,
                        },
                    ));
                }
            }
            "returns" => {
                for (header, description) in items(&section.lines) {
                    parsed.returns.push(parse_return_item(&header, description));
                }
            }
            "yields" => {
                for (header, description) in items(&section.lines) {
                    parsed.yields.push(parse_return_item(&header, description));
                }
            }
            "raises" => {
                for (header, description) in items(&section.lines) {
                    parsed.raises.push(RaiseDoc {
                        exception: header,
                        description,
                    });
                }
            }
            other => {
                // Not structurally parsed; re-append to the description.
                let title = title_case(other);
                if !parsed.description.is_empty() {
                    parsed.description.push_str("\n\n");
                }
                parsed.description.push_str(&title);
                parsed.description.push('\n');
                parsed.description.push_str(&"-".repeat(title.len()));
                for line in &section.lines {
                    parsed.description.push('\n');
                    parsed.description.push_str(line);
                }
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
Build the version module for the distribution.

Parameters
----------
package : str
    The git package name
version : str
    The full version tag

Returns
-------
toto : None
    This is nasty
str
    Guess?

Raises
------
RuntimeError
    Never do that again
";

    #[test]
    fn description_stops_at_first_header() {
        let parsed = parse(DOC);
        assert_eq!(
            parsed.description,
            "Build the version module for the distribution."
        );
    }

    #[test]
    fn parameters_carry_type_and_description() {
        let parsed = parse(DOC);
        assert_eq!(parsed.params.len(), 2);
        assert_eq!(parsed.params[0].0, "package");
        assert_eq!(parsed.params[0].1.type_text, "str");
        assert_eq!(parsed.params[0].1.description, "The git package name");
    }

    #[test]
    fn return_without_name_swaps_groups() {
        let parsed = parse(DOC);
        assert_eq!(parsed.returns.len(), 2);
        assert_eq!(parsed.returns[0].name, "toto");
        assert_eq!(parsed.returns[0].type_text, "None");
        // Sole text carries the type; the name stays empty.
        assert_eq!(parsed.returns[1].name, "");
        assert_eq!(parsed.returns[1].type_text, "str");
        assert_eq!(parsed.returns[1].description, "Guess?");
    }

    #[test]
    fn raises_recorded_without_validation() {
        let parsed = parse(DOC);
        assert_eq!(parsed.raises.len(), 1);
        assert_eq!(parsed.raises[0].exception, "RuntimeError");
        assert_eq!(parsed.raises[0].description, "Never do that again");
    }

    #[test]
    fn unknown_section_reappends_to_description() {
        let doc = "Summary.\n\nsee also\n--------\nother_function\n";
        let parsed = parse(doc);
        assert!(parsed.description.starts_with("Summary."));
        assert!(parsed.description.contains("See Also\n--------\nother_function"));
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn yields_parsed_like_returns() {
        let doc = "Doc.\n\nYields\n------\nint\n    Next value\n";
        let parsed = parse(doc);
        assert_eq!(parsed.yields.len(), 1);
        assert_eq!(parsed.yields[0].type_text, "int");
    }

    #[test]
    fn plain_docstring_is_all_description() {
        let parsed = parse("Just a description.");
        assert_eq!(parsed.description, "Just a description.");
        assert!(parsed.returns.is_empty());
    }
}
