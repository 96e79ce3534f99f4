//! Box markup parsing.
//!
//! Box text is plain text with angle-bracket tags that change the style of
//! the text they enclose:
//!
//! - `<b>` bold, `<i>` italic
//! - `<c:blue>` color (named, or `#rrggbb`)
//! - `<f:times-new-roman>` font family (`-` stands for a space)
//! - `<s:20>` size in pixels
//! - `</>` ends the innermost open tag
//!
//! Properties combine with commas: `<c:green, s:20, b>Yes</>`. Keys are
//! matched by their first letter and case is ignored. A tag that is not
//! closed on its line stays open on the following lines, and a tag holding
//! only whitespace (`<` newline `>`) disappears, which lets one visual line
//! span several source lines.
//!
//! # Example
//!
//! ```
//! use bots_tiles_render::text::{parse_markup, TextStyle};
//! use bots_tiles_render::Color;
//!
//! let lines = parse_markup("<c:blue,s:20,b>Hi</> there", &TextStyle::default()).unwrap();
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0][0].text, "Hi");
//! assert_eq!(lines[0][0].style.color, Color::BLUE);
//! assert_eq!(lines[0][1].text, " there");
//! ```

use bots_tiles_core::PerfSpan;
use bots_tiles_core::logging::{span_names, targets};

use super::style::{Line, StyledRun, TextStyle};
use crate::error::ParseError;
use crate::types::Color;

/// Parse markup into logical lines of styled runs.
///
/// Every line of the source produces one entry in the result, which may be
/// empty. Tag styles are layered on top of `default_style`.
pub fn parse_markup(text: &str, default_style: &TextStyle) -> Result<Vec<Line>, ParseError> {
    let _span = PerfSpan::new(span_names::PARSE);

    let text = strip_blank_tags(text);
    let mut parser = MarkupParser {
        default_style,
        scopes: Vec::new(),
    };

    let lines = text
        .split('\n')
        .enumerate()
        .map(|(index, line)| parser.parse_line(line, index + 1))
        .collect::<Result<Vec<_>, _>>()?;

    if !parser.scopes.is_empty() {
        tracing::debug!(
            target: targets::MARKUP,
            open = parser.scopes.len(),
            "markup ends with unclosed tags"
        );
    }
    tracing::trace!(target: targets::MARKUP, lines = lines.len(), "parsed markup");
    Ok(lines)
}

/// Remove tags that contain nothing but spaces and newlines, such as `<>`.
fn strip_blank_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let blank = after.len() - after.trim_start_matches([' ', '\n']).len();
        if after[blank..].starts_with('>') {
            rest = &after[blank + 1..];
        } else {
            out.push('<');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

struct MarkupParser<'a> {
    default_style: &'a TextStyle,
    /// Styles of the currently open tags, innermost last.
    scopes: Vec<TextStyle>,
}

impl MarkupParser<'_> {
    fn current_style(&self) -> &TextStyle {
        self.scopes.last().unwrap_or(self.default_style)
    }

    fn push_text(&self, runs: &mut Line, text: &str) {
        if !text.is_empty() {
            runs.push(StyledRun::new(text, self.current_style().clone()));
        }
    }

    fn parse_line(&mut self, line: &str, line_number: usize) -> Result<Line, ParseError> {
        let mut runs = Line::new();
        let mut rest = line;

        while let Some((start, end)) = find_tag(rest) {
            self.push_text(&mut runs, &rest[..start]);

            let contents: String = rest[start + 1..end]
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect();
            rest = &rest[end + 1..];

            if contents == "/" {
                if self.scopes.pop().is_none() {
                    tracing::debug!(
                        target: targets::MARKUP,
                        line = line_number,
                        "ignoring close tag with no open tag"
                    );
                }
            } else {
                let style = self.tag_style(&contents, line_number)?;
                self.scopes.push(style);
            }
        }

        self.push_text(&mut runs, rest);
        Ok(runs)
    }

    /// Build the style of an open tag by layering its properties on the
    /// default style.
    fn tag_style(&self, contents: &str, line: usize) -> Result<TextStyle, ParseError> {
        let mut style = self.default_style.clone();

        for entry in contents.split(',').filter(|entry| !entry.is_empty()) {
            let (key, value) = entry.split_once(':').unwrap_or((entry, ""));
            let missing = || ParseError::MissingValue {
                key: key.to_string(),
                line,
            };

            match key.chars().next() {
                Some('b') => style.bold = true,
                Some('i') => style.italic = true,
                Some('s') => {
                    style.size = value
                        .parse::<u32>()
                        .ok()
                        .filter(|size| *size > 0)
                        .ok_or_else(|| ParseError::InvalidSize {
                            value: value.to_string(),
                            line,
                        })?;
                }
                Some('c') => {
                    if value.is_empty() {
                        return Err(missing());
                    }
                    let name = value.replace('-', " ");
                    style.color = Color::from_name(&name)
                        .ok_or(ParseError::UnknownColor { name, line })?;
                }
                Some('f') => {
                    if value.is_empty() {
                        return Err(missing());
                    }
                    style.font = Some(value.replace('-', " "));
                }
                _ => {
                    return Err(ParseError::UnknownProperty {
                        key: key.to_string(),
                        line,
                    });
                }
            }
        }

        Ok(style)
    }
}

/// Find the next `<...>` pair. A `<` with no later `>` is not a tag.
fn find_tag(text: &str) -> Option<(usize, usize)> {
    let start = text.find('<')?;
    let end = start + 1 + text[start + 1..].find('>')?;
    Some((start, end))
}
