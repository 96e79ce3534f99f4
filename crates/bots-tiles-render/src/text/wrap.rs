//! Greedy line wrapping.
//!
//! Runs are fitted into the remaining space of a line by cutting at the last
//! space until the rest fits. A word longer than a whole line is cut between
//! characters instead, but only when it starts a fresh line; a word that
//! would continue a partly filled line moves to the next line first.

use bots_tiles_core::PerfSpan;
use bots_tiles_core::logging::{span_names, targets};
use unicode_segmentation::UnicodeSegmentation;

use super::shaping::{TextMeasurer, shape_run, shape_text};
use super::style::{Line, RenderedRun, StyledRun, TextStyle, VisualLine};
use crate::error::TextError;

/// The result of fitting one run into a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapped {
    /// The part of the run that fits, or `None` if nothing fits and the whole
    /// run should start a new line.
    pub run: Option<RenderedRun>,
    /// Text that did not fit. Empty when the whole run fits.
    pub leftover: String,
}

/// Fit as much of `run` as possible into `line_budget - used_space`.
///
/// Returns [`TextError::TooSmall`] when a single character does not fit on
/// an empty line.
pub fn wrap_run(
    measurer: &mut impl TextMeasurer,
    run: &StyledRun,
    used_space: f32,
    line_budget: f32,
    allow_character_wrap: bool,
) -> Result<Wrapped, TextError> {
    let available = line_budget - used_space;
    let mut text = run.text.as_str();

    loop {
        let size = measurer.measure(text, &run.style);
        if size.width <= available {
            let rendered = RenderedRun {
                text: text.to_string(),
                style: run.style.clone(),
                size,
            };
            return Ok(Wrapped {
                run: Some(rendered),
                leftover: run.text[text.len()..].to_string(),
            });
        }

        let cut = match text.rfind(' ') {
            Some(index) if index > 0 => index,
            _ if !allow_character_wrap => return Ok(unplaced(run)),
            _ => match text.grapheme_indices(true).next_back() {
                Some((index, _)) if index > 0 => index,
                _ if used_space == 0.0 => {
                    return Err(TextError::TooSmall {
                        text: text.to_string(),
                        budget: line_budget,
                    });
                }
                _ => return Ok(unplaced(run)),
            },
        };
        text = &text[..cut];
    }
}

fn unplaced(run: &StyledRun) -> Wrapped {
    Wrapped {
        run: None,
        leftover: run.text.clone(),
    }
}

/// Wrap logical lines into visual lines no wider than `line_budget`.
///
/// Logical lines without visible text produce no visual line, and runs that
/// measure zero width are dropped. With `wrap_enabled` false every logical
/// line becomes exactly one visual line, however wide.
pub fn wrap_lines(
    measurer: &mut impl TextMeasurer,
    lines: &[Line],
    line_budget: f32,
    wrap_enabled: bool,
) -> Result<Vec<VisualLine>, TextError> {
    let _span = PerfSpan::new(span_names::LAYOUT);
    let mut visual: Vec<VisualLine> = Vec::new();

    for line in lines {
        if !wrap_enabled {
            let runs: VisualLine = line
                .iter()
                .map(|run| shape_run(measurer, run))
                .filter(|run| run.width() > 0.0)
                .collect();
            if !runs.is_empty() {
                visual.push(runs);
            }
            continue;
        }

        let mut used_space = 0.0_f32;
        for run in line {
            let mut pending = run.clone();

            loop {
                let wrapped = wrap_run(measurer, &pending, used_space, line_budget, used_space == 0.0)?;

                let Some(fragment) = wrapped.run else {
                    used_space = 0.0;
                    continue;
                };

                if fragment.width() > 0.0 {
                    let width = fragment.width();
                    match visual.last_mut() {
                        Some(last) if used_space > 0.0 => last.push(fragment),
                        _ => visual.push(vec![fragment]),
                    }
                    used_space += width;
                }

                if wrapped.leftover.is_empty() {
                    break;
                }
                used_space = 0.0;
                pending.text = wrapped.leftover.trim_matches(' ').to_string();
            }
        }
    }

    tracing::trace!(
        target: targets::LAYOUT,
        logical = lines.len(),
        visual = visual.len(),
        budget = line_budget,
        "wrapped lines"
    );
    Ok(visual)
}

/// Measure each line of `text` as one unwrapped visual line, ignoring
/// blank lines.
pub fn unwrapped_lines(
    measurer: &mut impl TextMeasurer,
    text: &[&str],
    style: &TextStyle,
) -> Vec<VisualLine> {
    text.iter()
        .filter(|line| !line.is_empty())
        .map(|line| vec![shape_text(measurer, line, style)])
        .collect()
}
