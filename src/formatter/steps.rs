//! Step extraction: group lines into instructions, strip numbering, merge
//! continuations and stray short fragments.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static NEW_STEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:\d+[.):]|[ivx]+[.)]|[•*-])").unwrap());
static STEP_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:step\s*\d+[.:)]?\s*|\d+[.):]\s*|[ivx]+[.)]\s*|[•*-]\s*)").unwrap()
});
static FALLBACK_STEP: Lazy<Regex> = Lazy::new(|| {
    let verbs = crate::lexicon::STEP_VERBS.join("|");
    Regex::new(&format!(r"(?i)^\s*(?:step\s*\d+|\d+[.)]|{verbs})\b")).unwrap()
});
static STEP_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:\d+[.)]|[•*-])").unwrap());

/// Content heuristic: numbered or bulleted lines read like instructions.
pub(crate) fn looks_like_step(line: &str) -> bool {
    STEP_MARKER.is_match(line)
}

#[derive(Debug)]
struct ExtractedStep {
    text: String,
    // explicitly numbered/bulleted steps are exempt from the short-step merge
    marked: bool,
}

/// Groups the step-section lines into instructions. With no identified
/// section, falls back to scanning the whole document for step-like lines.
pub(crate) fn extract_steps(
    step_lines: &[String],
    all_lines: &[String],
    short_step_threshold: usize,
) -> Vec<String> {
    let mut extracted: Vec<ExtractedStep> = Vec::new();

    if !step_lines.is_empty() {
        let mut current: Option<ExtractedStep> = None;
        for line in step_lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let starts_new = NEW_STEP.is_match(trimmed);
            if starts_new || current.is_none() {
                if let Some(step) = current.take() {
                    if !step.text.is_empty() {
                        extracted.push(step);
                    }
                }
                current = Some(ExtractedStep {
                    text: STEP_PREFIX.replace(trimmed, "").trim().to_string(),
                    marked: starts_new,
                });
            } else if let Some(step) = current.as_mut() {
                step.text.push(' ');
                step.text.push_str(trimmed);
            }
        }
        if let Some(step) = current.take() {
            if !step.text.is_empty() {
                extracted.push(step);
            }
        }
    }

    if extracted.is_empty() {
        debug!("no step section content, scanning all lines for step-like text");
        for line in all_lines {
            let trimmed = line.trim();
            if FALLBACK_STEP.is_match(trimmed) {
                let text = STEP_PREFIX.replace(trimmed, "").trim().to_string();
                if !text.is_empty() {
                    extracted.push(ExtractedStep {
                        text,
                        marked: NEW_STEP.is_match(trimmed),
                    });
                }
            }
        }
    }

    merge_short_steps(extracted, short_step_threshold)
}

/// Folds unmarked steps shorter than the threshold into the preceding step.
/// Very short unmarked "steps" are almost always OCR line fragments rather
/// than genuine instructions.
fn merge_short_steps(steps: Vec<ExtractedStep>, threshold: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for step in steps {
        match merged.last_mut() {
            Some(previous) if !step.marked && step.text.len() < threshold => {
                previous.push(' ');
                previous.push_str(&step.text);
            }
            _ => merged.push(step.text),
        }
    }
    merged
}
