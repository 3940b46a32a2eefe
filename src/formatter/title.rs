//! Title selection and best-effort description recovery.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ingredients::looks_like_ingredient;
use crate::lexicon::is_section_header;

// Anything this short is a fragment, not a title.
const MIN_TITLE_LEN: usize = 3;

static LEADING_STEP_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

static UNIT_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(cups?|tbsp|tsp|teaspoons?|tablespoons?)\b").unwrap());
static NOUN_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(granulated|flour|sugar|butter|oil)\b").unwrap());
static FRACTION_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d\s*[/\d]").unwrap());
static STEP_OPENING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:step\s*\d+|\d+\.|\d+\)|preheat|mix|stir|add|combine|beat|fold|bake|cook)")
        .unwrap()
});

/// Picks the title: the first line that is long enough, is not a section
/// header, does not end like one, and does not open with step numbering.
pub(crate) fn extract_title(lines: &[String]) -> String {
    lines
        .iter()
        .find(|line| {
            line.len() > MIN_TITLE_LEN
                && !is_section_header(line)
                && !line.ends_with(':')
                && !LEADING_STEP_NUMBER.is_match(line)
        })
        .cloned()
        .unwrap_or_default()
}

/// Assembles the description from leftover lines: whatever is not the
/// title, not header-like, not ingredient-looking, and not already present
/// in an extracted step. Best-effort prose recovery, not guaranteed
/// complete.
pub(crate) fn extract_description(other_lines: &[String], title: &str, steps: &[String]) -> String {
    other_lines
        .iter()
        .filter(|line| line.as_str() != title)
        .filter(|line| !is_section_header(line))
        .filter(|line| !looks_like_ingredient(line))
        .filter(|line| {
            let lower = line.to_lowercase();
            !steps.iter().any(|step| lower.contains(&step.to_lowercase()))
        })
        .filter(|line| !UNIT_MENTION.is_match(line))
        .filter(|line| !NOUN_MENTION.is_match(line))
        .filter(|line| !FRACTION_MENTION.is_match(line))
        .filter(|line| !STEP_OPENING.is_match(line))
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}
