//! Section identification: find the ingredient and step blocks in the line
//! sequence, then sweep stray ingredient fragments out of the leftovers.

use std::ops::Range;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{ingredients, steps};
use crate::config::FormatterConfig;
use crate::lexicon::{self, INGREDIENT_SECTION_KEYWORDS, STEP_SECTION_KEYWORDS};

/// Lines of the document grouped by section. Every input line lands in
/// exactly one group, except section-header lines, which are consumed.
#[derive(Debug, Default)]
pub(crate) struct SectionMap {
    pub ingredient_lines: Vec<String>,
    pub step_lines: Vec<String>,
    pub other_lines: Vec<String>,
}

/// Half-open line ranges claimed by each section.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct SectionSpans {
    pub ingredients: Option<Range<usize>>,
    pub steps: Option<Range<usize>>,
}

// Fallback candidates are collected below the title territory.
const TITLE_LINES: usize = 2;

pub(crate) fn identify_sections(lines: &[String], config: &FormatterConfig) -> SectionMap {
    let spans = locate_spans(lines, config);
    debug!("section spans: {:?}", spans);
    let map = assign_lines(lines, &spans);
    reclassify_strays(map)
}

/// Locates the ingredient and step spans, first by header keywords, then by
/// consecutive runs of content-typed lines for whichever header is missing.
/// The returned spans never overlap and never exceed the line bounds.
pub(crate) fn locate_spans(lines: &[String], config: &FormatterConfig) -> SectionSpans {
    let mut ingredient_start = None;
    let mut step_start = None;

    // First pass: explicit section markers, first match of each kind wins
    // (a later "additional ingredients" subheading must not truncate the
    // section already found).
    for (index, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if ingredient_start.is_none()
            && INGREDIENT_SECTION_KEYWORDS
                .iter()
                .any(|keyword| lower.contains(keyword))
        {
            ingredient_start = Some(index);
        }
        if step_start.is_none()
            && STEP_SECTION_KEYWORDS
                .iter()
                .any(|keyword| lower.contains(keyword))
        {
            step_start = Some(index);
        }
    }

    let mut spans = match (ingredient_start, step_start) {
        (Some(ingredients), Some(steps)) => {
            if ingredients < steps {
                SectionSpans {
                    ingredients: Some(ingredients..steps),
                    steps: Some(steps..lines.len()),
                }
            } else {
                SectionSpans {
                    ingredients: Some(ingredients..lines.len()),
                    steps: Some(steps..ingredients),
                }
            }
        }
        (Some(ingredients), None) => SectionSpans {
            ingredients: Some(ingredients..lines.len()),
            steps: None,
        },
        (None, Some(steps)) => SectionSpans {
            ingredients: None,
            steps: Some(steps..lines.len()),
        },
        (None, None) => SectionSpans::default(),
    };

    // Second pass: whichever section has no header is searched for as a
    // consecutive run of lines that look the part.
    if spans.ingredients.is_none() {
        let candidates: Vec<usize> = lines
            .iter()
            .enumerate()
            .skip(TITLE_LINES)
            .filter(|(index, line)| {
                !within(&spans.steps, *index) && ingredients::looks_like_ingredient(line)
            })
            .map(|(index, _)| index)
            .collect();
        spans.ingredients = longest_consecutive_run(&candidates, config.min_ingredient_run);
    }
    if spans.steps.is_none() {
        let candidates: Vec<usize> = lines
            .iter()
            .enumerate()
            .skip(TITLE_LINES)
            .filter(|(index, line)| {
                !within(&spans.ingredients, *index) && steps::looks_like_step(line)
            })
            .map(|(index, _)| index)
            .collect();
        spans.steps = longest_consecutive_run(&candidates, config.min_step_run);
    }

    spans
}

fn within(span: &Option<Range<usize>>, index: usize) -> bool {
    span.as_ref().is_some_and(|range| range.contains(&index))
}

/// Returns the span of the longest run of consecutive indices, if it is at
/// least `min_len` long. The earliest run wins a tie.
fn longest_consecutive_run(indices: &[usize], min_len: usize) -> Option<Range<usize>> {
    let (first, rest) = indices.split_first()?;

    let mut best = *first..*first + 1;
    let mut current = best.clone();
    for &index in rest {
        if index == current.end {
            current.end = index + 1;
        } else {
            if current.len() > best.len() {
                best = current.clone();
            }
            current = index..index + 1;
        }
    }
    if current.len() > best.len() {
        best = current;
    }

    (best.len() >= min_len).then_some(best)
}

/// Distributes lines into the three groups. A span's first line is dropped
/// when it is the section header itself.
fn assign_lines(lines: &[String], spans: &SectionSpans) -> SectionMap {
    let mut map = SectionMap::default();
    for (index, line) in lines.iter().enumerate() {
        if within(&spans.ingredients, index) {
            if !is_header_line(&spans.ingredients, index, line) {
                map.ingredient_lines.push(line.clone());
            }
        } else if within(&spans.steps, index) {
            if !is_header_line(&spans.steps, index, line) {
                map.step_lines.push(line.clone());
            }
        } else {
            map.other_lines.push(line.clone());
        }
    }
    map
}

fn is_header_line(span: &Option<Range<usize>>, index: usize, line: &str) -> bool {
    span.as_ref().map(|range| range.start) == Some(index) && lexicon::is_section_header(line)
}

static STRAY_UNIT_OR_NOUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(cups?|tbsp|tsp|teaspoons?|tablespoons?|sugar|flour|butter)\b").unwrap()
});
static STRAY_FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d\s*[/\d]").unwrap());
static STRAY_QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[\d½¼¾⅓⅔]+\s*\w").unwrap());

/// Moves leftover lines with strong ingredient signals into the ingredient
/// group. Title/description heuristics are loose and can leave a split-off
/// ingredient fragment sitting in the prose.
fn reclassify_strays(mut map: SectionMap) -> SectionMap {
    let (strays, kept): (Vec<String>, Vec<String>) = map
        .other_lines
        .drain(..)
        .partition(|line| is_stray_ingredient(line));

    if !strays.is_empty() {
        debug!("reclassified {} stray ingredient lines", strays.len());
        map.ingredient_lines.extend(strays);
    }
    map.other_lines = kept;
    map
}

fn is_stray_ingredient(line: &str) -> bool {
    let lower = line.to_lowercase();
    STRAY_UNIT_OR_NOUN.is_match(line)
        || STRAY_FRACTION.is_match(line)
        || STRAY_QUANTITY.is_match(line)
        || lower.contains("granulated")
        || lower.contains("purpose")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn test_both_headers_found() {
        let lines = lines(&[
            "Brownies",
            "Ingredients:",
            "1 cup sugar",
            "Instructions:",
            "1. Mix everything together",
        ]);
        let spans = locate_spans(&lines, &FormatterConfig::default());
        assert_eq!(spans.ingredients, Some(1..3));
        assert_eq!(spans.steps, Some(3..5));
    }

    #[test]
    fn test_steps_before_ingredients() {
        let lines = lines(&[
            "Directions",
            "1. Beat the eggs until pale",
            "Ingredients",
            "2 eggs",
        ]);
        let spans = locate_spans(&lines, &FormatterConfig::default());
        assert_eq!(spans.steps, Some(0..2));
        assert_eq!(spans.ingredients, Some(2..4));
    }

    #[test]
    fn test_first_header_of_a_kind_wins() {
        let lines = lines(&[
            "Ingredients",
            "1 cup sugar",
            "Additional ingredients",
            "1 cup flour",
        ]);
        let spans = locate_spans(&lines, &FormatterConfig::default());
        assert_eq!(spans.ingredients, Some(0..4));
    }

    #[test]
    fn test_spans_stay_disjoint_and_in_bounds() {
        let cases: Vec<Vec<String>> = vec![
            lines(&["Ingredients", "1 cup sugar", "Steps", "1. Mix"]),
            lines(&["title", "prose", "1 cup flour", "2 tbsp milk", "3 eggs"]),
            lines(&["only prose here", "nothing else"]),
            lines(&["Steps", "1. Mix", "Ingredients", "1 cup flour"]),
        ];
        for case in &cases {
            let spans = locate_spans(case, &FormatterConfig::default());
            if let Some(range) = &spans.ingredients {
                assert!(range.end <= case.len());
            }
            if let Some(range) = &spans.steps {
                assert!(range.end <= case.len());
            }
            if let (Some(ingredients), Some(steps)) = (&spans.ingredients, &spans.steps) {
                let overlap = ingredients.start < steps.end && steps.start < ingredients.end;
                assert!(!overlap, "overlapping spans for {case:?}");
            }
        }
    }

    #[test]
    fn test_fallback_accepts_consecutive_ingredient_run() {
        let lines = lines(&[
            "Lemon Bars",
            "A bright, tangy treat",
            "1 cup flour",
            "2 tbsp lemon juice",
            "3 large eggs",
        ]);
        let spans = locate_spans(&lines, &FormatterConfig::default());
        assert_eq!(spans.ingredients, Some(2..5));
    }

    #[test]
    fn test_fallback_rejects_short_run() {
        let lines = lines(&[
            "Lemon Bars",
            "A bright, tangy treat",
            "1 cup flour",
            "just prose in between",
            "3 large eggs",
        ]);
        let spans = locate_spans(&lines, &FormatterConfig::default());
        assert_eq!(spans.ingredients, None);
    }

    #[test]
    fn test_fallback_skips_title_territory() {
        // The candidate run starts inside the first two lines, so only the
        // part below them can count toward the minimum length.
        let lines = lines(&["1 cup flour", "2 tbsp milk", "3 eggs beaten lightly"]);
        let spans = locate_spans(&lines, &FormatterConfig::default());
        assert_eq!(spans.ingredients, None);
    }

    #[test]
    fn test_header_line_is_consumed() {
        let lines = lines(&["Ingredients:", "1 cup sugar"]);
        let map = identify_sections(&lines, &FormatterConfig::default());
        assert_eq!(map.ingredient_lines, vec!["1 cup sugar"]);
        assert!(map.other_lines.is_empty());
    }

    #[test]
    fn test_stray_ingredient_moves_out_of_other() {
        let lines = lines(&[
            "Grandma's Pie",
            "Instructions",
            "1. Roll out the dough thinly",
            "2. Chill before serving",
        ]);
        // sneak a stray fragment ahead of the step header
        let mut lines = lines;
        lines.insert(1, "1/2 cup granulated".to_string());
        let map = identify_sections(&lines, &FormatterConfig::default());
        assert_eq!(map.ingredient_lines, vec!["1/2 cup granulated"]);
        assert_eq!(map.other_lines, vec!["Grandma's Pie"]);
    }

    #[test]
    fn test_longest_run_prefers_earliest_on_tie() {
        assert_eq!(longest_consecutive_run(&[2, 3, 6, 7], 2), Some(2..4));
        assert_eq!(longest_consecutive_run(&[2, 4, 6], 2), None);
        assert_eq!(longest_consecutive_run(&[], 1), None);
    }
}
