//! Ingredient extraction: a cascade of leading-quantity patterns over the
//! section lines, a spatial pass over boxed observations, and a
//! consolidation pass that stitches split fragments back together.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::steps::looks_like_step;
use crate::lexicon::{COMMON_INGREDIENTS, MEASUREMENT_UNITS};
use crate::model::{BoundingBox, Ingredient};

type PatternFn = fn(&str) -> Option<Ingredient>;

/// The parsing cascade, tried in order per line; the first match wins.
const PATTERNS: &[PatternFn] = &[
    bare_unit_fragment,
    quantity_with_unit,
    leading_quantity,
    leading_fraction,
    unit_of_name,
    unit_anywhere,
    whole_line_fallback,
];

/// Runs both extraction strategies and consolidates the union.
pub(crate) fn extract_ingredients(
    section_lines: &[String],
    spatial_lines: &[(String, BoundingBox)],
) -> Vec<Ingredient> {
    let mut found = Vec::new();

    // Spatial strategy: boxed observations that look like ingredients,
    // wherever they sit on the page.
    for (text, _) in spatial_lines {
        if looks_like_ingredient(text) {
            if let Some(ingredient) = parse_ingredient(text) {
                found.push(ingredient);
            }
        }
    }

    // Text-line strategy: every line of the identified ingredient section.
    for line in section_lines {
        if let Some(ingredient) = parse_ingredient(line) {
            found.push(ingredient);
        }
    }

    debug!("extracted {} raw ingredient entries", found.len());
    consolidate(dedupe_by_name(found))
}

/// Parses one line into an ingredient, if any cascade pattern matches.
pub(crate) fn parse_ingredient(line: &str) -> Option<Ingredient> {
    let normalized = normalize_fractions(line);
    PATTERNS.iter().find_map(|pattern| pattern(&normalized))
}

static SPACED_FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").unwrap());

/// Rewrites vulgar fractions to ASCII `n/n` form and collapses spacing
/// inside `digit / digit`.
pub(crate) fn normalize_fractions(text: &str) -> String {
    let replaced = text
        .replace('½', "1/2")
        .replace('¼', "1/4")
        .replace('¾', "3/4")
        .replace('⅓', "1/3")
        .replace('⅔', "2/3");
    SPACED_FRACTION.replace_all(&replaced, "$1/$2").into_owned()
}

static BARE_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(cups?|tbsp|tsp|teaspoons?|tablespoons?)\s*$").unwrap());

// A unit with no name is a quantity fragment the OCR engine split off its
// ingredient; the consolidator reattaches it.
fn bare_unit_fragment(line: &str) -> Option<Ingredient> {
    BARE_UNIT
        .captures(line)
        .map(|captures| Ingredient::new("", captures[1].to_string()))
}

static QUANTITY_WITH_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d[\d.,/\s-]*\s*(?:cup|tbsp|tsp|teaspoon|tablespoon)s?)\s+(.+)$").unwrap()
});

fn quantity_with_unit(line: &str) -> Option<Ingredient> {
    QUANTITY_WITH_UNIT
        .captures(line)
        .map(|captures| Ingredient::new(captures[2].trim(), captures[1].trim()))
}

static LEADING_QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d[\d.,/\s-]*\s*(?:[A-Za-z]+)?(?:\s+[A-Za-z]+)?)\s+(.+)$").unwrap()
});

fn leading_quantity(line: &str) -> Option<Ingredient> {
    LEADING_QUANTITY
        .captures(line)
        .map(|captures| Ingredient::new(captures[2].trim(), captures[1].trim()))
}

static LEADING_FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d\s*/\s*\d)\s+(.+)$").unwrap());

fn leading_fraction(line: &str) -> Option<Ingredient> {
    LEADING_FRACTION
        .captures(line)
        .map(|captures| Ingredient::new(captures[2].trim(), captures[1].trim()))
}

static UNIT_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(cup|tablespoon|tbsp|tsp|teaspoon|ounce|oz|pound|lb|gram|g|kg|ml|l)s?\s+of\s+(.+)$",
    )
    .unwrap()
});
static NUMBER_BEFORE_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d[\d.,/\s-]*?)\s*(?:cup|tablespoon|tbsp|tsp|teaspoon|ounce|oz|pound|lb|gram|g|kg|ml|l)s?\s+of\b",
    )
    .unwrap()
});

// "<unit> of <name>": the quantity is rebuilt from a number sitting before
// the unit elsewhere in the line, when there is one.
fn unit_of_name(line: &str) -> Option<Ingredient> {
    let captures = UNIT_OF.captures(line)?;
    let unit = captures[1].trim().to_string();
    let name = captures[2].trim().to_string();
    let quantity = match NUMBER_BEFORE_UNIT.captures(line) {
        Some(number) => format!("{} {}", number[1].trim(), unit),
        None => unit,
    };
    Some(Ingredient::new(name, quantity))
}

static UNIT_ANYWHERE: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    MEASUREMENT_UNITS
        .iter()
        .map(|unit| {
            let pattern = format!(r"(?i)(\d[\d.,/\s-]*)\s*{unit}\s+(.+)$");
            (Regex::new(&pattern).unwrap(), *unit)
        })
        .collect()
});

// Last structured resort: scan the whole unit vocabulary for a
// "<number> <unit> <name>" substring anywhere in the line.
fn unit_anywhere(line: &str) -> Option<Ingredient> {
    for (pattern, unit) in UNIT_ANYWHERE.iter() {
        if let Some(captures) = pattern.captures(line) {
            let quantity = format!("{} {}", captures[1].trim(), unit);
            return Some(Ingredient::new(captures[2].trim(), quantity));
        }
    }
    None
}

fn whole_line_fallback(line: &str) -> Option<Ingredient> {
    if looks_like_ingredient(line) {
        Some(Ingredient::new(line.trim(), ""))
    } else {
        None
    }
}

static INGREDIENT_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(granulated|purpose|flour|sugar|cups?)\b").unwrap());
static NUMBER_UNIT_ADJACENT: Lazy<Regex> = Lazy::new(|| {
    let units = MEASUREMENT_UNITS.join("|");
    Regex::new(&format!(r"(?i)\d\s*(?:{units})\b")).unwrap()
});
static LEADING_QUANTITY_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d½¼¾⅓⅔]").unwrap());

/// Content heuristic: does this line read like an ingredient entry?
pub(crate) fn looks_like_ingredient(line: &str) -> bool {
    if looks_like_step(line) {
        return false;
    }
    let trimmed = line.trim();
    if trimmed.len() < 3 {
        return false;
    }
    if INGREDIENT_FRAGMENT.is_match(trimmed) {
        return true;
    }
    // lone leading "q" is a common misread of a quantity digit
    if trimmed.starts_with("q ") {
        return true;
    }

    let lower = trimmed.to_lowercase();
    let has_number = lower.chars().any(|c| c.is_ascii_digit());
    let has_fraction = trimmed.contains('/')
        || ['½', '¼', '¾', '⅓', '⅔']
            .iter()
            .any(|fraction| trimmed.contains(*fraction));
    let has_unit = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| MEASUREMENT_UNITS.contains(&token))
        || NUMBER_UNIT_ADJACENT.is_match(&lower);
    let has_common_ingredient = COMMON_INGREDIENTS.iter().any(|noun| lower.contains(noun));

    has_number
        || has_fraction
        || has_unit
        || has_common_ingredient
        || LEADING_QUANTITY_CHAR.is_match(trimmed)
}

fn dedupe_by_name(ingredients: Vec<Ingredient>) -> Vec<Ingredient> {
    let mut seen = std::collections::HashSet::new();
    ingredients
        .into_iter()
        .filter(|ingredient| seen.insert(ingredient.name.trim().to_lowercase()))
        .collect()
}

/// Canonical stems for grouping fragments of the same ingredient. Checked
/// in order; anything else groups by its first three characters.
const STEM_GROUPS: &[(&str, &[&str])] = &[
    ("flour", &["flour", "purpose"]),
    ("sugar", &["sugar", "granulated"]),
    ("butter", &["butter"]),
    ("egg", &["egg"]),
    ("chocolate", &["chocolate"]),
    ("vanilla", &["vanilla"]),
    ("baking", &["baking"]),
    ("salt", &["salt"]),
    ("oil", &["oil"]),
];

fn consolidation_key(name: &str) -> String {
    let lower = name.to_lowercase();
    for (stem, markers) in STEM_GROUPS {
        if markers.iter().any(|marker| lower.contains(marker)) {
            return (*stem).to_string();
        }
    }
    lower.chars().take(3).collect::<String>().trim().to_string()
}

/// Merges fragments of the same ingredient into one entry: names joined in
/// order, first non-blank quantity kept. Repairs OCR splitting a quantity
/// from its name across adjacent lines. Groups keep first-appearance order.
fn consolidate(ingredients: Vec<Ingredient>) -> Vec<Ingredient> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Ingredient>> = HashMap::new();

    for ingredient in ingredients {
        let key = consolidation_key(&ingredient.name);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(ingredient);
    }

    let mut result = Vec::new();
    for key in order {
        let Some(group) = groups.remove(&key) else {
            continue;
        };
        if group.len() == 1 {
            result.extend(group);
        } else {
            let name = group
                .iter()
                .map(|ingredient| ingredient.name.as_str())
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();
            let quantity = group
                .iter()
                .find(|ingredient| !ingredient.quantity.trim().is_empty())
                .map(|ingredient| ingredient.quantity.clone())
                .unwrap_or_default();
            result.push(Ingredient::new(name, quantity));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_with_unit() {
        assert_eq!(
            parse_ingredient("1 cup sugar"),
            Some(Ingredient::new("sugar", "1 cup"))
        );
        assert_eq!(
            parse_ingredient("1/2 cup flour"),
            Some(Ingredient::new("flour", "1/2 cup"))
        );
        assert_eq!(
            parse_ingredient("2 tbsp lemon juice"),
            Some(Ingredient::new("lemon juice", "2 tbsp"))
        );
    }

    #[test]
    fn test_generic_leading_quantity() {
        assert_eq!(
            parse_ingredient("2 eggs"),
            Some(Ingredient::new("eggs", "2"))
        );
    }

    #[test]
    fn test_vulgar_fraction_normalizes() {
        assert_eq!(
            parse_ingredient("½ cup butter"),
            Some(Ingredient::new("butter", "1/2 cup"))
        );
        assert_eq!(
            parse_ingredient("3 / 4 cup milk"),
            Some(Ingredient::new("milk", "3/4 cup"))
        );
    }

    #[test]
    fn test_unit_of_name() {
        assert_eq!(
            parse_ingredient("cup of sugar"),
            Some(Ingredient::new("sugar", "cup"))
        );
    }

    #[test]
    fn test_unit_vocabulary_scan() {
        assert_eq!(
            parse_ingredient("about 2 cloves garlic minced"),
            Some(Ingredient::new("garlic minced", "2 cloves"))
        );
    }

    #[test]
    fn test_predicate_only_line_keeps_whole_name() {
        // "pinch" is outside the short-unit table, so the line survives
        // whole via the predicate fallback
        assert_eq!(
            parse_ingredient("a pinch of salt"),
            Some(Ingredient::new("a pinch of salt", ""))
        );
        assert_eq!(
            parse_ingredient("granulated"),
            Some(Ingredient::new("granulated", ""))
        );
    }

    #[test]
    fn test_bare_unit_becomes_quantity_fragment() {
        assert_eq!(parse_ingredient("cup"), Some(Ingredient::new("", "cup")));
    }

    #[test]
    fn test_non_ingredient_yields_nothing() {
        assert_eq!(parse_ingredient("Let the dough rest"), None);
        assert_eq!(parse_ingredient("ok"), None);
    }

    #[test]
    fn test_predicate() {
        assert!(looks_like_ingredient("1 cup sugar"));
        assert!(looks_like_ingredient("½ cup butter"));
        assert!(looks_like_ingredient("a pinch of salt"));
        assert!(looks_like_ingredient("all purpose"));
        assert!(!looks_like_ingredient("1. Mix the batter"));
        assert!(!looks_like_ingredient("Chill the dough overnight"));
    }

    #[test]
    fn test_consolidation_reattaches_fragments() {
        let merged = consolidate(vec![
            Ingredient::new("granulated", ""),
            Ingredient::new("sugar", "1/2 cup"),
            Ingredient::new("flour", "1 cup"),
        ]);
        assert_eq!(
            merged,
            vec![
                Ingredient::new("granulated sugar", "1/2 cup"),
                Ingredient::new("flour", "1 cup"),
            ]
        );
    }

    #[test]
    fn test_consolidation_preserves_first_appearance_order() {
        let merged = consolidate(vec![
            Ingredient::new("vanilla", "1 tsp"),
            Ingredient::new("salt", ""),
            Ingredient::new("vanilla extract", ""),
        ]);
        assert_eq!(merged[0], Ingredient::new("vanilla vanilla extract", "1 tsp"));
        assert_eq!(merged[1], Ingredient::new("salt", ""));
    }

    #[test]
    fn test_extraction_unions_spatial_and_text_lines() {
        let spatial = vec![(
            "2 cups flour".to_string(),
            BoundingBox {
                left: 0,
                top: 0,
                right: 100,
                bottom: 20,
            },
        )];
        let section = vec!["2 cups flour".to_string(), "1 tsp vanilla".to_string()];
        let extracted = extract_ingredients(&section, &spatial);
        assert_eq!(
            extracted,
            vec![
                Ingredient::new("flour", "2 cups"),
                Ingredient::new("vanilla", "1 tsp"),
            ]
        );
    }
}
