//! Fixed vocabularies shared by the formatting stages.

/// Keywords that mark the start of an ingredient section.
pub(crate) const INGREDIENT_SECTION_KEYWORDS: &[&str] = &[
    "ingredients",
    "you'll need",
    "you need",
    "what you need",
    "shopping list",
    "grocery list",
    "items needed",
    "items required",
];

/// Keywords that mark the start of a step section.
pub(crate) const STEP_SECTION_KEYWORDS: &[&str] = &[
    "directions",
    "instructions",
    "steps",
    "method",
    "preparation",
    "procedure",
    "how to prepare",
    "how to make",
    "how to cook",
];

/// Measurement units used to recognize ingredient lines.
pub(crate) const MEASUREMENT_UNITS: &[&str] = &[
    "cup",
    "cups",
    "tablespoon",
    "tablespoons",
    "tbsp",
    "tsp",
    "teaspoon",
    "teaspoons",
    "ounce",
    "ounces",
    "oz",
    "pound",
    "pounds",
    "lb",
    "lbs",
    "gram",
    "grams",
    "g",
    "kilogram",
    "kilograms",
    "kg",
    "ml",
    "milliliter",
    "milliliters",
    "liter",
    "liters",
    "l",
    "pinch",
    "dash",
    "handful",
    "slice",
    "slices",
    "piece",
    "pieces",
    "clove",
    "cloves",
];

/// Ingredient nouns common enough to classify a line on their own.
pub(crate) const COMMON_INGREDIENTS: &[&str] = &[
    "salt",
    "pepper",
    "oil",
    "water",
    "sugar",
    "flour",
    "granulated",
    "purpose",
    "butter",
    "egg",
    "eggs",
    "garlic",
    "onion",
    "vanilla",
    "chocolate",
    "milk",
    "cream",
    "baking",
    "powder",
    "soda",
    "cinnamon",
];

/// Imperative cooking verbs that open an instruction line.
pub(crate) const STEP_VERBS: &[&str] = &[
    "preheat", "mix", "stir", "add", "combine", "beat", "fold", "bake", "cook",
];

/// True when the line contains any section-header keyword.
pub(crate) fn is_section_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    INGREDIENT_SECTION_KEYWORDS
        .iter()
        .chain(STEP_SECTION_KEYWORDS)
        .any(|keyword| lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_detection_is_case_insensitive() {
        assert!(is_section_header("INGREDIENTS:"));
        assert!(is_section_header("How To Make It"));
        assert!(!is_section_header("Brownies"));
    }

    #[test]
    fn test_header_detection_matches_inside_a_line() {
        assert!(is_section_header("For the filling you'll need"));
    }
}
