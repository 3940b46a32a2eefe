use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Known OCR misreadings and their corrections, applied in table order.
///
/// Matching is whole-word and case-insensitive. No entry may match another
/// entry's replacement: corrected text must pass through the table
/// untouched (covered by `test_table_is_self_stable`).
const WORD_CORRECTIONS: &[(&str, &str)] = &[
    ("bronies", "brownies"),
    ("brosnies", "brownies"),
    ("udy", "fudgy"),
    ("ated", "granulated"),
    ("3ranuated", "granulated"),
    ("upanulated", "granulated"),
    ("ranulated", "granulated"),
    ("posuder", "powdered"),
    ("posder", "powdered"),
    ("cuo", "cup"),
    ("eb", "of"),
    ("cocoa pouler", "cocoa powder"),
    ("dlive", "olive"),
    ("perpos", "purpose"),
    ("porpae", "purpose"),
    ("prehet", "preheat"),
    ("peaheat", "preheat"),
    ("ven", "oven"),
    ("flow", "flour"),
    ("flo", "flour"),
    ("floar", "flour"),
    ("flor", "flour"),
    ("flourur", "flour"),
    ("instrvctions", "instructions"),
    ("v2", "1/2"),
];

static CORRECTION_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    WORD_CORRECTIONS
        .iter()
        .map(|(misreading, correction)| {
            let pattern = format!(r"\b{}\b", regex::escape(misreading));
            let rule = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .expect("correction table patterns are valid");
            (rule, *correction)
        })
        .collect()
});

/// Replaces every known OCR misreading in `text` with its correction.
///
/// Returns the input unchanged when no rule matches.
pub fn correct_ocr_errors(text: &str) -> String {
    let mut corrected = text.to_string();
    for (rule, correction) in CORRECTION_RULES.iter() {
        if rule.is_match(&corrected) {
            corrected = rule.replace_all(&corrected, *correction).into_owned();
        }
    }
    corrected
}
