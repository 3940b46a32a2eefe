//! The text-to-structure pipeline: correct, segment, identify sections,
//! extract, consolidate.

pub(crate) mod ingredients;
pub(crate) mod sections;
pub(crate) mod steps;
pub(crate) mod title;

use std::collections::HashSet;

use log::debug;

use crate::config::FormatterConfig;
use crate::corrections::correct_ocr_errors;
use crate::model::{BoundingBox, FormattedRecipe, Ingredient, RawRecognitionResult};

/// Formats recognized text into a structured recipe.
///
/// Holds only read-only configuration, so a single formatter can be shared
/// freely across threads.
#[derive(Debug, Default)]
pub struct RecipeFormatter {
    config: FormatterConfig,
}

impl RecipeFormatter {
    /// Creates a formatter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with custom tuning.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// Formats a recognition result into a structured recipe.
    ///
    /// This never fails: fields that cannot be recovered from the input are
    /// left empty, and an input with no usable lines yields the zero-value
    /// recipe.
    pub fn format(&self, recognition: &RawRecognitionResult) -> FormattedRecipe {
        let full_text = correct_ocr_errors(&recognition.full_text);
        let lines = segment_lines(&full_text);
        if lines.is_empty() {
            return FormattedRecipe::default();
        }
        debug!("formatting recipe from {} lines", lines.len());

        let observations = spatial_view(recognition);
        let spatial_lines: &[(String, BoundingBox)] = if self.config.spatial_layout {
            &observations
        } else {
            &[]
        };

        let title = title::extract_title(&lines);
        let section_map = sections::identify_sections(&lines, &self.config);
        debug!(
            "sections: {} ingredient lines, {} step lines, {} other lines",
            section_map.ingredient_lines.len(),
            section_map.step_lines.len(),
            section_map.other_lines.len()
        );

        let ingredients =
            ingredients::extract_ingredients(&section_map.ingredient_lines, spatial_lines);
        let steps = steps::extract_steps(
            &section_map.step_lines,
            &lines,
            self.config.short_step_threshold,
        );
        let description = title::extract_description(&section_map.other_lines, &title, &steps);

        debug!(
            "extracted title {:?}, {} ingredients, {} steps",
            title,
            ingredients.len(),
            steps.len()
        );

        FormattedRecipe {
            title,
            description,
            ingredients: dedupe_ingredients(ingredients),
            steps: dedupe_steps(steps),
        }
    }

    /// Formats plain recognized text that has no line geometry.
    pub fn format_text(&self, text: &str) -> FormattedRecipe {
        self.format(&RawRecognitionResult::from_text(text))
    }
}

/// Splits corrected text into trimmed, non-blank lines in original order.
fn segment_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds the spatial view: corrected text of every observation that
/// carries a bounding box. Empty when the OCR engine reported no geometry.
fn spatial_view(recognition: &RawRecognitionResult) -> Vec<(String, BoundingBox)> {
    recognition
        .lines
        .iter()
        .filter_map(|observation| {
            observation
                .bounding_box
                .map(|bounding_box| (correct_ocr_errors(&observation.text), bounding_box))
        })
        .collect()
}

/// Drops ingredients whose normalized name was already seen, keeping the
/// first occurrence.
fn dedupe_ingredients(ingredients: Vec<Ingredient>) -> Vec<Ingredient> {
    let mut seen = HashSet::new();
    ingredients
        .into_iter()
        .filter(|ingredient| seen.insert(ingredient.name.trim().to_lowercase()))
        .collect()
}

/// Drops steps whose normalized text was already seen, keeping the first
/// occurrence.
fn dedupe_steps(steps: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    steps
        .into_iter()
        .filter(|step| seen.insert(step.trim().to_lowercase()))
        .collect()
}
