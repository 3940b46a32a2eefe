pub mod config;
pub mod corrections;
pub mod error;
pub mod formatter;
pub mod model;

mod lexicon;

pub use config::FormatterConfig;
pub use error::FormatError;
pub use formatter::RecipeFormatter;
pub use model::{BoundingBox, FormattedRecipe, Ingredient, LineObservation, RawRecognitionResult};

use log::debug;

/// Formats the output of an OCR pass into a structured recipe using the
/// default configuration.
///
/// This never fails: whatever structure can be recovered is returned, and
/// fields without support in the input stay empty.
pub fn format_recipe(recognition: &RawRecognitionResult) -> FormattedRecipe {
    let recipe = RecipeFormatter::new().format(recognition);
    debug!(
        "formatted recipe {:?}: {} ingredients, {} steps",
        recipe.title,
        recipe.ingredients.len(),
        recipe.steps.len()
    );
    recipe
}

/// Formats plain recognized text that carries no line geometry.
pub fn format_text(text: &str) -> FormattedRecipe {
    format_recipe(&RawRecognitionResult::from_text(text))
}
