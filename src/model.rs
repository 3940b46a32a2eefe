use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Axis-aligned rectangle giving the on-image position of a recognized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// A single recognized text line, with its position when the OCR engine
/// reported one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineObservation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// Raw output of the external OCR engine: the flat recognized text plus,
/// optionally, the per-line observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecognitionResult {
    pub full_text: String,
    #[serde(default)]
    pub lines: Vec<LineObservation>,
}

impl RawRecognitionResult {
    /// Wraps plain recognized text with no line geometry.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            full_text: text.into(),
            lines: Vec::new(),
        }
    }

    /// Deserializes a recognition payload produced by an OCR front-end.
    pub fn from_json(payload: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// An ingredient entry. The quantity stays a free-form string ("1/2 cup",
/// "3", ""): OCR output of fractions and units is too irregular to parse
/// into numbers safely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// A structured recipe recovered from recognized text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattedRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}
