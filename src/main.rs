use std::env;
use std::fs;
use std::io::Read;

use cookbook_formatter::{FormatterConfig, RawRecognitionResult, RecipeFormatter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the input path from command-line arguments
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .ok_or("Please provide a recognition JSON file, a text file, or - for stdin")?;

    let payload = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };

    // JSON payloads carry the full recognition structure; anything else is
    // treated as the flat recognized text
    let recognition = if path.ends_with(".json") {
        RawRecognitionResult::from_json(&payload)?
    } else {
        RawRecognitionResult::from_text(payload)
    };

    let config = FormatterConfig::load()?;
    let recipe = RecipeFormatter::with_config(config).format(&recognition);
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}
