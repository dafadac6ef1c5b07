use dimballoon::dump::ReportDump;
use dimballoon::{Config, Document, process_document};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementOptions {
    standard: Option<String>,
    strict_standard: Option<bool>,
    min_confidence: Option<i32>,
    balloon_radius: Option<i32>,
    balloon_padding: Option<i32>,
}

fn build_config(options: PlacementOptions) -> Config {
    let mut config = Config::default();
    if let Some(standard) = options.standard {
        config.extraction.standard = standard;
    }
    if let Some(strict) = options.strict_standard {
        config.extraction.strict_standard = strict;
    }
    if let Some(min) = options.min_confidence {
        config.extraction.min_confidence = min;
    }
    if let Some(radius) = options.balloon_radius {
        config.balloon.radius = radius;
    }
    if let Some(padding) = options.balloon_padding {
        config.balloon.padding = padding;
    }
    config
}

fn place(document_json: &str, options: PlacementOptions) -> Result<String, String> {
    let mut doc = Document::from_json(document_json).map_err(|error| error.to_string())?;
    // An explicit standard option wins over the one named in the document.
    if options.standard.is_some() {
        doc.standard = options.standard.clone();
    }
    let result =
        process_document(&doc, &build_config(options)).map_err(|error| error.to_string())?;
    ReportDump::from_result(&result)
        .to_json()
        .map_err(|error| error.to_string())
}

/// Run extraction and placement over a JSON document and return the JSON
/// balloon report.
#[wasm_bindgen]
pub fn place_balloons_json(
    document_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<PlacementOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        PlacementOptions::default()
    };

    place(document_json, options).map_err(|error| JsValue::from_str(&error))
}
