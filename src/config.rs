use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Tokens below this OCR confidence are dropped.
    pub min_confidence: i32,
    /// Segments whose midpoint is closer than this to the token center are
    /// attached to the dimension.
    pub line_association_distance: f64,
    pub standard: String,
    /// Reject unknown standard identifiers instead of using the default grammar.
    pub strict_standard: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_confidence: 80,
            line_association_distance: 200.0,
            standard: "ASME_Y14.5".to_string(),
            strict_standard: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalloonConfig {
    pub radius: i32,
    /// Extra clearance claimed around each balloon on the occupancy grid.
    pub padding: i32,
    /// Horizontal gap between the dimension text and the balloon edge.
    pub gap: i32,
    pub max_steps: u32,
}

impl BalloonConfig {
    pub fn effective_radius(&self) -> i32 {
        self.radius.saturating_add(self.padding)
    }

    pub fn step(&self) -> i32 {
        self.radius.saturating_mul(2)
    }
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            radius: 20,
            padding: 40,
            gap: 10,
            max_steps: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            scale: 1.0,
            background: "none".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub extraction: ExtractionConfig,
    pub balloon: BalloonConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    balloon_stroke: Option<String>,
    balloon_fill: Option<String>,
    balloon_stroke_width: Option<f32>,
    label_color: Option<String>,
    connector_color: Option<String>,
    connector_width: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionConfigFile {
    min_confidence: Option<i32>,
    line_association_distance: Option<f64>,
    standard: Option<String>,
    strict_standard: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalloonConfigFile {
    radius: Option<i32>,
    padding: Option<i32>,
    gap: Option<i32>,
    max_steps: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    scale: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    extraction: Option<ExtractionConfigFile>,
    balloon: Option<BalloonConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "monochrome" {
            config.theme = Theme::monochrome();
        } else if theme_name == "inspection" || theme_name == "default" {
            config.theme = Theme::inspection();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.balloon_stroke {
            config.theme.balloon_stroke = v;
        }
        if let Some(v) = vars.balloon_fill {
            config.theme.balloon_fill = v;
        }
        if let Some(v) = vars.balloon_stroke_width {
            config.theme.balloon_stroke_width = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.connector_color {
            config.theme.connector_color = v;
        }
        if let Some(v) = vars.connector_width {
            config.theme.connector_width = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(extraction) = parsed.extraction {
        if let Some(v) = extraction.min_confidence {
            config.extraction.min_confidence = v;
        }
        if let Some(v) = extraction.line_association_distance {
            config.extraction.line_association_distance = v;
        }
        if let Some(v) = extraction.standard {
            config.extraction.standard = v;
        }
        if let Some(v) = extraction.strict_standard {
            config.extraction.strict_standard = v;
        }
    }

    if let Some(balloon) = parsed.balloon {
        if let Some(v) = balloon.radius {
            config.balloon.radius = v;
        }
        if let Some(v) = balloon.padding {
            config.balloon.padding = v;
        }
        if let Some(v) = balloon.gap {
            config.balloon.gap = v;
        }
        if let Some(v) = balloon.max_steps {
            config.balloon.max_steps = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.scale {
            config.render.scale = v;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}
