use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub balloon_stroke: String,
    pub balloon_fill: String,
    pub balloon_stroke_width: f32,
    pub label_color: String,
    pub connector_color: String,
    pub connector_width: f32,
    pub background: String,
}

impl Theme {
    /// Red balloons with green leader lines, as inspection sheets are
    /// usually marked up.
    pub fn inspection() -> Self {
        Self {
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            font_size: 16.0,
            balloon_stroke: "#FF0000".to_string(),
            balloon_fill: "none".to_string(),
            balloon_stroke_width: 2.0,
            label_color: "#FF0000".to_string(),
            connector_color: "#00FF00".to_string(),
            connector_width: 1.0,
            background: "none".to_string(),
        }
    }

    pub fn monochrome() -> Self {
        Self {
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            font_size: 14.0,
            balloon_stroke: "#1C2430".to_string(),
            balloon_fill: "#FFFFFF".to_string(),
            balloon_stroke_width: 1.5,
            label_color: "#1C2430".to_string(),
            connector_color: "#7A8AA6".to_string(),
            connector_width: 1.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::inspection()
    }
}
