use serde::{Deserialize, Serialize};

/// Axis-aligned pixel box as reported by the OCR engine: `(x, y, w, h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exact geometric center.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from([x, y, width, height]: [i32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.x, bbox.y, bbox.width, bbox.height]
    }
}

/// A piece of recognized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// 0..=100; OCR engines report -1 for blocks without text.
    pub confidence: i32,
    pub bbox: BoundingBox,
}

impl Token {
    pub fn new(text: impl Into<String>, confidence: i32, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn midpoint(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

impl From<[f64; 4]> for LineSegment {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<LineSegment> for [f64; 4] {
    fn from(seg: LineSegment) -> Self {
        [seg.x1, seg.y1, seg.x2, seg.y2]
    }
}

/// Everything the collaborators hand over for one rasterised page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub lines: Option<Vec<LineSegment>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Drawing standard identifier; the configured default applies when absent.
    #[serde(default)]
    pub standard: Option<String>,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        Ok(json5::from_str(input)?)
    }
}
