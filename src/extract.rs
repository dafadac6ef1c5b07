//! Turns an OCR token stream into dimension records.

use crate::config::ExtractionConfig;
use crate::ir::{BoundingBox, LineSegment, Token};
use crate::standard::DrawingStandard;
use serde::Serialize;
use tracing::debug;

/// A measurement annotation recognized on a drawing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub text: String,
    pub value: String,
    pub tolerance: Option<String>,
    pub bbox: BoundingBox,
    pub associated_lines: Vec<LineSegment>,
    pub page_index: usize,
}

#[derive(Debug, Clone)]
pub struct DimensionExtractor {
    standard: DrawingStandard,
    min_confidence: i32,
    line_distance: f64,
}

impl DimensionExtractor {
    pub fn new(standard: DrawingStandard, config: &ExtractionConfig) -> Self {
        Self {
            standard,
            min_confidence: config.min_confidence,
            line_distance: config.line_association_distance,
        }
    }

    pub fn standard(&self) -> DrawingStandard {
        self.standard
    }

    /// Parse every qualifying token, keeping stream order.
    pub fn extract(
        &self,
        tokens: &[Token],
        lines: Option<&[LineSegment]>,
        page_index: usize,
    ) -> Vec<Dimension> {
        let lines = lines.unwrap_or(&[]);
        let grammar = self.standard.grammar();
        let mut dimensions = Vec::new();

        for token in tokens {
            let text = token.text.trim();
            if token.confidence < self.min_confidence || text.is_empty() {
                continue;
            }
            let Some(caps) = grammar.captures(text) else {
                debug!(text, "token does not match {} grammar", self.standard);
                continue;
            };

            dimensions.push(Dimension {
                text: text.to_string(),
                value: caps[1].to_string(),
                tolerance: caps.get(2).map(|m| m.as_str().to_string()),
                bbox: token.bbox,
                associated_lines: self.associated_lines(&token.bbox, lines),
                page_index,
            });
        }

        dimensions
    }

    fn associated_lines(&self, bbox: &BoundingBox, lines: &[LineSegment]) -> Vec<LineSegment> {
        let (cx, cy) = bbox.center();
        lines
            .iter()
            .filter(|seg| {
                let (mx, my) = seg.midpoint();
                (mx - cx).hypot(my - cy) < self.line_distance
            })
            .copied()
            .collect()
    }
}
