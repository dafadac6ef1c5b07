use crate::config::Config;
use crate::extract::{Dimension, DimensionExtractor};
use crate::ir::{Document, Page};
use crate::placement::{Balloon, BalloonPlacer, OccupancyGrid, Placement};
use crate::standard::DrawingStandard;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PageResult {
    pub page_index: usize,
    pub width: i32,
    pub height: i32,
    pub dimensions: Vec<Arc<Dimension>>,
    pub balloons: Vec<Balloon>,
}

impl PageResult {
    pub fn fallback_count(&self) -> usize {
        self.balloons
            .iter()
            .filter(|b| b.placement == Placement::Fallback)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct DocumentResult {
    pub standard: DrawingStandard,
    pub pages: Vec<PageResult>,
}

impl DocumentResult {
    pub fn dimension_count(&self) -> usize {
        self.pages.iter().map(|p| p.dimensions.len()).sum()
    }

    pub fn balloons(&self) -> impl Iterator<Item = &Balloon> + '_ {
        self.pages.iter().flat_map(|p| p.balloons.iter())
    }
}

/// Resolve the standard for a run: the document's own identifier wins over
/// the configured one.
pub fn resolve_standard(requested: Option<&str>, config: &Config) -> Result<DrawingStandard> {
    let id = requested.unwrap_or(config.extraction.standard.as_str());
    if config.extraction.strict_standard {
        Ok(DrawingStandard::parse_strict(id)?)
    } else {
        Ok(DrawingStandard::parse(id))
    }
}

/// Extract dimensions from one page and balloon them on a fresh grid.
pub fn process_page(
    page: &Page,
    page_index: usize,
    standard: DrawingStandard,
    config: &Config,
) -> Result<PageResult> {
    let mut grid = OccupancyGrid::new(page.width, page.height)?;
    let mut placer = BalloonPlacer::new(config.balloon)?;

    let extractor = DimensionExtractor::new(standard, &config.extraction);
    let dimensions: Vec<Arc<Dimension>> = extractor
        .extract(&page.tokens, page.lines.as_deref(), page_index)
        .into_iter()
        .map(Arc::new)
        .collect();

    for dimension in &dimensions {
        placer.place(&mut grid, Arc::clone(dimension));
    }

    let result = PageResult {
        page_index,
        width: page.width,
        height: page.height,
        dimensions,
        balloons: placer.into_balloons(),
    };
    info!(
        page = page_index + 1,
        tokens = page.tokens.len(),
        dimensions = result.dimensions.len(),
        fallbacks = result.fallback_count(),
        "page processed"
    );
    Ok(result)
}

pub fn process_document(doc: &Document, config: &Config) -> Result<DocumentResult> {
    let standard = resolve_standard(doc.standard.as_deref(), config)?;
    let pages = doc
        .pages
        .iter()
        .enumerate()
        .map(|(idx, page)| process_page(page, idx, standard, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(DocumentResult { standard, pages })
}
