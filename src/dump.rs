use crate::pipeline::{DocumentResult, PageResult};
use crate::placement::Placement;
use crate::standard::DrawingStandard;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// One row of the inspection table.
#[derive(Debug, Serialize)]
pub struct BalloonRow {
    pub balloon_id: u32,
    pub dimension: String,
    pub value: String,
    pub tolerance: Option<String>,
    pub formatted: String,
    /// 1-based, as printed on the drawing.
    pub page: usize,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub placement: Placement,
}

#[derive(Debug, Serialize)]
pub struct DimensionDump {
    pub text: String,
    pub bbox: [i32; 4],
    pub lines: Vec<[f64; 4]>,
}

#[derive(Debug, Serialize)]
pub struct PageDump {
    pub page: usize,
    pub width: i32,
    pub height: i32,
    pub dimensions: Vec<DimensionDump>,
    pub fallbacks: usize,
}

#[derive(Debug, Serialize)]
pub struct ReportDump {
    pub standard: String,
    pub tolerance_format: String,
    pub dimension_count: usize,
    pub balloons: Vec<BalloonRow>,
    pub pages: Vec<PageDump>,
}

impl ReportDump {
    pub fn from_result(result: &DocumentResult) -> Self {
        let standard = result.standard;
        let balloons = result
            .pages
            .iter()
            .flat_map(|page| rows(page, standard))
            .collect();
        let pages = result.pages.iter().map(page_dump).collect();

        Self {
            standard: standard.id().to_string(),
            tolerance_format: standard.tolerance_template().to_string(),
            dimension_count: result.dimension_count(),
            balloons,
            pages,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn rows(page: &PageResult, standard: DrawingStandard) -> Vec<BalloonRow> {
    page.balloons
        .iter()
        .map(|balloon| {
            let dim = &balloon.dimension;
            BalloonRow {
                balloon_id: balloon.id,
                dimension: dim.text.clone(),
                value: dim.value.clone(),
                tolerance: dim.tolerance.clone(),
                formatted: standard.format_tolerance(&dim.value, dim.tolerance.as_deref()),
                page: dim.page_index + 1,
                x: balloon.position.0,
                y: balloon.position.1,
                radius: balloon.radius,
                placement: balloon.placement,
            }
        })
        .collect()
}

fn page_dump(page: &PageResult) -> PageDump {
    PageDump {
        page: page.page_index + 1,
        width: page.width,
        height: page.height,
        dimensions: page
            .dimensions
            .iter()
            .map(|dim| DimensionDump {
                text: dim.text.clone(),
                bbox: dim.bbox.into(),
                lines: dim
                    .associated_lines
                    .iter()
                    .copied()
                    .map(<[f64; 4]>::from)
                    .collect(),
            })
            .collect(),
        fallbacks: page.fallback_count(),
    }
}

pub fn write_report(result: &DocumentResult, output: Option<&Path>) -> anyhow::Result<()> {
    let dump = ReportDump::from_result(result);
    match output {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            println!("{}", dump.to_json()?);
        }
    }
    Ok(())
}
