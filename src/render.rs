use crate::config::RenderConfig;
use crate::pipeline::PageResult;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// SVG overlay for one page: a circle per balloon with its id, and a leader
/// line back to the dimension text it marks.
pub fn render_svg(page: &PageResult, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = page.width;
    let height = page.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    if theme.background != "none" {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            theme.background
        ));
    }

    // Leaders first so circles sit on top of them.
    for balloon in &page.balloons {
        let (tx, ty) = balloon.dimension.bbox.center();
        let (bx, by) = balloon.position;
        svg.push_str(&format!(
            "<line x1=\"{bx}\" y1=\"{by}\" x2=\"{tx:.1}\" y2=\"{ty:.1}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            theme.connector_color, theme.connector_width
        ));
    }

    for balloon in &page.balloons {
        let (x, y) = balloon.position;
        svg.push_str(&format!(
            "<g class=\"balloon\" data-id=\"{}\" data-value=\"{}\">",
            balloon.id,
            escape_xml(&balloon.dimension.text)
        ));
        svg.push_str(&format!(
            "<circle cx=\"{x}\" cy=\"{y}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            balloon.radius, theme.balloon_fill, theme.balloon_stroke, theme.balloon_stroke_width
        ));
        svg.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.label_color,
            balloon.id
        ));
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = render_cfg.scale.max(0.01);
    let size = tree.size().to_int_size().scale_by(scale).ok_or_else(|| {
        anyhow::anyhow!("Invalid output size at scale {scale}")
    })?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
