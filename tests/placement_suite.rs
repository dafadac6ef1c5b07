use std::path::Path;
use std::sync::Arc;

use dimballoon::{
    BalloonConfig, BalloonPlacer, BoundingBox, Config, Dimension, DimensionExtractor, Document,
    DrawingStandard, OccupancyGrid, Placement, process_document,
};
use dimballoon::dump::ReportDump;
use dimballoon::placement::Direction;

fn load_fixture(name: &str) -> Document {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    Document::from_json(&input).expect("fixture parse failed")
}

fn dimension(x: i32, y: i32, w: i32, h: i32) -> Arc<Dimension> {
    Arc::new(Dimension {
        text: "10".to_string(),
        value: "10".to_string(),
        tolerance: None,
        bbox: BoundingBox::new(x, y, w, h),
        associated_lines: Vec::new(),
        page_index: 0,
    })
}

fn padded_boxes_disjoint(a: (i32, i32), b: (i32, i32), r: i32) -> bool {
    (a.0 - b.0).abs() >= 2 * r || (a.1 - b.1).abs() >= 2 * r
}

#[test]
fn bracket_drawing_end_to_end() {
    let doc = load_fixture("bracket.json5");
    let result = process_document(&doc, &Config::default()).unwrap();
    assert_eq!(result.standard, DrawingStandard::AsmeY14_5);
    assert_eq!(result.pages.len(), 2);

    let page = &result.pages[0];
    let texts: Vec<&str> = page.dimensions.iter().map(|d| d.text.as_str()).collect();
    assert_eq!(texts, ["120", "45.5 ±0.1", "30 +0.05", "8"]);
    assert!(page.dimensions.iter().all(|d| d.associated_lines.len() == 1));

    let positions: Vec<_> = page.balloons.iter().map(|b| b.position).collect();
    assert_eq!(positions, [(270, 89), (710, 89), (300, 409), (270, 549)]);
    assert_eq!(
        page.balloons[3].placement,
        Placement::Spiral {
            distance: 3,
            direction: Direction::South
        }
    );

    let second = &result.pages[1];
    assert_eq!(second.dimensions.len(), 1);
    assert_eq!(second.balloons[0].id, 1);
    assert_eq!(second.balloons[0].position, (350, 309));
    assert!(second.dimensions[0].associated_lines.is_empty());
}

#[test]
fn crowded_cluster_spirals_outwards() {
    let doc = load_fixture("crowded.json5");
    let result = process_document(&doc, &Config::default()).unwrap();
    let page = &result.pages[0];

    let positions: Vec<_> = page.balloons.iter().map(|b| b.position).collect();
    assert_eq!(
        positions,
        [(150, 110), (270, 110), (150, 230), (270, 230), (390, 110), (510, 110)]
    );
    let ids: Vec<_> = page.balloons.iter().map(|b| b.id).collect();
    assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
    assert_eq!(page.fallback_count(), 0);

    let r = Config::default().balloon.effective_radius();
    for (i, a) in page.balloons.iter().enumerate() {
        for b in &page.balloons[i + 1..] {
            assert!(
                padded_boxes_disjoint(a.position, b.position, r),
                "balloons {} and {} overlap",
                a.id,
                b.id
            );
        }
    }
}

#[test]
fn crowded_cluster_falls_back_when_page_is_full() {
    let mut doc = load_fixture("crowded.json5");
    // Room for the first balloon only.
    doc.pages[0].width = 220;
    doc.pages[0].height = 180;
    let result = process_document(&doc, &Config::default()).unwrap();
    let page = &result.pages[0];
    assert_eq!(page.balloons[0].placement, Placement::Initial);
    for balloon in &page.balloons[1..] {
        assert_eq!(balloon.placement, Placement::Fallback);
        assert_eq!(balloon.position, (150, 110));
    }
    assert_eq!(page.fallback_count(), 5);
}

#[test]
fn well_separated_dimensions_skip_the_search() {
    let mut grid = OccupancyGrid::new(800, 600).unwrap();
    let mut placer = BalloonPlacer::new(BalloonConfig::default()).unwrap();
    let a = placer.place(&mut grid, dimension(50, 100, 40, 20)).clone();
    let b = placer.place(&mut grid, dimension(400, 400, 40, 20)).clone();
    assert_eq!(a.placement, Placement::Initial);
    assert_eq!(b.placement, Placement::Initial);
    assert!(padded_boxes_disjoint(a.position, b.position, 60));
}

#[test]
fn low_confidence_duplicate_is_dropped() {
    let doc = load_fixture("bracket.json5");
    let mut config = Config::default();
    let tokens = &doc.pages[0].tokens;
    let extractor = DimensionExtractor::new(DrawingStandard::AsmeY14_5, &config.extraction);
    assert!(!extractor.extract(tokens, None, 0).iter().any(|d| d.text == "12"));

    config.extraction.min_confidence = 50;
    let extractor = DimensionExtractor::new(DrawingStandard::AsmeY14_5, &config.extraction);
    assert!(extractor.extract(tokens, None, 0).iter().any(|d| d.text == "12"));
}

#[test]
fn repeated_runs_produce_identical_reports() {
    let doc = load_fixture("bracket.json5");
    let config = Config::default();
    let first = ReportDump::from_result(&process_document(&doc, &config).unwrap())
        .to_json()
        .unwrap();
    let second = ReportDump::from_result(&process_document(&doc, &config).unwrap())
        .to_json()
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_standard_is_lenient_unless_strict() {
    let mut doc = load_fixture("bracket.json5");
    doc.standard = Some("ANSI_Y14.5M".to_string());
    let lenient = process_document(&doc, &Config::default()).unwrap();
    assert_eq!(lenient.standard, DrawingStandard::AsmeY14_5);

    let mut strict = Config::default();
    strict.extraction.strict_standard = true;
    let err = process_document(&doc, &strict).unwrap_err();
    assert!(err.to_string().contains("ANSI_Y14.5M"));
}
