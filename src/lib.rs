#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod extract;
pub mod ir;
pub mod pipeline;
pub mod placement;
pub mod render;
pub mod standard;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{BalloonConfig, Config, ExtractionConfig, load_config};
pub use extract::{Dimension, DimensionExtractor};
pub use ir::{BoundingBox, Document, LineSegment, Page, Token};
pub use pipeline::{DocumentResult, PageResult, process_document, process_page};
pub use placement::{Balloon, BalloonPlacer, OccupancyGrid, Placement, PlacementError};
pub use standard::DrawingStandard;
