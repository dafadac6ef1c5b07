// Balloon placement with collision avoidance.
// Positions are greedy and local: each balloon is placed once, in order, and
// never revisited.

mod error;
mod grid;

pub use error::PlacementError;
pub use grid::OccupancyGrid;

use crate::config::BalloonConfig;
use crate::extract::Dimension;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Compass offsets tried at each spiral distance, in this exact order.
pub const SPIRAL_DIRECTIONS: [Direction; 8] = [
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::North,
    Direction::SouthEast,
    Direction::NorthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    East,
    South,
    West,
    North,
    SouthEast,
    NorthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// Unit offset in image coordinates (y grows downwards).
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::North => (0, -1),
            Self::SouthEast => (1, 1),
            Self::NorthEast => (1, -1),
            Self::SouthWest => (-1, 1),
            Self::NorthWest => (-1, -1),
        }
    }
}

/// How a balloon's position was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    Initial,
    Spiral { distance: u32, direction: Direction },
    /// Search space exhausted; the balloon may overlap an earlier one.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Balloon {
    pub id: u32,
    pub position: (i32, i32),
    pub dimension: Arc<Dimension>,
    pub radius: i32,
    pub placement: Placement,
}

/// Places balloons for one page, handing out ids from 1.
#[derive(Debug)]
pub struct BalloonPlacer {
    config: BalloonConfig,
    next_id: u32,
    balloons: Vec<Balloon>,
}

impl BalloonPlacer {
    pub fn new(config: BalloonConfig) -> Result<Self, PlacementError> {
        if config.radius <= 0 {
            return Err(PlacementError::InvalidRadius(config.radius));
        }
        if config.padding < 0 {
            return Err(PlacementError::InvalidPadding(config.padding));
        }
        let reach = i32::try_from(config.max_steps)
            .ok()
            .and_then(|steps| config.radius.checked_mul(2)?.checked_mul(steps));
        if reach.is_none() || config.radius.checked_add(config.padding).is_none() {
            return Err(PlacementError::SearchOutOfRange {
                radius: config.radius,
                padding: config.padding,
                max_steps: config.max_steps,
            });
        }
        Ok(Self {
            config,
            next_id: 1,
            balloons: Vec::new(),
        })
    }

    pub fn config(&self) -> &BalloonConfig {
        &self.config
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn into_balloons(self) -> Vec<Balloon> {
        self.balloons
    }

    /// Candidate just right of the dimension text, vertically centered.
    pub fn initial_position(&self, dimension: &Dimension) -> (i32, i32) {
        let bbox = &dimension.bbox;
        (
            bbox.right()
                .saturating_add(self.config.radius)
                .saturating_add(self.config.gap),
            bbox.y.saturating_add(bbox.height / 2),
        )
    }

    /// Place a balloon for `dimension` and claim its area on `grid`.
    ///
    /// Always succeeds; when no free spot is found the balloon goes to the
    /// initial candidate even if that overlaps.
    pub fn place(&mut self, grid: &mut OccupancyGrid, dimension: Arc<Dimension>) -> &Balloon {
        let r = self.config.effective_radius();
        let start = self.initial_position(&dimension);
        let (position, placement) = self.find_position(grid, start);

        match placement {
            Placement::Initial => {}
            Placement::Spiral {
                distance,
                direction,
            } => debug!(
                text = %dimension.text,
                ?direction,
                distance,
                "balloon moved off initial candidate"
            ),
            Placement::Fallback => warn!(
                text = %dimension.text,
                x = start.0,
                y = start.1,
                "no free position for balloon, placing at initial candidate"
            ),
        }

        let balloon = Balloon {
            id: self.next_id,
            position,
            dimension,
            radius: self.config.radius,
            placement,
        };
        self.next_id += 1;
        grid.mark(position, r);
        self.balloons.push(balloon);
        &self.balloons[self.balloons.len() - 1]
    }

    fn find_position(&self, grid: &OccupancyGrid, start: (i32, i32)) -> ((i32, i32), Placement) {
        let r = self.config.effective_radius();
        if grid.is_free(start, r) {
            return (start, Placement::Initial);
        }

        // `new` guarantees step * max_steps fits in an i32.
        let step = self.config.step();
        for distance in 1..=self.config.max_steps {
            let reach = distance as i32 * step;
            for direction in SPIRAL_DIRECTIONS {
                let (dx, dy) = direction.offset();
                let candidate = (
                    start.0.saturating_add(dx * reach),
                    start.1.saturating_add(dy * reach),
                );
                if !grid.contains(candidate) {
                    continue;
                }
                if grid.is_free(candidate, r) {
                    return (
                        candidate,
                        Placement::Spiral {
                            distance,
                            direction,
                        },
                    );
                }
            }
        }

        (start, Placement::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BoundingBox;

    fn dimension(x: i32, y: i32, w: i32, h: i32) -> Arc<Dimension> {
        Arc::new(Dimension {
            text: "12.5".to_string(),
            value: "12.5".to_string(),
            tolerance: None,
            bbox: BoundingBox::new(x, y, w, h),
            associated_lines: Vec::new(),
            page_index: 0,
        })
    }

    fn placer() -> BalloonPlacer {
        BalloonPlacer::new(BalloonConfig::default()).unwrap()
    }

    #[test]
    fn initial_candidate_on_empty_grid() {
        let mut grid = OccupancyGrid::new(800, 600).unwrap();
        let mut placer = placer();
        let balloon = placer.place(&mut grid, dimension(100, 100, 50, 20));
        assert_eq!(balloon.position, (180, 110));
        assert_eq!(balloon.id, 1);
        assert_eq!(balloon.radius, 20);
        assert_eq!(balloon.placement, Placement::Initial);
        assert!(grid.is_marked(180, 110));
        assert!(grid.is_marked(120, 50));
        assert!(!grid.is_marked(240, 110));
    }

    #[test]
    fn odd_height_rounds_down() {
        let placer = placer();
        assert_eq!(placer.initial_position(&dimension(100, 100, 50, 21)), (180, 110));
    }

    #[test]
    fn occupied_start_moves_east_first() {
        let mut grid = OccupancyGrid::new(800, 600).unwrap();
        let mut placer = placer();
        let first = placer.place(&mut grid, dimension(100, 200, 50, 20)).position;
        let second = placer.place(&mut grid, dimension(100, 200, 50, 20));
        // Distances 1 and 2 east still touch the first balloon's padded box.
        assert_eq!(second.position, (first.0 + 120, first.1));
        assert_eq!(
            second.placement,
            Placement::Spiral {
                distance: 3,
                direction: Direction::East
            }
        );
    }

    #[test]
    fn blocked_east_and_south_falls_through_to_west() {
        let mut grid = OccupancyGrid::new(800, 600).unwrap();
        // Claims x >= 200 for the upper part of the page.
        grid.mark((500, 110), 300);
        let mut placer = placer();
        let balloon = placer.place(&mut grid, dimension(100, 100, 50, 20));
        assert_eq!(
            balloon.placement,
            Placement::Spiral {
                distance: 1,
                direction: Direction::West
            }
        );
        assert_eq!(balloon.position, (140, 110));
    }

    #[test]
    fn candidates_outside_the_canvas_are_skipped() {
        let mut grid = OccupancyGrid::new(400, 400).unwrap();
        // Start sits in the top-left corner where its padded box is clipped.
        let mut placer = placer();
        assert_eq!(placer.initial_position(&dimension(0, 0, 10, 10)), (40, 5));
        let balloon = placer.place(&mut grid, dimension(0, 0, 10, 10));
        // E at distance 1 is (80, 5), still too close to the top edge; the
        // first candidate with room on every side is SE at distance 2.
        assert_eq!(
            balloon.placement,
            Placement::Spiral {
                distance: 2,
                direction: Direction::SouthEast
            }
        );
        assert_eq!(balloon.position, (120, 85));
    }

    #[test]
    fn exhausted_search_falls_back_to_initial() {
        let mut grid = OccupancyGrid::new(800, 600).unwrap();
        grid.mark((400, 300), 1000);
        let mut placer = placer();
        let balloon = placer.place(&mut grid, dimension(100, 100, 50, 20));
        assert_eq!(balloon.position, (180, 110));
        assert_eq!(balloon.placement, Placement::Fallback);
    }

    #[test]
    fn tiny_canvas_always_falls_back() {
        let mut grid = OccupancyGrid::new(50, 50).unwrap();
        let mut placer = placer();
        for expected in 1..=3 {
            let balloon = placer.place(&mut grid, dimension(0, 0, 5, 5));
            assert_eq!(balloon.id, expected);
            assert_eq!(balloon.placement, Placement::Fallback);
            assert_eq!(balloon.position, (35, 2));
        }
    }

    #[test]
    fn ids_are_sequential() {
        let mut grid = OccupancyGrid::new(2000, 2000).unwrap();
        let mut placer = placer();
        for i in 0..12 {
            placer.place(&mut grid, dimension(50 + (i % 4) * 400, 50 + (i / 4) * 500, 30, 10));
        }
        let ids: Vec<u32> = placer.balloons().iter().map(|b| b.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn rejects_bad_radius_and_padding() {
        let zero = BalloonConfig {
            radius: 0,
            ..Default::default()
        };
        assert_eq!(BalloonPlacer::new(zero).unwrap_err(), PlacementError::InvalidRadius(0));
        let negative = BalloonConfig {
            padding: -1,
            ..Default::default()
        };
        assert_eq!(
            BalloonPlacer::new(negative).unwrap_err(),
            PlacementError::InvalidPadding(-1)
        );
    }

    #[test]
    fn rejects_search_reach_beyond_coordinate_range() {
        let huge = BalloonConfig {
            radius: 300_000_000,
            ..Default::default()
        };
        assert_eq!(
            BalloonPlacer::new(huge).unwrap_err(),
            PlacementError::SearchOutOfRange {
                radius: 300_000_000,
                padding: 40,
                max_steps: 10
            }
        );
        let wide = BalloonConfig {
            radius: i32::MAX / 2,
            padding: i32::MAX / 2 + 10,
            max_steps: 1,
            ..Default::default()
        };
        assert!(matches!(
            BalloonPlacer::new(wide),
            Err(PlacementError::SearchOutOfRange { .. })
        ));
        let steps = BalloonConfig {
            max_steps: u32::MAX,
            ..Default::default()
        };
        assert!(BalloonPlacer::new(steps).is_err());
    }

    #[test]
    fn dimension_at_coordinate_limit_falls_back() {
        let mut grid = OccupancyGrid::new(800, 600).unwrap();
        let mut placer = placer();
        let balloon = placer.place(&mut grid, dimension(i32::MAX - 20, 100, 50, 20));
        assert_eq!(balloon.position, (i32::MAX, 110));
        assert_eq!(balloon.placement, Placement::Fallback);
        assert_eq!(grid.marked_cells(), 0);
    }

    #[test]
    fn spiral_order_is_fixed() {
        let offsets: Vec<_> = SPIRAL_DIRECTIONS.iter().map(|d| d.offset()).collect();
        assert_eq!(
            offsets,
            [(1, 0), (0, 1), (-1, 0), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)]
        );
    }
}
