//! Data-driven level layout.
//!
//! A level is a JSON file describing a grid of characters and a legend that
//! maps each character to a [`LevelCell`] (or `null` for empty space):
//!
//! ```json
//! {
//!   "offset_x": -12.0, "offset_y": 0.0,
//!   "cell_width": 1.0, "cell_height": 1.0,
//!   "grid": ["#....#", "#.P..#", "######"],
//!   "legend": { "#": "solid", ".": null, "P": "player_start" }
//! }
//! ```
//!
//! Row 0 is the top row of the level. The offset is the bottom-left corner
//! of the grid in world space (y up). Characters missing from the legend are
//! treated as empty.

use glam::Vec2;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::Aabb;
use crate::resources::collisionworld::Collider;

/// What a grid cell holds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LevelCell {
    Solid,
    /// Platform that can be jumped through from below.
    OneWay,
    PlayerStart,
    SpawnPoint,
    ReadyRegion,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LevelLayout {
    pub offset_x: f32,
    pub offset_y: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub grid: Vec<String>,
    pub legend: FxHashMap<char, Option<LevelCell>>,
}

const ARENA_GRID: [&str; 14] = [
    "#......................#",
    "#..E................E..#",
    "#......................#",
    "#......................#",
    "#...======....======...#",
    "#......................#",
    "#......................#",
    "#.........====.........#",
    "#......................#",
    "#.###..............###.#",
    "#......................#",
    "#..P...................#",
    "#.........RRRR.........#",
    "########################",
];

impl LevelLayout {
    /// Loads a layout from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let layout = Self::from_json(&file_content)?;
        info!("Loaded level '{}' ({} rows)", path, layout.grid.len());
        Ok(layout)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The built-in arena used when no level file is given.
    pub fn arena() -> Self {
        let mut legend = FxHashMap::default();
        legend.insert('#', Some(LevelCell::Solid));
        legend.insert('=', Some(LevelCell::OneWay));
        legend.insert('P', Some(LevelCell::PlayerStart));
        legend.insert('E', Some(LevelCell::SpawnPoint));
        legend.insert('R', Some(LevelCell::ReadyRegion));
        legend.insert('.', None);
        Self {
            offset_x: -12.0,
            offset_y: -1.0,
            cell_width: 1.0,
            cell_height: 1.0,
            grid: ARENA_GRID.iter().map(|row| row.to_string()).collect(),
            legend,
        }
    }

    fn cell_at(&self, ch: char) -> Option<LevelCell> {
        self.legend.get(&ch).copied().flatten()
    }

    fn cell_bounds(&self, row: usize, col: usize) -> Aabb {
        let rows = self.grid.len();
        let min = Vec2::new(
            self.offset_x + col as f32 * self.cell_width,
            self.offset_y + (rows - 1 - row) as f32 * self.cell_height,
        );
        Aabb::from_corners(min, min + Vec2::new(self.cell_width, self.cell_height))
    }

    /// Iterate over all non-empty cells with their world-space centers.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Vec2, LevelCell)> + '_ {
        self.grid.iter().enumerate().flat_map(move |(row, line)| {
            line.chars().enumerate().filter_map(move |(col, ch)| {
                self.cell_at(ch)
                    .map(|cell| (self.cell_bounds(row, col).center(), cell))
            })
        })
    }

    /// Level geometry. Horizontal runs of the same solid kind on a row are
    /// merged into one collider.
    pub fn colliders(&self) -> Vec<Collider> {
        let mut colliders = Vec::new();
        for (row, line) in self.grid.iter().enumerate() {
            let mut run: Option<(LevelCell, usize, usize)> = None;
            for (col, ch) in line.chars().enumerate() {
                let cell = self
                    .cell_at(ch)
                    .filter(|c| matches!(c, LevelCell::Solid | LevelCell::OneWay));
                match (run, cell) {
                    (Some((kind, start, _)), Some(c)) if kind == c => run = Some((kind, start, col)),
                    (_, c) => {
                        if let Some(finished) = run {
                            colliders.push(self.run_collider(row, finished));
                        }
                        run = c.map(|c| (c, col, col));
                    }
                }
            }
            if let Some(finished) = run {
                colliders.push(self.run_collider(row, finished));
            }
        }
        colliders
    }

    fn run_collider(&self, row: usize, (kind, start, end): (LevelCell, usize, usize)) -> Collider {
        let first = self.cell_bounds(row, start);
        let last = self.cell_bounds(row, end);
        let bounds = Aabb::from_corners(first.min, last.max);
        match kind {
            LevelCell::OneWay => Collider::one_way_platform(bounds),
            _ => Collider::solid(bounds),
        }
    }

    /// Center of the first player start cell.
    pub fn player_start(&self) -> Option<Vec2> {
        self.iter_cells()
            .find(|(_, cell)| *cell == LevelCell::PlayerStart)
            .map(|(pos, _)| pos)
    }

    pub fn spawn_points(&self) -> Vec<Vec2> {
        self.iter_cells()
            .filter(|(_, cell)| *cell == LevelCell::SpawnPoint)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Bounding box of every ready region cell.
    pub fn ready_region(&self) -> Option<Aabb> {
        let half = Vec2::new(self.cell_width, self.cell_height) * 0.5;
        self.iter_cells()
            .filter(|(_, cell)| *cell == LevelCell::ReadyRegion)
            .map(|(pos, _)| Aabb::from_center(pos, half))
            .reduce(|a, b| Aabb::from_corners(a.min.min(b.min), a.max.max(b.max)))
    }
}
