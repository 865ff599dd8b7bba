//! Level definitions and the JSON level pack loader
//!
//! A pack is a legend of block kinds plus one character grid per level.
//! Parsing expands each grid row-major into positioned block descriptors;
//! the simulation never sees the grid, only the descriptors.

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::render::Color;

/// A single block, fully positioned in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
    pub hit_points: u32,
    pub color: Color,
}

/// The blocks of one level, in row-major layout order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub blocks: Vec<BlockDescriptor>,
}

/// A validated, non-empty collection of levels
///
/// Construction guarantees at least one level, no block-less levels, and an
/// in-range start index, so the simulation can index without checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    levels: Vec<LevelDescriptor>,
    start_index: usize,
}

/// Why a level pack was rejected
#[derive(Debug)]
pub enum LevelError {
    /// The pack contains no levels at all
    EmptySet,
    /// A level has no blocks and could never be completed by play
    EmptyLevel { index: usize },
    /// The configured starting level does not exist
    StartIndexOutOfRange { start: usize, len: usize },
    /// A grid cell names a symbol the legend does not define
    UnknownSymbol { symbol: char, row: usize, col: usize },
    /// The pack is not valid JSON
    Parse(serde_json::Error),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::EmptySet => write!(f, "level pack has no levels"),
            LevelError::EmptyLevel { index } => {
                write!(f, "level {index} has no blocks")
            }
            LevelError::StartIndexOutOfRange { start, len } => {
                write!(f, "start level {start} out of range: pack has {len} levels")
            }
            LevelError::UnknownSymbol { symbol, row, col } => {
                write!(f, "unknown block symbol {symbol:?} at row {row}, column {col}")
            }
            LevelError::Parse(err) => write!(f, "level pack is not valid JSON: {err}"),
        }
    }
}

impl std::error::Error for LevelError {}

/// On-disk pack envelope
#[derive(Deserialize)]
struct RawPack {
    /// Grid cell size, which is also every block's size
    cell_width: f32,
    cell_height: f32,
    /// Vertical offset of the topmost grid row
    top_margin: f32,
    #[serde(default)]
    start_level: usize,
    legend: HashMap<char, RawBlockKind>,
    levels: Vec<RawLevel>,
}

#[derive(Deserialize)]
struct RawBlockKind {
    hit_points: u32,
    color: Color,
}

#[derive(Deserialize)]
struct RawLevel {
    rows: Vec<String>,
}

impl LevelSet {
    /// Validate an already-expanded collection of levels
    pub fn new(levels: Vec<LevelDescriptor>, start_index: usize) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptySet);
        }
        if let Some(index) = levels.iter().position(|level| level.blocks.is_empty()) {
            return Err(LevelError::EmptyLevel { index });
        }
        if start_index >= levels.len() {
            return Err(LevelError::StartIndexOutOfRange {
                start: start_index,
                len: levels.len(),
            });
        }
        Ok(Self {
            levels,
            start_index,
        })
    }

    /// Parse and validate a JSON level pack
    ///
    /// Grid cells expand left-to-right within a row, rows top-to-bottom, so
    /// descriptor order is row-major. `.` and space are empty cells.
    pub fn parse(json: &str) -> Result<Self, LevelError> {
        let raw: RawPack = serde_json::from_str(json).map_err(LevelError::Parse)?;
        let mut levels = Vec::with_capacity(raw.levels.len());
        for level in &raw.levels {
            let mut blocks = Vec::new();
            for (row, line) in level.rows.iter().enumerate() {
                for (col, symbol) in line.chars().enumerate() {
                    if symbol == '.' || symbol == ' ' {
                        continue;
                    }
                    let kind = raw
                        .legend
                        .get(&symbol)
                        .ok_or(LevelError::UnknownSymbol { symbol, row, col })?;
                    blocks.push(BlockDescriptor {
                        position: Vec2::new(
                            col as f32 * raw.cell_width,
                            raw.top_margin + row as f32 * raw.cell_height,
                        ),
                        size: Vec2::new(raw.cell_width, raw.cell_height),
                        hit_points: kind.hit_points,
                        color: kind.color,
                    });
                }
            }
            levels.push(LevelDescriptor { blocks });
        }
        Self::new(levels, raw.start_level)
    }

    /// The level pack compiled into the binary
    pub fn builtin() -> Self {
        static PACK: &str = include_str!("../assets/levels.json");
        Self::parse(PACK).expect("builtin level pack is valid")
    }

    #[allow(clippy::len_without_is_empty)]
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    #[inline]
    pub fn level(&self, index: usize) -> &LevelDescriptor {
        &self.levels[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_block_level() -> LevelDescriptor {
        LevelDescriptor {
            blocks: vec![BlockDescriptor {
                position: Vec2::ZERO,
                size: Vec2::new(16.0, 8.0),
                hit_points: 1,
                color: Color::RED,
            }],
        }
    }

    #[test]
    fn test_new_rejects_empty_set() {
        let err = LevelSet::new(Vec::new(), 0).unwrap_err();
        assert!(matches!(err, LevelError::EmptySet));
    }

    #[test]
    fn test_new_rejects_block_less_level() {
        let levels = vec![one_block_level(), LevelDescriptor { blocks: Vec::new() }];
        let err = LevelSet::new(levels, 0).unwrap_err();
        assert!(matches!(err, LevelError::EmptyLevel { index: 1 }));
    }

    #[test]
    fn test_new_rejects_out_of_range_start() {
        let err = LevelSet::new(vec![one_block_level()], 1).unwrap_err();
        assert!(matches!(
            err,
            LevelError::StartIndexOutOfRange { start: 1, len: 1 }
        ));
    }

    #[test]
    fn test_parse_expands_grid_row_major() {
        let set = LevelSet::parse(
            r#"{
                "cell_width": 16.0,
                "cell_height": 8.0,
                "top_margin": 24.0,
                "legend": {
                    "r": { "hit_points": 1, "color": [200, 72, 72] },
                    "s": { "hit_points": 2, "color": [142, 142, 142] }
                },
                "levels": [
                    { "rows": ["r.s", " rr"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.start_index(), 0);
        let blocks = &set.level(0).blocks;
        assert_eq!(blocks.len(), 4);
        // Row 0 left-to-right, then row 1
        assert_eq!(blocks[0].position, Vec2::new(0.0, 24.0));
        assert_eq!(blocks[1].position, Vec2::new(32.0, 24.0));
        assert_eq!(blocks[2].position, Vec2::new(16.0, 32.0));
        assert_eq!(blocks[3].position, Vec2::new(32.0, 32.0));
        assert_eq!(blocks[0].size, Vec2::new(16.0, 8.0));
        assert_eq!(blocks[0].hit_points, 1);
        assert_eq!(blocks[1].hit_points, 2);
        assert_eq!(blocks[1].color, Color::new(142, 142, 142));
    }

    #[test]
    fn test_parse_honors_start_level() {
        let set = LevelSet::parse(
            r#"{
                "cell_width": 16.0,
                "cell_height": 8.0,
                "top_margin": 24.0,
                "start_level": 1,
                "legend": { "r": { "hit_points": 1, "color": [200, 72, 72] } },
                "levels": [
                    { "rows": ["r"] },
                    { "rows": ["rr"] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(set.start_index(), 1);
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let err = LevelSet::parse(
            r#"{
                "cell_width": 16.0,
                "cell_height": 8.0,
                "top_margin": 24.0,
                "legend": { "r": { "hit_points": 1, "color": [200, 72, 72] } },
                "levels": [
                    { "rows": ["r.x"] }
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownSymbol {
                symbol: 'x',
                row: 0,
                col: 2
            }
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = LevelSet::parse("{ not json").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_all_blank_level() {
        let err = LevelSet::parse(
            r#"{
                "cell_width": 16.0,
                "cell_height": 8.0,
                "top_margin": 24.0,
                "legend": { "r": { "hit_points": 1, "color": [200, 72, 72] } },
                "levels": [
                    { "rows": ["..", ".."] }
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LevelError::EmptyLevel { index: 0 }));
    }

    #[test]
    fn test_builtin_pack_fits_the_playfield() {
        let set = LevelSet::builtin();
        assert!(set.len() >= 1);
        assert!(set.start_index() < set.len());
        for index in 0..set.len() {
            for block in &set.level(index).blocks {
                assert!(block.position.x >= 0.0);
                assert!(block.position.x + block.size.x <= crate::consts::FIELD_WIDTH);
                assert!(block.position.y >= 0.0);
            }
        }
    }
}
