//! Partitioning a container into equal rectangular zones.

use crate::{error::ValidationError, types::ZoneIndex, zone::Zone};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A row-major grid of equal [`Zone`]s tiling a `width` x `height`
/// container whose top-left corner is the origin.
///
/// Row 0 is the top band and column 0 the left band. A grid is never
/// patched: any change of size or shape builds a new one.
///
/// Serialized as its [`GridShape`]; deserializing rebuilds the zones
/// through [`ZoneGrid::new`], so invalid payloads are rejected with the
/// same [`ValidationError`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridShape", into = "GridShape")]
pub struct ZoneGrid {
    zones: Vec<Zone>,
    width: f32,
    height: f32,
    cols: usize,
    rows: usize,
    zone_width: f32,
    zone_height: f32,
}

/// The four inputs a [`ZoneGrid`] is a pure function of.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridShape {
    pub width: f32,
    pub height: f32,
    pub cols: usize,
    pub rows: usize,
}

impl TryFrom<GridShape> for ZoneGrid {
    type Error = ValidationError;

    fn try_from(shape: GridShape) -> Result<Self, Self::Error> {
        ZoneGrid::new(shape.width, shape.height, shape.cols, shape.rows)
    }
}

impl From<ZoneGrid> for GridShape {
    fn from(grid: ZoneGrid) -> Self {
        grid.shape()
    }
}

/// Checks the container and count preconditions shared by every grid
/// constructor, in the order width, height, columns, rows.
///
/// ### Returns
/// `Ok(())` if `width` and `height` are finite and positive and both
/// counts are at least 1, otherwise the first [`ValidationError`] hit.
pub fn validate(width: f32, height: f32, cols: usize, rows: usize) -> Result<(), ValidationError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ValidationError::InvalidWidth(width));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(ValidationError::InvalidHeight(height));
    }
    if cols == 0 {
        return Err(ValidationError::ZeroColumns);
    }
    if rows == 0 {
        return Err(ValidationError::ZeroRows);
    }
    Ok(())
}

impl ZoneGrid {
    /// Splits a `width` x `height` container into `cols` x `rows` zones.
    ///
    /// Each zone is `width / cols` wide and `height / rows` tall. Left and
    /// top edges are `index * size`; right and bottom edges are
    /// `left + size` and `top + size`, so rounding error accumulates
    /// additively rather than being clamped to the container edge.
    ///
    /// ### Parameters
    /// - `width`, `height` - Container size, finite and greater than 0.
    /// - `cols`, `rows` - Zone counts along x and y, at least 1.
    ///
    /// ### Returns
    /// The full grid, or [`ValidationError`] if either dimension is not a
    /// finite positive number or either count is zero. No partial grid is
    /// ever returned.
    pub fn new(width: f32, height: f32, cols: usize, rows: usize) -> Result<Self, ValidationError> {
        validate(width, height, cols, rows)?;

        let zone_width = width / cols as f32;
        let zone_height = height / rows as f32;

        let mut zones = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            let top = row as f32 * zone_height;
            for col in 0..cols {
                let left = col as f32 * zone_width;
                zones.push(Zone::cell(left, top, zone_width, zone_height));
            }
        }

        log::debug!(
            "built {cols}x{rows} zone grid over {width}x{height} (cell {zone_width}x{zone_height})"
        );

        Ok(Self {
            zones,
            width,
            height,
            cols,
            rows,
            zone_width,
            zone_height,
        })
    }

    /// The inputs this grid was built from.
    pub fn shape(&self) -> GridShape {
        GridShape {
            width: self.width,
            height: self.height,
            cols: self.cols,
            rows: self.rows,
        }
    }

    /// Container width the grid tiles.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Container height the grid tiles.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width shared by every zone, `width / cols`.
    pub fn zone_width(&self) -> f32 {
        self.zone_width
    }

    /// Height shared by every zone, `height / rows`.
    pub fn zone_height(&self) -> f32 {
        self.zone_height
    }

    /// Total number of zones, `cols * rows`. Never zero.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Position of `(row, col)` in the row-major zone order.
    ///
    /// ### Returns
    /// `row * cols + col`, or `None` if either index is out of the grid.
    #[inline]
    pub fn flat_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Returns the zone at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&Zone> {
        self.flat_index(row, col).and_then(|i| self.zones.get(i))
    }

    /// All zones in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// All zones paired with their `(row, col)`, in row-major order.
    pub fn indexed(&self) -> impl Iterator<Item = (ZoneIndex, &Zone)> {
        let cols = self.cols;
        self.zones
            .iter()
            .enumerate()
            .map(move |(i, z)| ((i / cols, i % cols), z))
    }

    /// One slice per row, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Zone]> {
        self.zones.chunks(self.cols)
    }

    /// Finds the zone containing `pos`.
    ///
    /// Cells are half-open on their right and bottom edges, except the
    /// last column and row which also own the container edge.
    ///
    /// ### Parameters
    /// - `pos` - Point in container coordinates.
    ///
    /// ### Returns
    /// The `(row, col)` of the owning zone, or `None` for points outside
    /// the container or NaN coordinates.
    pub fn locate(&self, pos: Vec2) -> Option<ZoneIndex> {
        let col = Self::band(pos.x, self.width, self.zone_width, self.cols)?;
        let row = Self::band(pos.y, self.height, self.zone_height, self.rows)?;
        Some((row, col))
    }

    /// Index of the band of `size` containing `v` along an axis of
    /// length `extent`, agreeing with the `index * size` cell edges.
    fn band(v: f32, extent: f32, size: f32, count: usize) -> Option<usize> {
        if v.is_nan() || v < 0.0 || v > extent {
            return None;
        }
        let mut i = ((v / size) as usize).min(count - 1);
        if i > 0 && v < i as f32 * size {
            i -= 1;
        } else if i + 1 < count && v >= (i + 1) as f32 * size {
            i += 1;
        }
        Some(i)
    }
}
