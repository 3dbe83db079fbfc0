//! Terrain Elevation Queries
//!
//! The subject collides against terrain through the [`TerrainQuery`] trait:
//! a pure lookup from a horizontal `(x, z)` coordinate to an elevation.
//! `None` means the terrain under that point is not resident (outside the
//! loaded area). Callers treat it as "no collision surface here", never as
//! an error.

use std::rc::Rc;

use glam::Vec2;

/// Elevation lookup against already-resident terrain data.
///
/// Implementations must be pure for a given resident state: the same
/// `(x, z)` always yields the same answer, and no call blocks.
pub trait TerrainQuery {
    /// Terrain elevation at `(x, z)`, or `None` outside known terrain.
    fn elevation_at(&self, x: f32, z: f32) -> Option<f32>;
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for &T {
    fn elevation_at(&self, x: f32, z: f32) -> Option<f32> {
        (**self).elevation_at(x, z)
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for Box<T> {
    fn elevation_at(&self, x: f32, z: f32) -> Option<f32> {
        (**self).elevation_at(x, z)
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for Rc<T> {
    fn elevation_at(&self, x: f32, z: f32) -> Option<f32> {
        (**self).elevation_at(x, z)
    }
}

/// Infinite flat plane at a fixed elevation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlatTerrain {
    pub elevation: f32,
}

impl FlatTerrain {
    pub fn new(elevation: f32) -> Self {
        Self { elevation }
    }
}

impl TerrainQuery for FlatTerrain {
    fn elevation_at(&self, _x: f32, _z: f32) -> Option<f32> {
        Some(self.elevation)
    }
}

/// No resident terrain anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoTerrain;

impl TerrainQuery for NoTerrain {
    fn elevation_at(&self, _x: f32, _z: f32) -> Option<f32> {
        None
    }
}

/// Adapts a closure into a [`TerrainQuery`].
#[derive(Clone, Copy)]
pub struct FnTerrain<F>(pub F);

impl<F> TerrainQuery for FnTerrain<F>
where
    F: Fn(f32, f32) -> Option<f32>,
{
    fn elevation_at(&self, x: f32, z: f32) -> Option<f32> {
        (self.0)(x, z)
    }
}

// ============================================================================
// HEIGHT FIELD
// ============================================================================

/// Errors raised while building a [`HeightField`].
#[derive(Debug, Clone, PartialEq)]
pub enum HeightFieldError {
    /// `samples.len()` does not equal `columns * rows`.
    SampleCountMismatch { expected: usize, actual: usize },
    /// Cell size must be finite and strictly positive.
    InvalidCellSize(f32),
    /// At least a 2x2 grid is needed to interpolate.
    TooSmall { columns: usize, rows: usize },
}

impl std::fmt::Display for HeightFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeightFieldError::SampleCountMismatch { expected, actual } => {
                write!(f, "expected {expected} height samples, got {actual}")
            }
            HeightFieldError::InvalidCellSize(size) => write!(f, "invalid cell size: {size}"),
            HeightFieldError::TooSmall { columns, rows } => {
                write!(f, "height field must be at least 2x2, got {columns}x{rows}")
            }
        }
    }
}

impl std::error::Error for HeightFieldError {}

/// Regular grid of elevation samples over a rectangular patch of the XZ plane.
///
/// Sample `(column, row)` sits at `origin + (column, row) * cell_size`, with
/// columns running along +X and rows along +Z. Elevations between samples
/// are bilinearly interpolated. Points outside the grid return `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    origin: Vec2,
    cell_size: f32,
    columns: usize,
    rows: usize,
    /// Row-major: `samples[row * columns + column]`.
    samples: Vec<f32>,
}

impl HeightField {
    /// Build a height field from explicit samples.
    pub fn new(
        origin: Vec2,
        cell_size: f32,
        columns: usize,
        rows: usize,
        samples: Vec<f32>,
    ) -> Result<Self, HeightFieldError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(HeightFieldError::InvalidCellSize(cell_size));
        }
        if columns < 2 || rows < 2 {
            return Err(HeightFieldError::TooSmall { columns, rows });
        }
        let expected = columns * rows;
        if samples.len() != expected {
            return Err(HeightFieldError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            origin,
            cell_size,
            columns,
            rows,
            samples,
        })
    }

    /// Build a height field by sampling `height(x, z)` at every grid point.
    pub fn from_fn<F>(
        origin: Vec2,
        cell_size: f32,
        columns: usize,
        rows: usize,
        height: F,
    ) -> Result<Self, HeightFieldError>
    where
        F: Fn(f32, f32) -> f32,
    {
        let samples = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (column, row)))
            .map(|(column, row)| {
                let x = origin.x + column as f32 * cell_size;
                let z = origin.y + row as f32 * cell_size;
                height(x, z)
            })
            .collect();
        Self::new(origin, cell_size, columns, rows, samples)
    }

    /// World-space XZ corner with the smallest coordinates.
    pub fn min_corner(&self) -> Vec2 {
        self.origin
    }

    /// World-space XZ corner with the largest coordinates.
    pub fn max_corner(&self) -> Vec2 {
        let extent = Vec2::new(
            (self.columns - 1) as f32 * self.cell_size,
            (self.rows - 1) as f32 * self.cell_size,
        );
        self.origin + extent
    }

    /// Whether `(x, z)` lies inside the grid (edges inclusive).
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let max = self.max_corner();
        x >= self.origin.x && x <= max.x && z >= self.origin.y && z <= max.y
    }

    #[inline]
    fn sample(&self, column: usize, row: usize) -> f32 {
        self.samples[row * self.columns + column]
    }
}

impl TerrainQuery for HeightField {
    fn elevation_at(&self, x: f32, z: f32) -> Option<f32> {
        // NaN coordinates fail every comparison and fall out here too.
        if !self.contains(x, z) {
            return None;
        }

        let gx = (x - self.origin.x) / self.cell_size;
        let gz = (z - self.origin.y) / self.cell_size;

        // Clamp so the far edge interpolates inside the last cell.
        let c0 = (gx.floor() as usize).min(self.columns - 2);
        let r0 = (gz.floor() as usize).min(self.rows - 2);
        let fx = gx - c0 as f32;
        let fz = gz - r0 as f32;

        let h00 = self.sample(c0, r0);
        let h10 = self.sample(c0 + 1, r0);
        let h01 = self.sample(c0, r0 + 1);
        let h11 = self.sample(c0 + 1, r0 + 1);

        let near = h00 + (h10 - h00) * fx;
        let far = h01 + (h11 - h01) * fx;
        Some(near + (far - near) * fz)
    }
}
