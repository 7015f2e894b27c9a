use crate::mesh::{cube, vertex_colors};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Layout of the instanced cube grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLayout {
    /// Grid coordinates run from `-extent` (inclusive) to `extent` (exclusive).
    pub extent: i32,
    pub step: i32,
    /// Multiplier turning grid coordinates into world units.
    pub spacing: f32,
    pub offset: f32,
    /// Half-extent of each cube.
    pub cube_size: f32,
    /// Upper bound for each random colour channel.
    pub max_color: f32,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            extent: 10,
            step: 2,
            spacing: 0.1,
            offset: 0.1,
            cube_size: 0.05,
            max_color: 0.7,
        }
    }
}

impl FieldLayout {
    pub fn cubes_per_axis(&self) -> usize {
        if self.step <= 0 || self.extent <= 0 {
            return 0;
        }
        (-self.extent..self.extent).step_by(self.step as usize).count()
    }

    pub fn instance_count(&self) -> usize {
        self.cubes_per_axis().pow(3)
    }

    /// Cube centres, z-major then y then x.
    pub fn translations(&self) -> Vec<[f32; 3]> {
        if self.cubes_per_axis() == 0 {
            return Vec::new();
        }
        let coords: Vec<f32> = (-self.extent..self.extent)
            .step_by(self.step as usize)
            .map(|c| c as f32 * self.spacing + self.offset)
            .collect();
        let mut out = Vec::with_capacity(coords.len().pow(3));
        for &z in &coords {
            for &y in &coords {
                for &x in &coords {
                    out.push([x, y, z]);
                }
            }
        }
        out
    }
}

/// Everything needed to draw the cube field with one instanced call:
/// one shared cube mesh with per-vertex colours, and per-instance offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeField {
    pub layout: FieldLayout,
    pub vertices: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub translations: Vec<[f32; 3]>,
}

impl CubeField {
    /// Build the field. A seed makes the colours reproducible.
    pub fn generate(layout: FieldLayout, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let vertices = cube(layout.cube_size);
        let colors = vertex_colors(vertices.len(), layout.max_color, &mut rng);
        let translations = layout.translations();
        tracing::debug!(
            "generated cube field: {} vertices x {} instances",
            vertices.len(),
            translations.len()
        );
        Self {
            layout,
            vertices,
            colors,
            translations,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn instance_count(&self) -> u32 {
        self.translations.len() as u32
    }

    /// Axis-aligned bounds over all cubes, or `None` for an empty field.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let half = Vec3::splat(self.layout.cube_size.abs());
        let mut iter = self.translations.iter().map(|t| Vec3::from_array(*t));
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), t| (min.min(t), max.max(t)));
        Some((min - half, max + half))
    }
}

impl Default for CubeField {
    fn default() -> Self {
        Self::generate(FieldLayout::default(), None)
    }
}
