use glam::{Mat4, Vec3};

/// One placement of the shared mesh: translation in the XY plane plus a
/// uniform scale. Entries never carry a rotation.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEntry {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl LayoutEntry {
    pub const fn new(x: f32, y: f32, scale: f32) -> Self {
        Self { x, y, scale }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.x, self.y, 0.0))
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

pub const GRID_LAYOUT: [LayoutEntry; 8] = [
    LayoutEntry::new(-4.0, 2.8, 0.95), // top-left
    LayoutEntry::new(0.0, 3.2, 0.55),  // top-center (small)
    LayoutEntry::new(4.0, 3.0, 0.95),  // top-right
    LayoutEntry::new(-5.0, -0.2, 0.70),
    LayoutEntry::new(-1.5, -0.6, 1.25),
    LayoutEntry::new(2.0, -0.4, 1.15),
    LayoutEntry::new(-3.0, -3.2, 0.55), // bottom-left (small)
    LayoutEntry::new(1.0, -3.4, 0.95),
];

/// The fixed scene: an ordered list of model matrices, one per instance
/// of the shared mesh. Built once at startup; draw order is list order.
pub struct Scene {
    pub instances: Vec<Mat4>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    pub fn from_layout(entries: &[LayoutEntry]) -> Self {
        Self {
            instances: entries.iter().map(LayoutEntry::model_matrix).collect(),
        }
    }

    pub fn add_instance(&mut self, transform: Mat4) {
        self.instances.push(transform);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_layout(&GRID_LAYOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-6;

    #[test]
    fn empty_layout_yields_no_instances() {
        let scene = Scene::from_layout(&[]);
        assert!(scene.instances.is_empty());
    }

    #[test]
    fn grid_layout_preserves_order_and_translation() {
        let scene = Scene::from_layout(&GRID_LAYOUT);
        assert_eq!(scene.instances.len(), GRID_LAYOUT.len());
        for (matrix, entry) in scene.instances.iter().zip(GRID_LAYOUT.iter()) {
            let translation = matrix.col(3);
            assert!((translation.x - entry.x).abs() < EPS);
            assert!((translation.y - entry.y).abs() < EPS);
            assert!(translation.z.abs() < EPS);
            assert!((translation.w - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn model_matrix_has_no_rotation() {
        for entry in GRID_LAYOUT {
            let m = entry.model_matrix();
            let s = entry.scale;
            // Uniform scale on the diagonal, zero everywhere else.
            let expected = [
                Vec4::new(s, 0.0, 0.0, 0.0),
                Vec4::new(0.0, s, 0.0, 0.0),
                Vec4::new(0.0, 0.0, s, 0.0),
            ];
            for (col, want) in expected.iter().enumerate() {
                assert!((m.col(col) - *want).abs().max_element() < EPS);
            }
        }
    }

    #[test]
    fn translate_applies_after_scale() {
        let entry = LayoutEntry::new(2.0, -1.0, 0.5);
        let p = entry.model_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p.x - 2.5).abs() < EPS);
        assert!((p.y - (-1.0)).abs() < EPS);
        assert!(p.z.abs() < EPS);
    }
}
