//! Rendering configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,

    /// Camera position (meters, Z up)
    pub eye: [f32; 3],

    /// Look-at target (meters)
    pub target: [f32; 3],

    /// Vertical exaggeration applied to the height field in the vertex stage
    pub height_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near_plane_m: 0.1,
            far_plane_m: 1000.0,
            // Looking at the patch from a low oblique angle, like the reference viewer
            eye: [-16.0, -96.0, 60.0],
            target: [0.0, 0.0, 0.0],
            height_scale: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        let config = RenderConfig::default();
        assert!((config.aspect_ratio() - 16.0 / 9.0).abs() < 1e-5);
    }
}
