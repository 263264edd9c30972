use glam::Vec3;
use std::f64::consts::PI;

/// 8-bit rgb color handed to the drawing surface
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32)
    }

    /// channels are truncated, values outside 0..=255 saturate
    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x as u8, v.y as u8, v.z as u8)
    }
}

// palette
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const DARK_GRAY: Rgb = Rgb::new(40, 40, 40);
pub const CLEAR_GRAY: Rgb = Rgb::new(110, 110, 110);
pub const WALL_COLOR: Rgb = Rgb::new(200, 200, 200);
pub const BACKGROUND_COLOR: Rgb = Rgb::new(30, 30, 30);

/// Session constants. Nothing in here changes once the window is up.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    /// world units per tile edge, usually overridden by the map file
    pub tile_size: f32,
    /// total angular width of the ray fan, in radians
    pub fov: f64,
    pub casted_rays: usize,
    /// march cap, in unit depth steps
    pub max_depth: u32,
    pub wall_height_factor: f32,
    pub wall_height_epsilon: f32,
    pub shade_divisor: f32,
    pub shade_epsilon: f32,
    pub dead_zone: f32,
    pub rotation_sensitivity: f32,
    /// heading the movement offset is measured against
    pub reference_angle: f64,
    pub start_angle: f64,
    pub wall_color: Rgb,
    pub target_fps: u64,
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        let screen_height = 480;

        Self {
            screen_width: screen_height * 2,
            screen_height,
            tile_size: (screen_height / 8) as f32,
            fov: PI / 3.,
            casted_rays: 120,
            max_depth: screen_height,
            wall_height_factor: 21_000.,
            wall_height_epsilon: 0.0001,
            shade_divisor: 50.,
            shade_epsilon: 0.001,
            dead_zone: 0.15,
            rotation_sensitivity: 0.1,
            reference_angle: PI,
            start_angle: PI,
            wall_color: WALL_COLOR,
            target_fps: 30,
            parallel: false,
        }
    }
}

impl Config {
    /// width and height of the square 2D map region, also the 3D viewport size
    pub fn viewport_size(&self) -> u32 {
        self.screen_height
    }

    /// horizontal width of a single 3D slice
    pub fn scale(&self) -> f32 {
        self.viewport_size() as f32 / self.casted_rays as f32
    }

    /// apply `RAYCAST_*` environment overrides
    pub fn with_env(mut self) -> Self {
        if let Ok(value) = std::env::var("RAYCAST_PARALLEL") {
            self.parallel = matches!(value.trim(), "1" | "true" | "yes");
            log::debug!("parallel casting set to {} from environment", self.parallel);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_layout() {
        let config = Config::default();
        assert_eq!(config.screen_width, 960);
        assert_eq!(config.tile_size, 60.);
        assert_eq!(config.viewport_size(), 480);
        assert!((config.scale() - 4.).abs() < 1e-6);
    }

    #[test]
    fn scale_follows_viewport_not_window_width() {
        let config = Config {
            screen_width: 1000,
            ..Config::default()
        };
        // the fan still spans exactly the square 3D view
        let fan_width = config.scale() * config.casted_rays as f32;
        assert!((fan_width - config.viewport_size() as f32).abs() < 1e-3);
    }

    #[test]
    fn vec3_conversion_saturates() {
        let color = Rgb::from_vec3(Vec3::new(300., -4., 12.7));
        assert_eq!(color, Rgb::new(255, 0, 12));
        assert_eq!(WALL_COLOR.to_vec3(), Vec3::splat(200.));
    }
}
