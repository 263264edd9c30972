use crate::config::{
    Config, Rgb, BACKGROUND_COLOR, BLACK, BLUE, CLEAR_GRAY, DARK_GRAY, GREEN, YELLOW,
};
use crate::grid::GridModel;
use crate::player::PlayerState;
use crate::ray::RayResult;
use glam::{Vec2, Vec3};

const PLAYER_RADIUS: f32 = 4.;

/// Something the drawing surface knows how to put on screen.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DrawCommand {
    FillRect { pos: Vec2, size: Vec2, color: Rgb },
    Line { from: Vec2, to: Vec2, color: Rgb },
    FillCircle { center: Vec2, radius: f32, color: Rgb },
}

/// A shaded vertical strip of the 3D view.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Slice {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgb,
}

impl Slice {
    pub fn command(&self) -> DrawCommand {
        DrawCommand::FillRect {
            pos: self.pos,
            size: self.size,
            color: self.color,
        }
    }
}

/// Keep each channel within [0, base]: closer walls never get brighter than the base color.
pub fn clamp_to_base(scaled: Vec3, base: Vec3) -> Vec3 {
    Vec3::select(scaled.cmpgt(base), base, scaled).max(Vec3::ZERO)
}

/// darken `base` with distance
pub fn shade(base: Rgb, depth: f32, divisor: f32, epsilon: f32) -> Rgb {
    let base = base.to_vec3();
    let scaled = base / (depth / divisor + epsilon);
    Rgb::from_vec3(clamp_to_base(scaled, base))
}

pub fn wall_height(depth: f32, factor: f32, epsilon: f32) -> f32 {
    factor / (depth + epsilon)
}

/// Turns ray results into draw commands for the map and the 3D view.
#[derive(Clone, Debug, PartialEq)]
pub struct Projector {
    /// left edge of the 3D viewport, the map sits to its left
    pub viewport_x: f32,
    pub viewport_size: f32,
    pub scale: f32,
    pub wall_color: Rgb,
    pub wall_height_factor: f32,
    pub wall_height_epsilon: f32,
    pub shade_divisor: f32,
    pub shade_epsilon: f32,
}

impl Projector {
    pub fn from_config(config: &Config) -> Self {
        Self {
            viewport_x: config.viewport_size() as f32,
            viewport_size: config.viewport_size() as f32,
            // slices exactly cover the square viewport
            scale: config.scale(),
            wall_color: config.wall_color,
            wall_height_factor: config.wall_height_factor,
            wall_height_epsilon: config.wall_height_epsilon,
            shade_divisor: config.shade_divisor,
            shade_epsilon: config.shade_epsilon,
        }
    }

    /// slice for a ray, `None` if it never hit anything
    pub fn slice(&self, ray: &RayResult) -> Option<Slice> {
        let hit = ray.hit?;
        let depth = hit.corrected_depth;
        // anything taller than the viewport is cut off anyway
        let height = wall_height(depth, self.wall_height_factor, self.wall_height_epsilon)
            .min(self.viewport_size);

        Some(Slice {
            pos: Vec2::new(
                self.viewport_x + ray.ray_index as f32 * self.scale,
                self.viewport_size / 2. - height / 2.,
            ),
            size: Vec2::new(self.scale, height),
            color: shade(self.wall_color, depth, self.shade_divisor, self.shade_epsilon),
        })
    }

    /// ceiling and floor of the 3D view
    pub fn clear(&self) -> [DrawCommand; 2] {
        let half = self.viewport_size / 2.;
        [
            DrawCommand::FillRect {
                pos: Vec2::new(self.viewport_x, 0.),
                size: Vec2::new(self.viewport_size, half),
                color: CLEAR_GRAY,
            },
            DrawCommand::FillRect {
                pos: Vec2::new(self.viewport_x, half),
                size: Vec2::new(self.viewport_size, half),
                color: DARK_GRAY,
            },
        ]
    }

    /// top-down map, one world unit per pixel
    pub fn map(&self, grid: &GridModel, player: &PlayerState) -> Vec<DrawCommand> {
        let tile = grid.tile_size();
        let mut commands = Vec::with_capacity(grid.size() * grid.size() + 2);

        commands.push(DrawCommand::FillRect {
            pos: Vec2::ZERO,
            size: Vec2::splat(self.viewport_size),
            color: BLACK,
        });
        commands.extend(grid.tiles().map(|(row, col, solid)| DrawCommand::FillRect {
            pos: Vec2::new(col as f32 * tile, row as f32 * tile),
            size: Vec2::splat(tile - 1.),
            color: if solid { self.wall_color } else { BACKGROUND_COLOR },
        }));
        commands.push(DrawCommand::FillCircle {
            center: player.position,
            radius: PLAYER_RADIUS,
            color: GREEN,
        });

        commands
    }

    /// ray line, highlighted tile and slice for every hit, in ray order
    pub fn rays(
        &self,
        grid: &GridModel,
        player: &PlayerState,
        rays: &[RayResult],
    ) -> Vec<DrawCommand> {
        let tile = grid.tile_size();

        rays.iter()
            .filter_map(|ray| Some((ray.hit?, self.slice(ray)?)))
            .flat_map(|(hit, slice)| {
                let (row, col) = hit.tile;
                [
                    DrawCommand::Line {
                        from: player.position,
                        to: hit.point,
                        color: BLUE,
                    },
                    DrawCommand::FillRect {
                        pos: Vec2::new(col as f32 * tile, row as f32 * tile),
                        size: Vec2::splat(tile - 1.),
                        color: YELLOW,
                    },
                    slice.command(),
                ]
            })
            .collect()
    }

    /// whole frame: clear the 3D view, map, then rays and slices
    pub fn frame(
        &self,
        grid: &GridModel,
        player: &PlayerState,
        rays: &[RayResult],
    ) -> Vec<DrawCommand> {
        let mut commands = self.clear().to_vec();
        commands.extend(self.map(grid, player));
        commands.extend(self.rays(grid, player, rays));
        commands
    }
}
