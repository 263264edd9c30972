use crate::config::Config;
use crate::grid::GridModel;
use crate::player::{direction, PlayerState};
use crate::ray::{RayHit, RayResult};
use rayon::prelude::*;

/// Marches a fixed fan of rays through the grid in unit depth steps.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayCaster {
    pub fov: f64,
    pub casted_rays: usize,
    pub max_depth: u32,
}

impl RayCaster {
    pub fn new(fov: f64, casted_rays: usize, max_depth: u32) -> Self {
        Self {
            fov,
            casted_rays,
            max_depth,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fov, config.casted_rays, config.max_depth)
    }

    pub fn half_fov(&self) -> f64 {
        self.fov / 2.
    }

    pub fn step_angle(&self) -> f64 {
        if self.casted_rays == 0 {
            return 0.;
        }

        self.fov / self.casted_rays as f64
    }

    /// absolute angle of ray `ray_index`
    pub fn ray_angle(&self, player: &PlayerState, ray_index: usize) -> f64 {
        player.angle - self.half_fov() + ray_index as f64 * self.step_angle()
    }

    /// cast the whole fan, ordered by ray index
    pub fn cast(&self, player: &PlayerState, grid: &GridModel) -> Vec<RayResult> {
        (0..self.casted_rays)
            .map(|ray_index| self.cast_one(player, grid, ray_index))
            .collect()
    }

    /// same as [`RayCaster::cast`], one rayon task per ray
    pub fn cast_par(&self, player: &PlayerState, grid: &GridModel) -> Vec<RayResult> {
        (0..self.casted_rays)
            .into_par_iter()
            .map(|ray_index| self.cast_one(player, grid, ray_index))
            .collect()
    }

    pub fn cast_one(&self, player: &PlayerState, grid: &GridModel, ray_index: usize) -> RayResult {
        let angle = self.ray_angle(player, ray_index);
        let dir = direction(angle);

        let hit = (0..self.max_depth).find_map(|depth| {
            let point = player.position + dir * depth as f32;
            let (row, col) = grid.tile_of(point);

            grid.is_solid(row, col).then(|| RayHit {
                point,
                tile: (row, col),
                raw_depth: depth,
                corrected_depth: correct_fisheye(depth as f32, player.angle, angle),
            })
        });

        RayResult {
            ray_index,
            angle,
            hit,
        }
    }
}

/// project a radial depth onto the forward axis
pub fn correct_fisheye(depth: f32, player_angle: f64, ray_angle: f64) -> f32 {
    (depth as f64 * (player_angle - ray_angle).cos()) as f32
}
