use crate::caster::RayCaster;
use crate::config::Config;
use crate::grid::GridModel;
use crate::input::{Axis, InputState};
use crate::player::{Motion, PlayerState};
use crate::projector::{DrawCommand, Projector};
use crate::ray::RayResult;
use glam::Vec2;

/// Everything that lives for one run: map, player, held input and the
/// pipeline pieces built from the config.
pub struct Session {
    config: Config,
    grid: GridModel,
    player: PlayerState,
    motion: Motion,
    input: InputState,
    caster: RayCaster,
    projector: Projector,
}

impl Session {
    pub fn new(config: Config, grid: GridModel) -> Self {
        let spawn = grid.spawn().unwrap_or_else(|| {
            let centre = config.viewport_size() as f32 / 2.;
            Vec2::splat(centre)
        });
        let player = PlayerState::new(spawn, config.start_angle);
        log::debug!("spawning player at {spawn} facing {}", player.angle);

        Self {
            motion: Motion::new(config.reference_angle, &player),
            input: InputState::new(config.dead_zone, config.rotation_sensitivity),
            caster: RayCaster::from_config(&config),
            projector: Projector::from_config(&config),
            player,
            grid,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn axis(&mut self, axis: Axis, value: f32) {
        self.input.axis(axis, value);
    }

    pub fn axis_id(&mut self, id: u8, value: f32) {
        self.input.axis_id(id, value);
    }

    /// integrate held input once
    pub fn tick(&mut self) {
        self.motion.integrate(
            &mut self.player,
            self.input.control(),
            self.input.turn() as f64,
        );
    }

    pub fn cast(&self) -> Vec<RayResult> {
        if self.config.parallel {
            self.caster.cast_par(&self.player, &self.grid)
        } else {
            self.caster.cast(&self.player, &self.grid)
        }
    }

    /// draw commands for the current state, in paint order
    pub fn frame(&self) -> Vec<DrawCommand> {
        let rays = self.cast();
        log::trace!(
            "cast {} rays, {} hit",
            rays.len(),
            rays.iter().filter(|ray| ray.hit.is_some()).count()
        );
        self.projector.frame(&self.grid, &self.player, &rays)
    }
}
