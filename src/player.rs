use glam::{DVec2, Vec2};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PlayerState {
    pub position: Vec2,
    /// heading in radians, never wrapped, so kept in f64
    pub angle: f64,
}

impl PlayerState {
    pub fn new(position: Vec2, angle: f64) -> Self {
        Self { position, angle }
    }
}

/// unit vector a ray at `angle` travels along: angle 0 faces +y, x shrinks with the sine
pub fn direction(angle: f64) -> Vec2 {
    DVec2::new(-angle.sin(), angle.cos()).as_vec2()
}

/// Turns control input into player motion.
///
/// Movement is rotated by a heading offset that starts at
/// `reference_angle - angle` and then receives the same turn deltas as the
/// player angle. The two stay in lock-step but are not equal, so the
/// movement frame is the player angle shifted by a constant. This is kept
/// as-is; the controls have always behaved this way.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Motion {
    heading_offset: f64,
}

impl Motion {
    pub fn new(reference_angle: f64, player: &PlayerState) -> Self {
        Self {
            heading_offset: reference_angle - player.angle,
        }
    }

    pub fn heading_offset(&self) -> f64 {
        self.heading_offset
    }

    /// advance one tick: turn by `turn`, then move by `control` rotated into world space
    pub fn integrate(&mut self, player: &mut PlayerState, control: Vec2, turn: f64) {
        player.angle += turn;
        self.heading_offset += turn;

        player.position += rotate(control, self.heading_offset);
    }
}

/// standard 2D rotation by `radians`
pub fn rotate(v: Vec2, radians: f64) -> Vec2 {
    DVec2::from_angle(radians).rotate(v.as_dvec2()).as_vec2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn rotation_matches_matrix() {
        let v = Vec2::new(0.3, -0.8);
        let theta = 0.77_f64;
        let (x, y) = (v.x as f64, v.y as f64);
        let expected = Vec2::new(
            (x * theta.cos() - y * theta.sin()) as f32,
            (x * theta.sin() + y * theta.cos()) as f32,
        );
        assert!(close(rotate(v, theta), expected));
        assert!(close(rotate(Vec2::X, FRAC_PI_2), Vec2::Y));
    }

    #[test]
    fn offset_starts_from_reference() {
        let player = PlayerState::new(Vec2::ZERO, PI);
        assert_eq!(Motion::new(PI, &player).heading_offset(), 0.);

        let player = PlayerState::new(Vec2::ZERO, 1.);
        assert_eq!(Motion::new(PI, &player).heading_offset(), PI - 1.);
    }

    #[test]
    fn unrotated_control_moves_directly() {
        let mut player = PlayerState::new(Vec2::new(240., 240.), PI);
        let mut motion = Motion::new(PI, &player);

        motion.integrate(&mut player, Vec2::new(0., -1.), 0.);
        assert!(close(player.position, Vec2::new(240., 239.)));
        // stick up walks the way the player faces at spawn
        assert!(close(direction(player.angle), Vec2::new(0., -1.)));
    }

    #[test]
    fn angle_and_offset_move_in_lock_step() {
        let mut player = PlayerState::new(Vec2::ZERO, 0.5);
        let mut motion = Motion::new(PI, &player);
        let gap = motion.heading_offset() - player.angle;

        for turn in [0.1, 0.1, -0.05, 0., 0.3] {
            motion.integrate(&mut player, Vec2::ZERO, turn);
            assert!((motion.heading_offset() - player.angle - gap).abs() < 1e-9);
        }
        assert!((player.angle - 0.95).abs() < 1e-9);
        assert_eq!(player.position, Vec2::ZERO);
    }

    #[test]
    fn hour_of_turning_keeps_lock_step() {
        // one hour at 30 ticks per second with the stick held fully right
        let ticks = 30 * 3600;
        let turn = (1.0_f32 * 0.1) as f64;
        let mut player = PlayerState::new(Vec2::ZERO, PI);
        let mut motion = Motion::new(PI, &player);

        for _ in 0..ticks {
            motion.integrate(&mut player, Vec2::ZERO, turn);
        }

        let expected = PI + ticks as f64 * turn;
        assert!((player.angle - expected).abs() < 1e-6);
        assert!((motion.heading_offset() - player.angle + PI).abs() < 1e-6);
    }

    #[test]
    fn movement_uses_offset_not_angle() {
        // documented behaviour: with a start angle away from the reference the
        // control vector is rotated by the offset, not by the facing angle
        let mut player = PlayerState::new(Vec2::ZERO, 0.);
        let mut motion = Motion::new(PI, &player);

        motion.integrate(&mut player, Vec2::new(1., 0.), FRAC_PI_2);
        let theta = PI + FRAC_PI_2;
        assert!(close(
            player.position,
            Vec2::new(theta.cos() as f32, theta.sin() as f32)
        ));
        assert_eq!(player.angle, FRAC_PI_2);
    }

    #[test]
    fn angle_is_never_wrapped() {
        let mut player = PlayerState::new(Vec2::ZERO, PI);
        let mut motion = Motion::new(PI, &player);
        for _ in 0..200 {
            motion.integrate(&mut player, Vec2::ZERO, 0.1);
        }
        assert!(player.angle > 2. * PI * 3.);
    }
}
