use glam::Vec2;

/// Logical axes fed by the controller (or the keyboard fallback).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    /// left stick, horizontal
    MoveX,
    /// left stick, vertical
    MoveY,
    /// right stick, horizontal
    Turn,
}

impl Axis {
    /// map a raw axis id, anything past the third axis is ignored
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::MoveX),
            1 => Some(Self::MoveY),
            2 => Some(Self::Turn),
            _ => None,
        }
    }
}

/// normalise a raw joystick reading into [-1, 1]
pub fn normalize(raw: i16) -> f32 {
    (raw as f32 / i16::MAX as f32).clamp(-1., 1.)
}

/// zero out readings strictly inside (-tol, tol)
pub fn dead_zone(value: f32, tol: f32) -> f32 {
    if value <= -tol || value >= tol {
        value
    } else {
        0.
    }
}

/// Last filtered value of every axis. Values persist until the next event
/// on the same axis, so a held stick keeps acting every tick.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct InputState {
    control: Vec2,
    turn: f32,
    tol: f32,
    sensitivity: f32,
}

impl InputState {
    pub fn new(tol: f32, sensitivity: f32) -> Self {
        Self {
            control: Vec2::ZERO,
            turn: 0.,
            tol,
            sensitivity,
        }
    }

    pub fn axis(&mut self, axis: Axis, value: f32) {
        let value = dead_zone(value, self.tol);
        match axis {
            Axis::MoveX => self.control.x = value,
            Axis::MoveY => self.control.y = value,
            Axis::Turn => self.turn = value * self.sensitivity,
        }
    }

    /// raw axis event, unknown ids are dropped
    pub fn axis_id(&mut self, id: u8, value: f32) {
        match Axis::from_id(id) {
            Some(axis) => self.axis(axis, value),
            None => log::trace!("ignoring motion on axis {id}"),
        }
    }

    pub fn control(&self) -> Vec2 {
        self.control
    }

    /// rotation delta per tick
    pub fn turn(&self) -> f32 {
        self.turn
    }
}
