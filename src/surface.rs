use crate::StringToAnyhow;
use glam::Vec2;
use raycaster::{DrawCommand, Rgb};
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

fn color(rgb: Rgb) -> Color {
    Color::RGB(rgb.r, rgb.g, rgb.b)
}

fn point(v: Vec2) -> Point {
    Point::new(v.x as i32, v.y as i32)
}

/// SDL canvas that executes draw commands
pub(crate) struct Surface {
    canvas: Canvas<Window>,
}

impl Surface {
    pub fn new(canvas: Canvas<Window>) -> Self {
        Self { canvas }
    }

    pub fn draw(&mut self, commands: &[DrawCommand]) -> anyhow::Result<()> {
        for command in commands {
            match *command {
                DrawCommand::FillRect { pos, size, color: c } => {
                    if size.x < 1. || size.y < 1. {
                        continue;
                    }
                    self.canvas.set_draw_color(color(c));
                    self.canvas
                        .fill_rect(Rect::new(
                            pos.x as i32,
                            pos.y as i32,
                            size.x as u32,
                            size.y as u32,
                        ))
                        .ah()?;
                }
                DrawCommand::Line { from, to, color: c } => {
                    self.canvas.set_draw_color(color(c));
                    self.canvas.draw_line(point(from), point(to)).ah()?;
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color: c,
                } => {
                    self.canvas.set_draw_color(color(c));
                    self.fill_circle(center, radius)?;
                }
            }
        }

        Ok(())
    }

    /// one horizontal span per scanline
    fn fill_circle(&mut self, center: Vec2, radius: f32) -> anyhow::Result<()> {
        let r = radius as i32;
        for dy in -r..=r {
            let dx = ((r * r - dy * dy) as f32).sqrt() as i32;
            let y = center.y as i32 + dy;
            self.canvas
                .draw_line(
                    Point::new(center.x as i32 - dx, y),
                    Point::new(center.x as i32 + dx, y),
                )
                .ah()?;
        }

        Ok(())
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }
}
