use raycaster::input::{normalize, Axis};
use raycaster::{Config, GridModel, Session};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use surface::Surface;

mod surface;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

/// keyboard stand-in for the controller sticks
fn key_axis(key: Keycode) -> Option<(Axis, f32)> {
    match key {
        Keycode::W => Some((Axis::MoveY, -1.)),
        Keycode::S => Some((Axis::MoveY, 1.)),
        Keycode::A => Some((Axis::MoveX, -1.)),
        Keycode::D => Some((Axis::MoveX, 1.)),
        Keycode::Left => Some((Axis::Turn, -1.)),
        Keycode::Right => Some((Axis::Turn, 1.)),
        _ => None,
    }
}

/// combined value of every held key that drives `axis`
fn held_axis(keys: &HashSet<Keycode>, axis: Axis) -> f32 {
    keys.iter()
        .filter_map(|k| key_axis(*k))
        .filter(|(key_axis, _)| *key_axis == axis)
        .map(|(_, value)| value)
        .sum::<f32>()
        .clamp(-1., 1.)
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("RAYCAST_LOG");

    let config = Config::default().with_env();
    let grid = match std::env::args().nth(1) {
        Some(path) => GridModel::load(path)?,
        None => {
            log::info!("using built-in map");
            GridModel::parse(raycaster::grid::DEFAULT_MAP)?
        }
    };
    let map_extent = grid.size() as f32 * grid.tile_size();
    if map_extent > config.viewport_size() as f32 {
        log::warn!(
            "map is {map_extent} units wide, the map view only shows {}",
            config.viewport_size()
        );
    }

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let mut window = video
        .window("Raycasting", config.screen_width, config.screen_height)
        .position_centered()
        .build()?;
    window.set_resizable(false);
    log::info!("creating canvas");
    let mut surface = Surface::new(window.into_canvas().build()?);

    // joysticks close when dropped, keep them for the whole session
    log::info!("initializing joysticks");
    let joystick_ctx = sdl_ctx.joystick().ah()?;
    let mut joysticks = vec![];
    for idx in 0..joystick_ctx.num_joysticks().ah()? {
        let joystick = joystick_ctx.open(idx)?;
        log::info!("detected joystick {}", joystick.name());
        joysticks.push(joystick);
    }
    if joysticks.is_empty() {
        log::warn!("no joystick found, falling back to keyboard");
    }

    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    log::info!("initializing session");
    let mut session = Session::new(config, grid);
    let delta = Duration::from_millis(1_000 / session.config().target_fps);
    let mut keys = HashSet::new();

    'main_loop: loop {
        let prev = Instant::now();

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'main_loop,
                Event::JoyAxisMotion {
                    axis_idx, value, ..
                } => session.axis_id(axis_idx, normalize(value)),
                Event::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => {
                    if let Some((axis, _)) = key_axis(k) {
                        keys.insert(k);
                        session.axis(axis, held_axis(&keys, axis));
                    }
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    if let Some((axis, _)) = key_axis(k) {
                        keys.remove(&k);
                        session.axis(axis, held_axis(&keys, axis));
                    }
                }
                _ => {}
            }
        }

        session.tick();

        // draw frame
        if let Err(err) = surface.draw(&session.frame()) {
            log::error!("error while drawing frame: {err}");
            return Err(err);
        }
        surface.present();

        let diff = prev.elapsed();
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    log::info!("shutting down");
    drop(joysticks);

    Ok(())
}
