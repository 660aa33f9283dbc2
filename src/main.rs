use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use indoc::indoc;

use surface_wm::drivers::{ConsoleInputDriver, ConsoleOutputDriver, InputDriver};
use surface_wm::event_loop::{ControlFlow, EventLoop};
use surface_wm::geometry::Rect;
use surface_wm::term::{CellMeasurer, TermSurface, map_mouse_event, scale_event};
use surface_wm::window::Window;
use surface_wm::{EventRouter, Taskbar, Theme, UiError, WindowManager};

/// Interactive demo: overlapping control windows over a pannable surface.
#[derive(Parser, Debug)]
#[command(name = "surface-wm", version, about)]
struct Args {
    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Viewport units per terminal column.
    #[arg(long, default_value_t = 4.0)]
    scale_x: f32,

    /// Viewport units per terminal row.
    #[arg(long, default_value_t = 8.0)]
    scale_y: f32,
}

/// Domain state the widgets bind against. The UI never owns any of this;
/// every control reads and writes through closures over this cell.
#[derive(Debug)]
struct DemoState {
    gravity: f32,
    particles: f32,
    paused: bool,
    trails: bool,
    mixer: [[f32; 3]; 3],
    camera: (f32, f32),
    zoom: f32,
    resets: u32,
}

impl DemoState {
    fn new() -> Self {
        Self {
            gravity: 9.8,
            particles: 500.0,
            paused: false,
            trails: true,
            mixer: [[0.0; 3]; 3],
            camera: (0.0, 0.0),
            zoom: 1.0,
            resets: 0,
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    surface_wm::logging::init_default();

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;

    let mut event_loop = EventLoop::new(
        ConsoleInputDriver::new(),
        Duration::from_millis(args.tick_ms),
    );
    event_loop.driver().set_mouse_capture(true)?;

    let result = run(&mut event_loop, &mut output, args.scale_x, args.scale_y);

    output.exit()?;
    result
}

fn run(
    event_loop: &mut EventLoop<ConsoleInputDriver>,
    output: &mut ConsoleOutputDriver,
    scale_x: f32,
    scale_y: f32,
) -> io::Result<()> {
    let state = Rc::new(RefCell::new(DemoState::new()));
    let theme = Theme::default();
    let measurer = CellMeasurer { scale_x };

    let (cols, rows) = crossterm::terminal::size()?;
    let viewport = Rect::new(0.0, 0.0, cols as f32 * scale_x, rows as f32 * scale_y);
    let mut wm = WindowManager::new(viewport);
    let mut taskbar = Taskbar::new();
    let mut router = EventRouter::new();

    {
        let camera = state.clone();
        router.set_pan_hook(Box::new(move |dx, dy| {
            let mut state = camera.borrow_mut();
            state.camera.0 += dx;
            state.camera.1 += dy;
        }));
        let zoomed = state.clone();
        router.set_zoom_hook(Box::new(move |_, _, delta| {
            let mut state = zoomed.borrow_mut();
            state.zoom = (state.zoom - delta / 100.0).clamp(0.25, 4.0);
        }));
    }

    let controls = wm.insert(build_controls_window(&state));
    let mixer = wm.insert(build_mixer_window(&state));
    let about = wm.insert(build_about_window(&state));

    taskbar.add_section("simulation");
    taskbar.add_window_with_external_id(controls, "controls", "demo:controls");
    taskbar.add_window(mixer, "mixer");
    taskbar.add_section("help");
    taskbar.add_window(about, "about");

    event_loop.run(|_, event| {
        match event {
            None => {
                router.tick(&mut wm, &measurer, &theme);
                output.draw(|frame| {
                    let mut surface =
                        TermSurface::with_scale(frame.buffer_mut(), scale_x, scale_y);
                    let viewport = surface.unit_viewport();
                    wm.draw(&mut surface, &theme);
                    taskbar.draw(&mut surface, &wm, &theme, viewport);
                })?;
            }
            Some(Event::Key(key)) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(ControlFlow::Quit),
                KeyCode::Char('c') => {
                    taskbar.restore_by_external_id(&mut wm, "demo:controls");
                }
                _ => {}
            },
            Some(Event::Mouse(mouse)) => {
                if let Some(raw) = map_mouse_event(mouse) {
                    let event = scale_event(raw, scale_x, scale_y);
                    router.handle(event, &mut taskbar, &mut wm);
                }
            }
            Some(Event::Resize(cols, rows)) => {
                wm.set_viewport(Rect::new(
                    0.0,
                    0.0,
                    cols as f32 * scale_x,
                    rows as f32 * scale_y,
                ));
            }
            Some(_) => {}
        }
        Ok(ControlFlow::Continue)
    })
}

fn build_controls_window(state: &Rc<RefCell<DemoState>>) -> Window {
    let mut window = Window::new("Simulation").with_tag("controls").at(40.0, 30.0);

    window.add_section("physics", None);
    {
        let get = state.clone();
        let set = state.clone();
        window.add_slider(
            "gravity",
            Box::new(move || get.borrow().gravity),
            Box::new(move |v| {
                set.borrow_mut().gravity = v;
                Ok(())
            }),
            0.0,
            20.0,
            0.1,
        );
    }
    {
        let get = state.clone();
        let set = state.clone();
        window.add_slider(
            "particles",
            Box::new(move || get.borrow().particles),
            Box::new(move |v| {
                set.borrow_mut().particles = v;
                Ok(())
            }),
            0.0,
            2000.0,
            50.0,
        );
    }

    window.add_section("playback", None);
    {
        let get = state.clone();
        let set = state.clone();
        window.add_toggle(
            "paused",
            Box::new(move || get.borrow().paused),
            Box::new(move |v| {
                set.borrow_mut().paused = v;
                Ok(())
            }),
        );
    }
    {
        let get = state.clone();
        let set = state.clone();
        window.add_toggle(
            "trails",
            Box::new(move || get.borrow().trails),
            Box::new(move |v| {
                set.borrow_mut().trails = v;
                Ok(())
            }),
        );
    }
    {
        let reset = state.clone();
        window.add_button(
            "reset",
            Box::new(move || {
                let mut state = reset.borrow_mut();
                if state.paused {
                    return Err(UiError::callback("reset", "simulation is paused"));
                }
                state.gravity = 9.8;
                state.particles = 500.0;
                state.mixer = [[0.0; 3]; 3];
                state.resets += 1;
                Ok(())
            }),
        );
    }
    {
        let status = state.clone();
        window.add_dynamic_text(Box::new(move || {
            let state = status.borrow();
            format!(
                "cam ({:.0}, {:.0})  zoom {:.2}  resets {}",
                state.camera.0, state.camera.1, state.zoom, state.resets
            )
        }));
    }
    window
}

fn build_mixer_window(state: &Rc<RefCell<DemoState>>) -> Window {
    let mut window = Window::new("Mixer").with_tag("mixer").at(360.0, 60.0);
    window.add_section("coupling", None);
    let get = state.clone();
    let set = state.clone();
    window.add_matrix(
        3,
        3,
        Box::new(move |row, col| get.borrow().mixer[row][col]),
        Box::new(move |row, col, value| {
            set.borrow_mut().mixer[row][col] = value;
            Ok(())
        }),
        -1.0,
        1.0,
    );
    window.add_text("drag a cell vertically to retune it");
    window
}

fn build_about_window(state: &Rc<RefCell<DemoState>>) -> Window {
    let mut window = Window::new("About").with_tag("about").at(120.0, 260.0);
    window.add_text(indoc! {"
        Drag headers to move windows, corners to resize.
        Drag empty surface to pan; wheel over it to zoom.
        Header buttons: HUD mode, maximize, minimize, close.
        Press q to quit, c to restore the controls window.
    "});
    window.add_section("preview", None);
    window.add_content("demo:preview", 60.0);
    {
        let close_state = state.clone();
        window.set_close_hook(Box::new(move || {
            tracing::info!(resets = close_state.borrow().resets, "about window closed");
        }));
    }
    window
}
