/// Terminal-based ASCII viewer for orbview models
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use orbview_core::{
    frame_uniforms, Command, ModelLibrary, RotationState, Setting, ViewerControls, ViewerSettings,
};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Pixel size of one terminal cell, used to turn mouse cells into drag distances
const CELL_WIDTH_PX: f32 = 8.0;
const CELL_HEIGHT_PX: f32 = 16.0;
/// Wheel delta reported for one scroll notch or one +/- press
const WHEEL_NOTCH: f32 = 120.0;
/// Degrees per frame while auto-spin is on
const SPIN_STEP: f32 = 1.0;
const FOV_STEP: f32 = 5.0;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    library: ModelLibrary,
    current: usize,
    controls: ViewerControls,
    settings: ViewerSettings,
    renderer: AsciiRenderer,
    auto_spin: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(library: ModelLibrary) -> io::Result<Self> {
        if library.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "no models to display"));
        }
        let (width, height) = terminal::size()?;

        Ok(Self {
            library,
            current: 0,
            controls: ViewerControls::new(),
            settings: ViewerSettings::default(),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            auto_spin: false,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Start on the model with the given name
    pub fn with_model(mut self, name: &str) -> io::Result<Self> {
        let (index, _) = self
            .library
            .find(name)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?;
        self.select_model(index);
        Ok(self)
    }

    pub fn select_model(&mut self, index: usize) {
        if let Some(model) = self.library.get(index) {
            log::info!("showing '{}' ({} triangles)", model.name, model.mesh.triangle_count());
            self.current = index;
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.renderer.resize(width as usize, height as usize),
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, modifiers, .. }: KeyEvent) {
        match code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.running = false,
            KeyCode::Char('+') | KeyCode::Char('=') => self.controls.wheel(WHEEL_NOTCH),
            KeyCode::Char('-') => self.controls.wheel(-WHEEL_NOTCH),
            KeyCode::Char('f') => self.nudge(Setting::FieldOfView, -FOV_STEP),
            KeyCode::Char('F') => self.nudge(Setting::FieldOfView, FOV_STEP),
            KeyCode::Char(' ') => self.auto_spin = !self.auto_spin,
            KeyCode::Tab => self.select_model((self.current + 1) % self.library.len()),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.select_model(index);
            }
            other => {
                if let Some(command) = key_command(other) {
                    self.controls.apply(command);
                }
            }
        }
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        let x = column as f32 * CELL_WIDTH_PX;
        let y = row as f32 * CELL_HEIGHT_PX;
        match kind {
            MouseEventKind::Down(MouseButton::Left) => self.controls.mouse_down(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.controls.mouse_up(),
            // no settings panel here, so the drag is never released by position
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                self.controls.mouse_move(x, y, f32::INFINITY)
            }
            MouseEventKind::ScrollUp => self.controls.wheel(WHEEL_NOTCH),
            MouseEventKind::ScrollDown => self.controls.wheel(-WHEEL_NOTCH),
            _ => {}
        }
    }

    fn nudge(&mut self, setting: Setting, delta: f32) {
        let value = self.settings.get(setting) + delta;
        let stored = self.settings.set(setting, value);
        log::debug!("{} = {}", setting.key(), stored);
    }

    fn update(&mut self) {
        if self.auto_spin {
            self.controls.object_rotation.rotate(0.0, SPIN_STEP, 0.0);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let state = self.controls.snapshot(&self.settings, self.renderer.aspect());
        let uniforms = frame_uniforms(&state);

        self.renderer.clear();
        if let Some(model) = self.library.get(self.current) {
            self.renderer.render_mesh(&model.mesh, &uniforms);
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let model = self.library.get(self.current).map(|m| m.name.as_str()).unwrap_or("-");
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                concat!(
                    "orbview | {} | {} | FPS: {:.1} | drag=orbit WASD/arrows=rotate Q/E=light ",
                    "+/-=zoom f/F=fov Tab=model Space=spin Esc=quit"
                ),
                model,
                describe(&state.object_rotation),
                self.fps
            )),
            ResetColor
        )?;
        let panel: Vec<String> = Setting::ALL
            .iter()
            .map(|&s| format!("{}: {:.0}", s.label(), self.settings.get(s)))
            .collect();
        queue!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::DarkYellow),
            Print(panel.join("  ")),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Keyboard bindings shared with the browser viewer
fn key_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::PitchUp),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::PitchDown),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::YawLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::YawRight),
        KeyCode::Char('q') => Some(Command::LightLeft),
        KeyCode::Char('e') => Some(Command::LightRight),
        _ => None,
    }
}

fn describe(rotation: &RotationState) -> String {
    format!("rot {:.0}/{:.0}/{:.0}", rotation.x, rotation.y, rotation.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings_match_browser() {
        assert_eq!(key_command(KeyCode::Char('w')), Command::from_key_code("KeyW"));
        assert_eq!(key_command(KeyCode::Right), Command::from_key_code("ArrowRight"));
        assert_eq!(key_command(KeyCode::Char('q')), Command::from_key_code("KeyQ"));
        assert_eq!(key_command(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_describe_rotation() {
        assert_eq!(describe(&RotationState::new(7.0, -14.0, 0.0)), "rot 7/-14/0");
    }
}
