//! Viewer application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use gilrs::Gilrs;
use modesense_input::{
    ForegroundConfig, GamepadKey, InputModeSubsystem, KeyCode, MouseAxis, MouseButton,
    TrackerConfig,
};
use modesense_prompts::{DevicePreference, InputBinding, InputBindings, InputPrompts};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

const PLAYER: usize = 0;
const FRAME_TIME: Duration = Duration::from_millis(16);

fn demo_bindings() -> InputBindings {
    InputBindings::builder()
        .action("Jump", KeyCode::Space)
        .action("Jump", MouseButton::Right)
        .action("Jump", GamepadKey::FaceButtonBottom)
        .axis("MoveForward", KeyCode::KeyW, 1.0)
        .axis("MoveForward", KeyCode::KeyS, -1.0)
        .axis("MoveForward", MouseAxis::Y, 1.0)
        .axis("MoveForward", GamepadKey::LeftY, 1.0)
        .build()
}

pub struct Viewer {
    window: Option<Arc<Window>>,
    input: InputModeSubsystem,
    gilrs: Option<Gilrs>,
    prompts: InputPrompts<InputBindings, String>,
    title: String,
}

impl Viewer {
    pub fn new() -> anyhow::Result<Self> {
        let mut input =
            InputModeSubsystem::new(TrackerConfig::default(), ForegroundConfig::default())?;
        input.tracker_mut().on_mode_changed(|player, mode| {
            info!(player, %mode, "input mode changed");
        });
        input.tracker_mut().on_button_mode_changed(|player, mode| {
            info!(player, %mode, "button input mode changed");
        });
        input.foreground_mut().on_foreground_changed(|foreground| {
            if foreground {
                info!("Window in foreground, detection resumed");
            } else {
                info!("Window in background, detection paused");
            }
        });

        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(e) => {
                warn!("Failed to initialize gamepad support: {e}");
                None
            }
        };

        Ok(Self {
            window: None,
            input,
            gilrs,
            prompts: InputPrompts::new(demo_bindings()),
            title: String::new(),
        })
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attrs = Window::default_attributes()
            .with_title("modesense")
            .with_inner_size(PhysicalSize::new(960, 540));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let cursor_window = Arc::clone(&window);
        self.input.set_cursor_suppression(move |suppressed: bool| {
            cursor_window.set_cursor_visible(!suppressed);
        });

        self.window = Some(window);
        Ok(())
    }

    fn prompt_label(&self, binding: &InputBinding) -> String {
        self.prompts
            .key_for(binding, DevicePreference::Auto, PLAYER, self.input.tracker())
            .map_or_else(|| "-".to_string(), |key| key.to_string())
    }

    fn refresh_title(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let title = format!(
            "modesense | {} | Jump: {} | MoveForward: {}",
            self.input.last_mode(PLAYER),
            self.prompt_label(&InputBinding::action("Jump")),
            self.prompt_label(&InputBinding::axis("MoveForward")),
        );
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            error!("Failed to create window: {e}");
            event_loop.exit();
            return;
        }
        info!("Viewer ready");
        self.refresh_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.input.process_window_event(&event) {
            return;
        }
        if matches!(event, WindowEvent::CloseRequested) {
            info!("Close requested");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(gilrs) = &mut self.gilrs {
            while let Some(event) = gilrs.next_event() {
                self.input.process_gamepad_event(&event);
            }
        }
        let now = Instant::now();
        self.input.poll_foreground(now);
        self.refresh_title();
        event_loop.set_control_flow(ControlFlow::WaitUntil(now + FRAME_TIME));
    }
}
