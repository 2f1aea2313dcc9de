//! Demo viewer for modesense.
//!
//! Opens a window and shows, in its title, the prompt for a jump action and
//! a move axis for player 0. Press keys, click, move the mouse or use a
//! gamepad to watch the prompts switch.

mod app;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use crate::app::Viewer;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let event_loop = EventLoop::new()?;

    let mut viewer = Viewer::new()?;
    event_loop.run_app(&mut viewer)?;
    Ok(())
}
