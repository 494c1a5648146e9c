use clap::Parser;
use winit::event_loop::EventLoop;

use obj_viewer::cli::Cli;
use obj_viewer::{App, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ViewerConfig::resolve(&cli)?;
    log::debug!("Resolved config: {:?}", config);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    log::info!("Controls: drag to orbit, right drag to pan, scroll to zoom, T toggles mode, Escape quits");
    event_loop.run_app(&mut app)?;

    Ok(())
}
