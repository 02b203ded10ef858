use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use keychord::cli::CliArgs;

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    keychord::tracing::init();

    if args.log_path {
        match keychord::config_paths::log_file() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No config directory available"),
        }
        return Ok(());
    }

    let settings = args.into_settings().map_err(anyhow::Error::msg)?;
    tracing::info!(
        "Starting with preset {:?}, chord timeout {}ms",
        settings.selected_preset,
        settings.chord_timeout_ms
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&settings)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
