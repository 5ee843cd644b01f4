use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

use wave_core::{load_triangle_mesh, App, Config, FixedTimestep, MeshStore, Simulation};

fn main() -> Result<(), winit::error::EventLoopError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    let store = match load_triangle_mesh(&config.mesh, &config.resources).and_then(MeshStore::new) {
        Ok(store) => store,
        Err(error) => {
            log::error!("Failed to load mesh: {error}");
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(
        Simulation::new(store),
        FixedTimestep::new(config.tick_period()),
    );
    event_loop.run_app(&mut app)
}
