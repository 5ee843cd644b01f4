use std::path::PathBuf;

use clap::Parser;
use web_time::Duration;

/// Animated wave deformation of a triangle mesh.
#[derive(Parser, Debug, Clone)]
#[command(name = "wave", version, about)]
pub struct Config {
    /// Raw triangle mesh to load, tried as given and then inside the resource directory.
    #[arg(short, long, default_value = "stanford_dragon_v40k_f80k.raw")]
    pub mesh: PathBuf,

    /// Directory searched when the mesh path does not exist as given.
    #[arg(short, long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/"))]
    pub resources: PathBuf,

    /// Simulation tick period in milliseconds.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
}

impl Config {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_dragon() {
        let config = Config::parse_from(["wave"]);
        assert_eq!(config.mesh, PathBuf::from("stanford_dragon_v40k_f80k.raw"));
        assert!(config.resources.ends_with("resources"));
        assert_eq!(config.tick_period(), Duration::from_millis(15));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::parse_from(["wave", "--mesh", "bunny.raw", "-r", "/tmp", "--tick-ms", "30"]);
        assert_eq!(config.mesh, PathBuf::from("bunny.raw"));
        assert_eq!(config.resources, PathBuf::from("/tmp"));
        assert_eq!(config.tick_ms, 30);
    }

    #[test]
    fn zero_tick_is_rejected() {
        assert!(Config::try_parse_from(["wave", "--tick-ms", "0"]).is_err());
    }
}
