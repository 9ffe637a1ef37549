use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use glspin::config::DemoConfig;
use glspin::Demo;

#[derive(Debug, Parser)]
pub struct Args {
    /// Demo to run
    #[arg(value_enum, default_value_t = DemoArg::Spin)]
    pub demo: DemoArg,
    /// Path to JSON5 configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Window width
    #[arg(long)]
    pub width: Option<u32>,
    /// Window height
    #[arg(long)]
    pub height: Option<u32>,
    /// Rotation speed in degrees per second
    #[arg(short, long, allow_negative_numbers = true)]
    pub speed: Option<f32>,
    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
    /// Log more, same as RUST_LOG=debug
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Command line values take precedence over the configuration file.
    pub fn apply(&self, config: &mut DemoConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }

        if let Some(height) = self.height {
            config.height = height;
        }

        if let Some(speed) = self.speed {
            config.angular_velocity = Some(speed);
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum DemoArg {
    Triangles,
    Spin,
    Cube,
    Shape,
}

impl From<DemoArg> for Demo {
    fn from(d: DemoArg) -> Self {
        match d {
            DemoArg::Triangles => Self::Triangles,
            DemoArg::Spin => Self::Spin,
            DemoArg::Cube => Self::Cube,
            DemoArg::Shape => Self::Shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["glspin"]).unwrap();

        assert!(matches!(args.demo, DemoArg::Spin));
        assert!(args.config.is_none());
        assert!(!args.print_config);
        assert_eq!(args.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn overrides_config() {
        let args = Args::try_parse_from([
            "glspin", "cube", "--width", "640", "--speed", "-30", "-v",
        ])
        .unwrap();

        assert_eq!(Demo::from(args.demo), Demo::Cube);

        let mut config = DemoConfig::default();
        args.apply(&mut config);

        assert_eq!(config.width, 640);
        assert_eq!(config.height, 400);
        assert_eq!(config.angular_velocity, Some(-30.0));
        assert_eq!(args.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn rejects_unknown_demo() {
        assert!(Args::try_parse_from(["glspin", "teapot"]).is_err());
    }
}
