use clap::Parser;

use glspin::config::{ConfigLoader, DemoConfig};
use glspin::DemoScene;

mod app;
mod args;
mod logging;
mod shaders;

use app::{App, AppError};
use args::Args;

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    logging::init_logging(args.log_level());

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = match &args.config {
        Some(path) => {
            let config = ConfigLoader::load_from_path(path)?;
            log::info!("Read configuration from {:?}", path);
            config
        }
        None => DemoConfig::default(),
    };

    args.apply(&mut config);
    config.validate()?;

    if args.print_config {
        println!("{}", config_json(&config)?);
        return Ok(());
    }

    let scene = DemoScene::new(args.demo.into());
    let app = App::new(scene, &config)?;

    app.run();
}

fn config_json(config: &DemoConfig) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(config)?)
}
