use aetheric_snake::EngineBuilder;
use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Snake starting...");

    if let Err(e) = EngineBuilder::new().build().run() {
        error!("Fatal: {}", e);
        std::process::exit(1);
    }
}
