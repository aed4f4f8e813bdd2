use std::net::SocketAddr;

use clap::Parser;

use quiz_server::{config::Config, Store};

fn init_logging(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match config.log_config {
        Some(ref path) => log4rs::init_file(path, Default::default())
            .map_err(|err| format!("can't load log config {}: {}", path.display(), err))?,
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(&config)?;

    tokio::fs::create_dir_all(&config.data_dir).await?;
    let store = Store::new(&config.data_dir);
    log::info!("storing quizzes in {}", store.root().display());

    let addr = SocketAddr::new(config.host, config.port);
    log::info!("listening on {}", addr);
    warp::serve(quiz_server::routes(store)).run(addr).await;

    Ok(())
}
