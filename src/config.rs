use std::{net::IpAddr, path::PathBuf};

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "quiz_server", about = "Serve and store quiz definitions")]
pub struct Config {
    #[arg(long, env = "QUIZ_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "QUIZ_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Directory holding one `<id>.json` file per quiz
    #[arg(long, env = "QUIZ_DATA_DIR", default_value = "quizzes")]
    pub data_dir: PathBuf,

    /// log4rs YAML file; without it logging goes through env_logger and RUST_LOG
    #[arg(long, env = "QUIZ_LOG_CONFIG")]
    pub log_config: Option<PathBuf>,
}
