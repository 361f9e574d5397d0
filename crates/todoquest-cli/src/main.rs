use std::path::PathBuf;

use clap::Parser;
use todoquest_core::{App, Config};

mod shell;

#[derive(Parser)]
#[command(name = "todoquest", version, about = "Gamified to-do list shell")]
struct Cli {
    /// Completions per day needed to advance the streak
    #[arg(long)]
    daily_goal: Option<u32>,
    /// Pomodoro length in minutes
    #[arg(long)]
    pomodoro_min: Option<u32>,
    /// Config file path (defaults to ~/.config/todoquest/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = load_config(&cli).map(|config| App::new(&config));

    match result {
        Ok(app) => {
            if let Err(e) = shell::run(app).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    if let Some(goal) = cli.daily_goal {
        config.daily_goal = goal.max(1);
    }
    if let Some(minutes) = cli.pomodoro_min {
        config.pomodoro_minutes = minutes.max(1);
    }
    Ok(config)
}
