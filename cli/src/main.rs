mod app;
mod args;
mod config;
mod infrastructure;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::args::{Cli, Command};

const LOG_ENV: &str = "SINTONIA_LOG";

fn init_tracing() {
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing();

  let app = App::bootstrap(&cli)?;
  match cli.command {
    Command::Build(args) => app.build(args).await,
    Command::Analyze(args) => app.analyze(args).await,
    Command::Report => app.report(),
    Command::Where => {
      app.print_locations();
      Ok(())
    }
  }
}
