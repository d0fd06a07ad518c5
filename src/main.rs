use anyhow::Context;
use clap::Parser;
use log::debug;

use rust_todo_app::cli::{self, Cli, Command};
use rust_todo_app::{config, logging, FileStore, TodoStore};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let _logger = logging::init(args.verbose).context("starting logger")?;

    let dir = config::data_dir(args.data_dir);
    debug!("using data directory {}", dir.display());

    let mut store = TodoStore::open(FileStore::new(&dir))
        .with_context(|| format!("opening projects in {}", dir.display()))?;

    cli::run(&mut store, args.command.unwrap_or(Command::Projects))
}
