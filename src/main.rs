use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::Notify;

use devserve::config::{Cli, Config};
use devserve::logger;
use devserve::server::{signal, Server};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            logger::log_startup_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_startup_failure(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> std::io::Result<()> {
    let server = Server::bind(config)?;

    let shutdown = Arc::new(Notify::new());
    signal::spawn_handler(Arc::clone(&shutdown));

    server.serve(shutdown).await;
    Ok(())
}
