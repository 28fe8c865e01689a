use std::panic;
use std::process::ExitCode;

use clap::Parser;

use rulefuse::cli::{Cli, init_tracing, run};

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = payload
            .downcast_ref::<&str>()
            .is_some_and(|s| s.contains("Broken pipe"))
            || payload
                .downcast_ref::<String>()
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

#[tokio::main]
async fn main() -> ExitCode {
    install_broken_pipe_handler();

    let cli = Cli::parse();
    init_tracing(cli.effective_log_level());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rulefuse: error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
