use cargo_autorun::{forwarded_args, run, CommandFacility, Config, DEFAULT_LOG_FILTER};
use colored::Colorize;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::from_env();
    init_logging(&config);

    // cargo sets $CARGO for the subcommands it runs
    let cargo_subcommand = std::env::var_os("CARGO").is_some();
    let args = forwarded_args(std::env::args_os(), cargo_subcommand);
    let mut facility = CommandFacility::new(&config);
    match run(&args, &mut std::io::stdout().lock(), &mut facility) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("{} {error:#}", "error:".bright_red());
            std::process::exit(1);
        }
    }
}

// Diagnostics go to stderr; stdout belongs to the echo line and the runner.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
