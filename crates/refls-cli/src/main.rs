use clap::Parser;

mod cli;
mod commands;

fn main() {
    tracing_subscriber::fmt::init();
    let cli = cli::Cli::parse();
    std::process::exit(commands::run_command(&cli));
}
