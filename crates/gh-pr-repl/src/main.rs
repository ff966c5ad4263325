use clap::Parser;
use crossterm::style::Stylize;
use std::io;

mod cli;
mod command_id;
mod commands;
mod desktop;
mod halt;
mod keymap;
mod keys;
mod logger;
mod reference;
mod repl;
mod resolver;
#[cfg(test)]
mod testing;

use cli::Cli;
use desktop::SystemDesktop;
use gh_client::GhCliClient;
use gh_pr_repl_config::AppConfig;
use keys::TerminalKeys;
use repl::Repl;

fn main() {
    let cli = Cli::parse();

    // Logging is best effort, the review works without it
    match logger::init() {
        Ok(path) => log::info!("Starting gh-pr-repl, logging to {}", path.display()),
        Err(e) => eprintln!("{}", format!("Logging disabled: {:#}", e).yellow()),
    }

    let config = AppConfig::load().with_overrides(cli.slack_link, cli.show_all);
    log::debug!("Effective config: {:?}", config);

    let client = GhCliClient::new(config.gh_program.clone());
    let desktop = SystemDesktop::new(config.pane_command.clone());

    let mut repl = Repl::new(config, &client, &desktop, TerminalKeys, io::stdout());
    let code = match repl.main(&cli.references) {
        Ok(()) => 0,
        Err(halt) => {
            if let Some(message) = halt.diagnostic() {
                println!("{}", message.yellow());
            }
            halt.exit_code()
        }
    };

    log::info!("Exiting gh-pr-repl with status {}", code);
    std::process::exit(code);
}
