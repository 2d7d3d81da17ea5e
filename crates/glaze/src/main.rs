mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "glaze",
    version,
    about = "Adjust the opacity and always-on-top state of the active window with global hotkeys"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daemon (default when no command is given)
    Run,
    /// Create the default configuration file
    Init,
    /// List the fixed hotkeys
    Keys,
}

fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::execute(),
        Commands::Init => commands::init::execute(),
        Commands::Keys => commands::keys::execute(),
    }
}
