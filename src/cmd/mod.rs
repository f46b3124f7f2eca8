//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`init`], [`validate`], [`health`], or
//! [`rewrite`]. Each handler lives in its own submodule.

pub mod health;
pub mod init;
pub mod rewrite;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::DocgateError;

pub async fn dispatch(cli: Cli) -> Result<(), DocgateError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        Some(Commands::Rewrite(ref args)) => rewrite::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  docgate v{version}: API documentation host\n\n  \
         No command provided. To get started:\n\n    \
         docgate init                      Generate a starter config\n    \
         docgate run                       Serve the docs (auto-detects ./docgate.yaml)\n    \
         docgate run -c docgate.yaml       Start with a specific config file\n    \
         docgate --help                    See all commands and options\n"
    );
}
