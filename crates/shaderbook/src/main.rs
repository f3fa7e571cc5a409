mod cli;
mod paths;
mod plan;
mod run;
mod source;

use anyhow::Result;
use cli::Command;
use run::Session;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    let config_override = cli.config.as_deref();
    let session = Session::load(config_override)?;
    match cli.command {
        Some(Command::Run(args)) => run::run(session, args),
        Some(Command::List(args)) => run::list(session, args),
        Some(Command::Show(args)) => run::show(session, args),
        Some(Command::Check(args)) => run::check(session, args),
        Some(Command::Export(args)) => run::export(session, args),
        Some(Command::Where) => run::show_paths(session, config_override),
        None => run::run(session, cli.run),
    }
}
