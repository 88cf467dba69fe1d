//! moveboxtracker CLI
//!
//! Command-line interface for tracking boxes through a household move.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;
mod terminal;

use clap::Parser;

use movebox_db::UiCallback;

use cli_types::{Cli, Commands, ConfigAction};
use commands::AppContext;
use error::CliError;
use terminal::TerminalUi;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        TerminalUi.error(&format!("cannot start logging: {e}"), None);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        TerminalUi.error(&e.to_string(), e.context());
        std::process::exit(1);
    }
}

fn build_context(data_home: Option<std::path::PathBuf>) -> Result<AppContext, CliError> {
    let settings_path = settings::settings_path();
    let settings = settings::load_settings(&settings_path)
        .map_err(|e| CliError::config(e.to_string()))?;
    let (data_home, data_home_source) =
        settings::resolve_data_home(data_home, settings::env_data_home(), &settings);
    log::debug!("Data home {} ({})", data_home.display(), data_home_source);
    Ok(AppContext {
        settings,
        settings_path,
        data_home,
        data_home_source,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = build_context(cli.data_home)?;

    match cli.command {
        Commands::Init {
            db,
            user,
            title,
            found,
        } => commands::init::run_init(&ctx, &db, user, title, found),
        Commands::Db {
            db,
            table,
            op,
            args,
        } => commands::record::run_record(&ctx, &db, table, op, &args),
        Commands::List { db, table } => commands::list::run_list(&ctx, &db, table),
        Commands::Commit { db, batch_id } => commands::commit::run_commit(&ctx, &db, batch_id),
        Commands::Label {
            db,
            ids,
            label_type,
        } => commands::label::run_label(&ctx, &db, &ids, label_type),
        Commands::Sign { db, room_id } => commands::label::run_sign(&ctx, &db, room_id),
        Commands::Dump { db } => commands::dump::run_dump(&ctx, &db),
        Commands::Fields { table } => {
            commands::list::run_fields(table);
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&ctx);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path(&ctx);
                Ok(())
            }
            ConfigAction::SetDataHome { path } => {
                commands::config::run_config_set_data_home(&ctx, &path)
            }
        },
    }
}
