mod logging;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use minicore_database::prelude::*;

/// Wires the configured tables on in-memory connections and runs a short session on them.
#[derive(Parser)]
#[command(name = "minicore-example", version)]
struct Cli {
    /// JSON file declaring connections and tables
    #[arg(long, short = 'c', env = "MINICORE_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", env = "MINICORE_LOG")]
    log_level: LevelFilter,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = logging::init(cli.log_level) {
        eprintln!("failed to install logger: {err}");
    }

    if let Err(err) = run(cli) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };

    let mut manager = RepositoryManager::new();
    let mut connections = Vec::new();
    for declared in &config.connections {
        let connection = Arc::new(MemoryConnection::new(declared.driver));
        manager.register(&declared.name, connection.clone());
        connections.push((declared.name.clone(), connection));
    }
    if manager.connection(DEFAULT_CONNECTION).is_err() {
        let connection = Arc::new(MemoryConnection::new(Driver::Mysql));
        manager.register(DEFAULT_CONNECTION, connection.clone());
        connections.push((DEFAULT_CONNECTION.to_string(), connection));
    }
    let gateway: Arc<dyn Gateway> = Arc::new(manager);

    for table in config.build_tables(gateway.clone())? {
        table.create()?;
        log::info!(
            "created table {} on '{}' (exists: {})",
            table.name().bold(),
            table.connection(),
            table.exist()?
        );
    }

    let user_roles = UserRolesTable::new(gateway)?;
    user_roles.table().create()?;
    user_roles.add_role_to_user(1, 10)?;
    user_roles.add_role_to_user(1, 20)?;
    log::info!("user 1 has role 10: {}", user_roles.has_role(1, 10)?);
    log::info!("roles of user 1: {:?}", user_roles.roles_by_user_id(1)?);
    user_roles.remove_role_from_user(1, 20)?;

    let unknown = user_roles
        .table()
        .execute("archive", &DataAction::new())?;
    if let Dispatch::UnknownAction(id) = unknown {
        log::warn!("table {} has no action '{id}'", user_roles.table().name());
    }

    for (name, connection) in connections {
        println!("{}", format!("-- connection '{name}' ({})", connection.driver()).bold());
        for statement in connection.journal() {
            println!("{}", statement.sql.green());
            if !statement.parameters.is_empty() {
                let parameters = statement
                    .parameters
                    .iter()
                    .map(|(key, value)| format!(":{key} = {value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("   {}", parameters.bright_black());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_should_parse_log_level() {
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["minicore-example", "--log-level", "trace"])
            .expect("failed to parse");
        assert_eq!(cli.log_level, LevelFilter::Trace);
        assert!(cli.config.is_none());

        assert!(Cli::try_parse_from(["minicore-example", "--log-level", "loud"]).is_err());
    }
}
