//! Developer CLI for Splitledger.
//!
//! Wraps the `psql` shell with connection settings taken from the
//! application configuration, so schema work happens against the same
//! database the server uses.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use splitledger_api::config::Config;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "splitledger-cli")]
#[command(about = "Splitledger developer tooling")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the psql shell against the configured database
    Psql {
        #[arg(value_enum)]
        action: PsqlAction,

        /// Directory containing the schema SQL files
        #[arg(long, default_value = "db")]
        db_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PsqlAction {
    /// Drop and recreate the schema from rebuild.sql
    Rebuild,
    /// Load the maintenance functions from funcs.sql
    LoadFuncs,
    /// Open an interactive shell
    Attach,
}

impl PsqlAction {
    /// Extra arguments passed to psql for this action.
    fn psql_args(self) -> &'static [&'static str] {
        match self {
            PsqlAction::Rebuild => &["--file", "rebuild.sql"],
            PsqlAction::LoadFuncs => &["--file", "funcs.sql"],
            PsqlAction::Attach => &[],
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;

    match cli.command {
        Cmd::Psql { action, db_dir } => {
            let code = run_psql(&config, action, &db_dir)?;
            if code != 0 {
                eprintln!("\x1b[31;1mpsql failed\x1b[m");
            }
            std::process::exit(code);
        }
    }
}

/// Launch psql as a foreground child and return its exit code.
fn run_psql(config: &Config, action: PsqlAction, db_dir: &Path) -> Result<i32> {
    let database = &config.database;

    let mut cmd = Command::new("psql");
    cmd.current_dir(db_dir);
    cmd.env("PGDATABASE", &database.dbname);

    // Must outlive the child process so PGPASSFILE stays readable.
    let mut _passfile = None;

    match &database.user {
        None => {
            if database.host.is_some() {
                bail!("database user is unset, but a host is set");
            }
            if database.password.is_some() {
                bail!("database user is unset, but a password is set");
            }
        }
        Some(user) => {
            cmd.env("PGUSER", user);
            if let Some(host) = &database.host {
                cmd.env("PGHOST", host);
            }
            if let Some(password) = &database.password {
                let file = write_passfile(
                    database.host.as_deref(),
                    &database.dbname,
                    user,
                    password,
                )?;
                cmd.env("PGPASSFILE", file.path());
                _passfile = Some(file);
            }
        }
    }

    cmd.arg("--variable").arg("ON_ERROR_STOP=1");
    cmd.args(action.psql_args());

    let status = cmd.status().context("failed to launch psql")?;
    Ok(status.code().unwrap_or(1))
}

/// Write a mode-0600 temporary pgpass file for the given credentials.
fn write_passfile(
    host: Option<&str>,
    dbname: &str,
    user: &str,
    password: &str,
) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new().context("failed to create pgpass file")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o600))
            .context("failed to restrict pgpass file permissions")?;
    }

    writeln!(
        file,
        "{}",
        passfile_line(host.unwrap_or("*"), dbname, user, password)
    )
    .context("failed to write pgpass file")?;
    file.flush().context("failed to flush pgpass file")?;

    Ok(file)
}

/// One pgpass line: host:port:dbname:user:password, port wildcarded.
fn passfile_line(host: &str, dbname: &str, user: &str, password: &str) -> String {
    [host, "*", dbname, user, password]
        .iter()
        .map(|field| escape_colon(field))
        .collect::<Vec<_>>()
        .join(":")
}

/// Escape backslashes and colons for the pgpass format.
fn escape_colon(s: &str) -> String {
    s.replace('\\', "\\\\").replace(':', "\\:")
}
