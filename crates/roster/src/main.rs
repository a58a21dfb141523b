use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster_config::{get_config_path, Config};
use roster_output::*;
use roster_registry::{parse_script, UserRegistry};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const MAIN_HELP: &str = r#"Roster keeps an in-memory registry of users (username, email, creation
time) for the lifetime of one process. Nothing is written to disk.

`roster run` (the default) creates the two built-in users and reports the
total. `roster script FILE` runs one command per line against a fresh
registry:

    create <username> <email>
    find <username>
    delete <username>
    list
    count

Blank lines and lines starting with `#` are ignored. Use `-` or omit FILE to
read from stdin."#;

const BUILTIN_USERS: &[(&str, &str)] = &[
    ("john_doe", "john@example.com"),
    ("jane_smith", "jane@example.com"),
];

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = MAIN_HELP)]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Config file (default: ~/.config/roster/config.toml)")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,

    #[arg(long, global = true, help = "Show debug diagnostics")]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create the built-in users and report the total.")]
    Run,

    #[command(about = "Execute registry commands from a file or stdin.")]
    Script {
        #[arg(help = "Script file, or - for stdin (default: stdin)")]
        file: Option<PathBuf>,
    },

    #[command(about = "Print config file location and contents.")]
    Config,
}

/// Values the session reports about the running program.
struct SessionInfo {
    version: &'static str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let info = SessionInfo {
        version: env!("CARGO_PKG_VERSION"),
    };

    let loaded = load_config(cli.config.as_deref()).and_then(|config| {
        let level = config.log_filter()?;
        Ok((config, level))
    });

    let result = match loaded {
        Ok((config, level)) => {
            init_diagnostics(level, cli.debug);
            run(&cli, &config, &info)
        }
        Err(e) => {
            init_diagnostics(LevelFilter::INFO, cli.debug);
            Err(e)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);
    Config::load_from(&path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// `RUST_LOG` overrides the configured level; `--debug` overrides both.
fn init_diagnostics(level: LevelFilter, debug: bool) {
    let filter = if debug {
        EnvFilter::new(LevelFilter::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
    };

    tracing_subscriber::fmt()
        .with_ansi(false)
        .event_format(DiagnosticFormat)
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .init();
}

fn run(cli: &Cli, config: &Config, info: &SessionInfo) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match &cli.command {
        None | Some(Commands::Run) => handle_run(&mut out, config, info, cli.json)?,
        Some(Commands::Script { file }) => {
            handle_script(&mut out, config, file.as_deref(), cli.json)?
        }
        Some(Commands::Config) => handle_config(&mut out, cli.config.as_deref(), config)?,
    }
    out.flush()?;
    Ok(())
}

fn run_builtin_session(config: &Config, info: &SessionInfo) -> UserRegistry {
    let mut registry = UserRegistry::new(config.registry.database_url.as_str());
    for (username, email) in BUILTIN_USERS {
        registry.create(username, email);
    }
    info!("Application version {}", info.version);
    info!("Total users: {}", registry.len());
    registry
}

fn handle_run(
    out: &mut impl Write,
    config: &Config,
    info: &SessionInfo,
    json_output: bool,
) -> Result<()> {
    let registry = run_builtin_session(config, info);
    if json_output {
        writeln!(out, "{}", serde_json::to_string_pretty(&registry.list())?)?;
    }
    Ok(())
}

fn read_script(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            Ok(source)
        }
    }
}

fn handle_script(
    out: &mut impl Write,
    config: &Config,
    file: Option<&Path>,
    json_output: bool,
) -> Result<()> {
    let source = read_script(file)?;
    let mut registry = UserRegistry::new(config.registry.database_url.as_str());

    // Parse errors surface before any command has run.
    let commands = parse_script(&source)?;
    let mut succeeded = 0;
    for command in &commands {
        let result = registry.execute(command);
        if result.is_success() {
            succeeded += 1;
        }
        if json_output {
            writeln!(out, "{}", format_command_result_json(&result)?)?;
        } else if let Some(text) = format_command_result(&result) {
            writeln!(out, "{}", text)?;
        }
    }
    debug!("{} of {} commands succeeded", succeeded, commands.len());
    Ok(())
}

fn handle_config(out: &mut impl Write, path: Option<&Path>, config: &Config) -> Result<()> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);
    writeln!(out, "Config file: {}", config_path.display())?;
    writeln!(out)?;

    if config_path.exists() {
        writeln!(out, "{}", std::fs::read_to_string(&config_path)?)?;
    } else {
        writeln!(out, "(file does not exist, using defaults)")?;
        writeln!(out)?;
        write!(out, "{}", config.to_toml_string()?)?;
    }
    Ok(())
}
