//! # cadastro CLI
//!
//! Validates registration forms described as JSON, checks CPFs and looks up
//! postal codes.

mod paths;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use cadastro_lib::cep::{AddressLookup, Cep, ViaCepClient};
use cadastro_lib::validators::Cpf;
use cadastro_lib::{Form, Validator, ValidatorConfig};
use clap::Parser;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Registration form validation.
#[derive(Parser, Debug)]
#[command(name = "cadastro", version, about)]
struct Cli {
    /// Config file (defaults to config.json in the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Mirror debug logs to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate every field of a form described in a JSON file.
    Validate {
        /// JSON array of field descriptions.
        form: PathBuf,
        /// Do not query the postal-code service.
        #[arg(long)]
        offline: bool,
    },
    /// Check a CPF and print it formatted.
    Cpf { value: String },
    /// Look up the address of a postal code.
    Cep { value: String },
    /// Print the standard registration form as JSON.
    Registration,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    log::debug!("Using config: {:?}", config);

    match cli.command {
        Commands::Validate { form, offline } => validate(&form, config, offline).await,
        Commands::Cpf { value } => Ok(check_cpf(&value)),
        Commands::Cep { value } => lookup_cep(&value, &config).await,
        Commands::Registration => {
            let specs = Form::registration().to_specs();
            println!("{}", serde_json::to_string_pretty(&specs)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: bool) {
    paths::rotate_logs();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if verbose {
        loggers.push(TermLogger::new(
            LevelFilter::Debug,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(path) = paths::log_file()
        && let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_ok()
        && let Ok(file) = File::create(&path)
    {
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ValidatorConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match paths::config_file() {
            Some(path) if path.exists() => path,
            _ => return Ok(ValidatorConfig::default()),
        },
    };

    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    ValidatorConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))
}

async fn validate(path: &Path, config: ValidatorConfig, offline: bool) -> anyhow::Result<ExitCode> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form {}", path.display()))?;
    let form = Form::from_json(&json).with_context(|| format!("Invalid form {}", path.display()))?;

    let config = if offline { config.offline() } else { config };
    let validator = Validator::standard(&config)?;
    let result = validator.validate_form(&form).await;

    for field in form.fields() {
        match field.error() {
            None => println!("ok       {:<16} {}", field.kind(), field.value()),
            Some(message) => println!("invalid  {:<16} {}", field.kind(), message),
        }
    }

    if result.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        log::info!("{} invalid field(s) in {}", result.errors().len(), path.display());
        Ok(ExitCode::FAILURE)
    }
}

fn check_cpf(value: &str) -> ExitCode {
    match Cpf::parse(value) {
        Ok(cpf) => {
            println!("{} is valid", cpf);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{} is invalid: {}", value, e);
            ExitCode::FAILURE
        }
    }
}

async fn lookup_cep(value: &str, config: &ValidatorConfig) -> anyhow::Result<ExitCode> {
    let cep = Cep::parse(value)?;
    let client = ViaCepClient::builder()
        .base_url(config.cep.base_url.as_str())
        .timeout(config.cep.timeout())
        .connect_timeout(config.cep.connect_timeout())
        .build()?;

    match client.lookup(&cep).await? {
        Some(address) => {
            println!("{}", serde_json::to_string_pretty(&address)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{} not found", cep);
            Ok(ExitCode::FAILURE)
        }
    }
}
