// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use captionsrv::app_config::{self, Config, SourceProvider};
use captionsrv::errors::AppError;
use captionsrv::providers::CaptionSource;
use captionsrv::providers::mock::MockCaptionSource;
use captionsrv::providers::youtube::YouTube;
use captionsrv::server::{self, AppState};
use captionsrv::transcript_service::{TrackListResponse, TranscriptService};
use captionsrv::LanguagePreference;

/// CLI Wrapper for SourceProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSourceProvider {
    Youtube,
    Mock,
}

impl From<CliSourceProvider> for SourceProvider {
    fn from(cli_provider: CliSourceProvider) -> Self {
        match cli_provider {
            CliSourceProvider::Youtube => SourceProvider::YouTube,
            CliSourceProvider::Mock => SourceProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server (default command)
    Serve,

    /// Resolve a transcript once and print it as JSON
    Transcript {
        /// Video identifier
        video_id: String,

        /// Preferred language, most preferred first (repeatable)
        #[arg(short = 'l', long = "language")]
        languages: Vec<String>,
    },

    /// List the caption tracks of a video as JSON
    List {
        /// Video identifier
        video_id: String,
    },

    /// Generate shell completions for captionsrv
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// captionsrv - Caption track API
///
/// Serves the caption tracks of online videos and resolves transcripts
/// against an ordered list of preferred languages.
#[derive(Parser, Debug)]
#[command(name = "captionsrv")]
#[command(version)]
#[command(about = "Caption track and transcript API")]
#[command(long_about = "captionsrv lists the caption tracks of a video and fetches transcripts in the first available preferred language.

EXAMPLES:
    captionsrv                                   # Serve the API using conf.json
    captionsrv --port 9000 serve                 # Serve on another port
    captionsrv transcript dQw4w9WgXcQ -l pt -l en # Print a transcript
    captionsrv list dQw4w9WgXcQ                  # Print the available tracks
    captionsrv --source mock list abc123         # Use the built-in demo catalog
    captionsrv completions bash > captionsrv.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Caption source to use
    #[arg(short, long, value_enum, global = true)]
    source: Option<CliSourceProvider>,

    /// Address to bind the server to
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

// @struct: Colored stderr logger, filtered by `log::max_level()`
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and label for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "captionsrv", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.into());

    let default_preference = config
        .default_preference()
        .context("Invalid default_languages")?;
    let service = TranscriptService::new(build_source(&config));

    match cli.command {
        Some(Commands::Transcript { video_id, languages }) => {
            let preference = LanguagePreference::or_default(Some(languages), &default_preference);
            let response = service
                .transcript(&video_id, &preference)
                .await
                .map_err(AppError::from)?;
            print_json(&response)
        }
        Some(Commands::List { video_id }) => {
            let collection = service.list_tracks(&video_id).await.map_err(AppError::from)?;
            print_json(&TrackListResponse::from(collection))
        }
        Some(Commands::Serve) | None => {
            let state = AppState {
                service,
                default_preference,
            };
            server::serve(state, &config.server.host, config.server.port).await
        }
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

/// Load the config file (creating a default one if missing) and apply CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;

    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(source) = &cli.source {
        config.source.provider = source.clone().into();
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    config
        .validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))
        .context("Configuration validation failed")?;

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

fn build_source(config: &Config) -> Arc<dyn CaptionSource> {
    info!("Using {} caption source", config.source.provider.display_name());
    match config.source.provider {
        SourceProvider::YouTube => Arc::new(YouTube::new(
            &config.source.accept_language,
            config.source.timeout_secs,
        )),
        SourceProvider::Mock => Arc::new(MockCaptionSource::demo()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow!("Failed to serialize response: {}", e))?;
    println!("{}", json);
    Ok(())
}
