use clap::{Args, Parser, Subcommand, ValueEnum};
use gitversion::{Backend, GeneratorConfig, VersionHeaderGenerator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gitversion")]
#[command(about = "Write git version metadata into a C header")]
struct Cli {
    /// Configuration file (defaults to ./gitversion.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the header file (default)
    Generate {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the collected metadata without writing anything
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Json)]
        format: ShowFormat,
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowFormat {
    Json,
    Toml,
    Header,
}

/// Command-line values that take precedence over the configuration file
#[derive(Args, Default)]
struct Overrides {
    /// Header file to write
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Repository directory to describe
    #[arg(long)]
    repo: Option<PathBuf>,
    /// Metadata backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,
    /// Remote whose URL is recorded
    #[arg(long)]
    remote: Option<String>,
    /// git executable for the cli backend
    #[arg(long)]
    git: Option<PathBuf>,
    /// Fail when the remote URL cannot be determined
    #[arg(long)]
    require_remote: bool,
    /// Fail on a detached HEAD or unknown branch
    #[arg(long)]
    require_branch: bool,
    /// Include guard macro
    #[arg(long)]
    guard: Option<String>,
}

impl Overrides {
    fn apply(self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(repo) = self.repo {
            config.repo_dir = repo;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(remote) = self.remote {
            config.remote = remote;
        }
        if let Some(git) = self.git {
            config.git = git;
        }
        if let Some(guard) = self.guard {
            config.header.guard = guard;
        }
        config.require_remote |= self.require_remote;
        config.require_branch |= self.require_branch;
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::discover()?,
    };

    match cli.command.unwrap_or(Commands::Generate {
        overrides: Overrides::default(),
    }) {
        Commands::Generate { overrides } => generate(overrides.apply(config)),
        Commands::Show { format, overrides } => show(overrides.apply(config), format),
    }
}

fn generate(config: GeneratorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let generator = VersionHeaderGenerator::from_config(&config)?;
    let report = generator.run()?;

    info!(
        bytes = report.bytes,
        tagged = report.info.has_tag(),
        dirty = report.info.is_dirty(),
        "generated {}",
        report.path.display()
    );
    Ok(())
}

fn show(config: GeneratorConfig, format: ShowFormat) -> Result<(), Box<dyn std::error::Error>> {
    let generator = VersionHeaderGenerator::from_config(&config)?;
    let info = generator.collect()?;

    let rendered = match format {
        ShowFormat::Json => serde_json::to_string_pretty(&info)?,
        ShowFormat::Toml => toml::to_string(&info)?,
        ShowFormat::Header => generator.render(&info)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
