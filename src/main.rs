use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use module_version::config::{ResolverConfig, config_path};
use module_version::version::host::PackageRegistry;
use module_version::{Namespace, Version, VersionResolver};

#[derive(Parser)]
#[command(name = "module-version")]
#[command(version, about = "Resolve module versions from .version descriptors")]
struct Cli {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the version of one or more namespaces
    Resolve(ResolveArgs),
    /// Show where descriptors are searched for a namespace, nearest first
    Path(PathArgs),
}

#[derive(Args)]
struct ResolveArgs {
    /// Dotted namespaces, e.g. org.mrcool.swissknife.db
    #[arg(required = true)]
    namespaces: Vec<String>,

    #[command(flatten)]
    source: SourceArgs,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Do not warn about unexpanded ${...} variables in descriptors
    #[arg(long)]
    suppress_var_warning: bool,
}

#[derive(Args)]
struct PathArgs {
    namespace: String,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct SourceArgs {
    /// Resource root to search (repeatable, searched in order)
    #[arg(long = "root")]
    roots: Vec<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn load_config(&self) -> anyhow::Result<ResolverConfig> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::load(path)?,
            None => {
                let default_path = config_path();
                if default_path.is_file() {
                    ResolverConfig::load(&default_path)?
                } else {
                    ResolverConfig::default()
                }
            }
        };

        if !self.roots.is_empty() {
            config.resource_roots = self.roots.clone();
        }
        Ok(config)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedEntry {
    namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref(), cli.json_logs)?;

    match cli.command {
        Command::Resolve(args) => resolve(args),
        Command::Path(args) => show_path(args),
    }
}

fn init_logging(log_file: Option<&Path>, json: bool) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("log file path {:?} has no file name", path))?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = if json {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(log_file.is_none())
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    Ok(guard)
}

fn resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let mut config = args.source.load_config()?;
    if args.suppress_var_warning {
        config.suppress_var_found_warning = Some(true);
    }
    let resolver = VersionResolver::from_config(
        &config,
        Arc::new(PackageRegistry::with_current_crate()),
    );

    let entries: Vec<ResolvedEntry> = args
        .namespaces
        .iter()
        .map(|namespace| match resolver.resolve(namespace) {
            Ok(version) => ResolvedEntry {
                namespace: namespace.clone(),
                tag: Some(version.tag()),
                version: Some(Version::clone(&version)),
                error: None,
            },
            Err(e) => ResolvedEntry {
                namespace: namespace.clone(),
                version: None,
                tag: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            match (&entry.version, &entry.error) {
                (Some(version), _) => println!("{}: {}", entry.namespace, version),
                (None, Some(error)) => eprintln!("{}: {}", entry.namespace, error),
                (None, None) => {}
            }
        }
    }

    let failures = entries.iter().filter(|entry| entry.error.is_some()).count();
    if failures > 0 {
        anyhow::bail!("{} namespace(s) could not be resolved", failures);
    }
    Ok(())
}

fn show_path(args: PathArgs) -> anyhow::Result<()> {
    let namespace = Namespace::parse(&args.namespace)?;
    let config = args.source.load_config()?;

    for candidate in namespace.ancestors() {
        let resource_path = candidate.resource_path();
        for root in &config.resource_roots {
            let path = root.join(&resource_path);
            let marker = if path.is_file() { "*" } else { " " };
            println!("{} {}", marker, path.display());
        }
    }
    Ok(())
}
