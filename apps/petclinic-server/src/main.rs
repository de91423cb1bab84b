use anyhow::{anyhow, Context, Result};
use axum::{routing::get, Json, Router};
use clap::{Parser, Subcommand};
use http_kit::{with_standard_layers, StackOptions};
use owners::{OwnersConfig, OwnersModule};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;
use vets::{VetsConfig, VetsModule};

const MEMORY_DSN: &str = "sqlite::memory:";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
/// - Adds `mode=rwc` when no query is given so the file is created on first run.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case(MEMORY_DSN) || dsn.eq_ignore_ascii_case("sqlite://:memory:") {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    out.push('?');
    out.push_str(query.unwrap_or("mode=rwc"));
    Ok(out)
}

/// PetClinic Server - veterinary clinic records over HTTP
#[derive(Parser)]
#[command(name = "petclinic-server")]
#[command(about = "PetClinic Server - veterinary clinic records over HTTP")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database loaded with sample data
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("PetClinic Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    if raw.eq_ignore_ascii_case(MEMORY_DSN) {
        return Ok("sqlite");
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Module sections of the config, with `--mock` forcing sample data on.
fn module_configs(config: &AppConfig, mock: bool) -> Result<(OwnersConfig, VetsConfig)> {
    let mut owners: OwnersConfig = config.module_config("owners")?;
    let mut vets: VetsConfig = config.module_config("vets")?;
    if mock {
        owners.seed_sample_data = true;
        vets.seed_sample_data = true;
    }
    Ok((owners, vets))
}

/// Final DSN to connect with: in-memory for `--mock`, absolutized for sqlite files.
fn resolve_dsn(config: &AppConfig, mock: bool) -> Result<String> {
    if mock {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("Database URL not configured (use --mock for an in-memory store)"))?;
    let backend = detect_from_dsn(db_config)?;
    let dsn = db_config.url.trim();
    if backend == "sqlite" {
        absolutize_sqlite_dsn(dsn, Path::new(&config.server.home_dir), true)
    } else {
        Ok(dsn.to_string())
    }
}

async fn connect(config: &AppConfig, dsn: &str) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    opts.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);
    if let Some(db_config) = &config.database {
        if let Some(max) = db_config.max_conns {
            opts.max_connections(max);
        }
        if let Some(ms) = db_config.busy_timeout_ms {
            let busy = Duration::from_millis(u64::from(ms));
            opts.map_sqlx_sqlite_opts(move |o| o.busy_timeout(busy));
        }
    }

    tracing::info!("Connecting to database: {}", dsn);
    Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database '{dsn}'"))
}

/// Both modules' OpenAPI documents merged under one title.
fn openapi_document() -> utoipa::openapi::OpenApi {
    let mut doc = OwnersModule::openapi();
    doc.merge(VetsModule::openapi());
    doc.info.title = "PetClinic API".to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");
    let (owners_cfg, vets_cfg) = module_configs(&config, args.mock)?;

    let dsn = resolve_dsn(&config, args.mock)?;
    let db = connect(&config, &dsn).await?;

    let owners = OwnersModule::new();
    owners.migrate(&db).await?;
    owners.init(db.clone(), owners_cfg).await?;

    let vets = VetsModule::new();
    vets.migrate(&db).await?;
    vets.init(db.clone(), vets_cfg).await?;

    let openapi_json = serde_json::to_value(openapi_document()).context("Failed to build OpenAPI")?;
    let mut router = Router::new().route("/openapi.json", get(move || async move { Json(openapi_json) }));
    router = owners.register_rest(router)?;
    router = vets.register_rest(router)?;

    let stack = StackOptions {
        timeout: (config.server.timeout_sec > 0)
            .then(|| Duration::from_secs(config.server.timeout_sec)),
        cors_enabled: config.server.cors_enabled,
    };
    let app = with_standard_layers(router, &stack);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = runtime::wait_for_shutdown().await {
                tracing::error!("Shutdown signal handler failed: {}", e);
            }
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    module_configs(&config, args.mock)?;
    if !args.mock {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| anyhow!("Database URL not configured"))?;
        detect_from_dsn(db_config)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
