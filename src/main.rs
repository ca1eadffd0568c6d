use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use careflow::app::App;
use careflow::booking::{
    BookingPaths, BookingStep, Location, Progress, Resolution, StepResolver, TOTAL_STEPS,
};
use careflow::catalog::{content_source_from_config, Catalog};
use careflow::config::Config;
use careflow::logging;
use careflow::rest::{self, ApiDoc, ApiState};

#[derive(Parser)]
#[command(name = "careflow")]
#[command(about = "Hospital appointment booking wizard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Start the wizard at this location (e.g. /booking/2)
    #[arg(short, long)]
    location: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a location against the booking flow
    Resolve {
        /// Location, e.g. /booking/2
        path: String,
    },

    /// List the booking steps
    Steps,

    /// Show the clinic catalog
    Catalog {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the REST API server
    Api {
        /// Port to listen on (default: api.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the OpenAPI document
    Openapi {
        /// Print YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write it to .careflow/config.toml
        #[arg(short, long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Resolve { path }) => cmd_resolve(&config, &path),
        Some(Commands::Steps) => cmd_steps(&config),
        Some(Commands::Catalog { json }) => cmd_catalog(&config, json).await?,
        Some(Commands::Api { port }) => cmd_api(config, port).await?,
        Some(Commands::Openapi { yaml }) => cmd_openapi(yaml)?,
        Some(Commands::Config { write }) => cmd_config(&config, write)?,
        None => {
            let catalog = load_catalog(&config).await?;
            let mut app = App::new(config, catalog, cli.location.as_deref());
            let result = app.run();

            if let Some(path) = &logging_handle.log_file_path {
                logging::report_log_file(path);
            }
            result?;
        }
    }

    Ok(())
}

async fn load_catalog(config: &Config) -> Result<Catalog> {
    let source = content_source_from_config(&config.catalog)?;
    Catalog::load(source.as_ref())
        .await
        .with_context(|| format!("Failed to load catalog from {} source", source.name()))
}

fn cmd_resolve(config: &Config, path: &str) {
    let paths = BookingPaths::from_config(&config.booking);
    let location = Location::new(path);

    if !paths.contains(&location) {
        println!("{} is outside the booking flow ({})", path, paths.entry());
        return;
    }

    match StepResolver::new(paths).resolve_location(&location) {
        Resolution::Step(step) => {
            println!(
                "Step {} of {}: {}",
                step.number(),
                TOTAL_STEPS,
                step.title()
            );
            println!("  {}", Progress::of(step).trail());
        }
        Resolution::Redirect(request) => {
            println!("Invalid step, redirect (replace) to {}", request.location);
        }
    }
}

fn cmd_steps(config: &Config) {
    let paths = BookingPaths::from_config(&config.booking);
    for step in BookingStep::all() {
        let definition = step.definition();
        println!(
            "{}  {:<28} {:<14} {}",
            step.number(),
            definition.title,
            definition.role.label(),
            paths.step_path(*step)
        );
    }
}

async fn cmd_catalog(config: &Config, json: bool) -> Result<()> {
    let catalog = load_catalog(config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for department in &catalog.departments {
        println!("{}", department.name);
        for service in catalog
            .services
            .iter()
            .filter(|s| s.department_id == department.id)
        {
            println!(
                "  service  {:<28} {:>3} min  {:>8.2}",
                service.name, service.duration_minutes, service.price
            );
        }
        for doctor in catalog
            .doctors
            .iter()
            .filter(|d| d.department_id == department.id)
        {
            println!(
                "  doctor   {:<40} {} open slot(s)",
                doctor.display_name(),
                doctor.slots.len()
            );
        }
    }
    Ok(())
}

async fn cmd_api(config: Config, port: Option<u16>) -> Result<()> {
    let catalog = load_catalog(&config).await?;
    let host = config.api.host.clone();
    let port = port.unwrap_or(config.api.port);

    println!("Starting careflow REST API on http://{}:{}", host, port);
    println!("Press Ctrl+C to stop");

    rest::serve(ApiState::new(config, catalog), &host, port).await
}

fn cmd_openapi(yaml: bool) -> Result<()> {
    let document = if yaml {
        ApiDoc::yaml().context("Failed to render OpenAPI YAML")?
    } else {
        ApiDoc::json().context("Failed to render OpenAPI JSON")?
    };
    println!("{}", document);
    Ok(())
}

fn cmd_config(config: &Config, write: bool) -> Result<()> {
    if write {
        config.save()?;
        println!("Wrote {}", Config::local_config_path().display());
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}
