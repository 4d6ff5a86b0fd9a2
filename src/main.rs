use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use radar_listing::{
    render_listing, services::serve, AppConfig, ConfigError, CurrentMoment, FileReporter,
    FileReporterConfig, ListingOrder, ServerConfig,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// What the process was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so env-backed arguments see it
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let matches = build_cli().get_matches();
    let (mode, config) = create_app_config(&matches)?;

    initialize_logging(&config.log_level)?;

    if !dotenv_loaded {
        debug!("No .env file found, using system environment variables");
    }

    run_application(mode, config).await
}

fn build_cli() -> Command {
    Command::new("radar-listing")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lists radar videos and the current hour's snapshots")
        .arg(
            Arg::new("directory")
                .long("directory")
                .value_name("PATH")
                .env("RADAR_DIRECTORY")
                .help("Directory to scan")
                .global(true),
        )
        .arg(
            Arg::new("order")
                .long("order")
                .value_name("ORDER")
                .help("Ordering within each group (enumeration, lexical)")
                .default_value("enumeration")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .global(true),
        )
        .subcommand(Command::new("list").about("Print the current listing to stdout (default)"))
        .subcommand(
            Command::new("serve")
                .about("Serve the listing over HTTP")
                .arg(
                    Arg::new("addr")
                        .long("addr")
                        .value_name("ADDR")
                        .env("ADDR")
                        .default_value("127.0.0.1"),
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .value_name("PORT")
                        .env("PORT")
                        .default_value("3000"),
                )
                .arg(
                    Arg::new("route")
                        .long("route")
                        .value_name("ROUTE")
                        .help("Path the listing is served on")
                        .default_value(radar_listing::services::DEFAULT_ROUTE),
                ),
        )
}

/// Pure function to create application configuration from CLI arguments
fn create_app_config(matches: &ArgMatches) -> Result<(Mode, AppConfig), ConfigError> {
    let directory = match matches.get_one::<String>("directory") {
        Some(dir) if dir.trim().is_empty() => return Err(ConfigError::EmptyDirectory),
        Some(dir) => PathBuf::from(dir),
        None => radar_listing::services::default_directory(),
    };

    let order: ListingOrder = matches
        .get_one::<String>("order")
        .map(|order| order.parse::<ListingOrder>())
        .transpose()?
        .unwrap_or_default();

    let reporter = FileReporterConfig { directory, order };

    let (mode, server) = match matches.subcommand() {
        Some(("serve", serve_matches)) => (Mode::Serve, create_server_config(serve_matches)?),
        _ => (Mode::List, ServerConfig::default()),
    };

    // Keep stdout quiet for one-shot listings
    let log_level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| match mode {
            Mode::List => "warn".to_string(),
            Mode::Serve => "info".to_string(),
        });

    Ok((
        mode,
        AppConfig {
            reporter,
            server,
            log_level,
        },
    ))
}

fn create_server_config(matches: &ArgMatches) -> Result<ServerConfig, ConfigError> {
    let defaults = ServerConfig::default();

    let addr = matches
        .get_one::<String>("addr")
        .cloned()
        .unwrap_or(defaults.addr);

    let port = match matches.get_one::<String>("port") {
        Some(raw) => raw
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| ConfigError::InvalidPort(raw.clone()))?,
        None => defaults.port,
    };

    let route = matches
        .get_one::<String>("route")
        .cloned()
        .unwrap_or(defaults.route);

    let config = ServerConfig { addr, port, route };
    config.validate()?;
    Ok(config)
}

/// Initialize structured logging with tracing, on stderr
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse()?)
        .add_directive("tower_http=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

async fn run_application(mode: Mode, config: AppConfig) -> Result<()> {
    debug!("Configuration: {:#?}", config);

    let reporter = FileReporter::new(config.reporter);

    match mode {
        Mode::List => print_listing(&reporter),
        Mode::Serve => {
            info!("Starting radar listing server");
            serve(reporter, config.server).await
        }
    }
}

/// Print the listing for the current local hour to stdout
fn print_listing(reporter: &FileReporter) -> Result<()> {
    let moment = CurrentMoment::now_local();
    let (files, summary) = reporter.report_with_summary(&moment);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render_listing(&files).as_bytes())?;
    stdout.flush()?;

    info!("Listed {} files", summary.total());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(args: &[&str]) -> Result<(Mode, AppConfig), ConfigError> {
        let matches = build_cli().try_get_matches_from(args).unwrap();
        create_app_config(&matches)
    }

    #[test]
    fn test_default_mode_is_list() {
        let (mode, config) = config_from(&["radar-listing", "--directory", "/srv/radar"]).unwrap();
        assert_eq!(mode, Mode::List);
        assert_eq!(config.reporter.directory, PathBuf::from("/srv/radar"));
        assert_eq!(config.reporter.order, ListingOrder::Enumeration);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_serve_mode_arguments() {
        let (mode, config) = config_from(&[
            "radar-listing",
            "serve",
            "--directory",
            "/srv/radar",
            "--addr",
            "0.0.0.0",
            "--port",
            "8080",
            "--route",
            "/files",
            "--order",
            "lexical",
        ])
        .unwrap();
        assert_eq!(mode, Mode::Serve);
        assert_eq!(config.server.addr, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.route, "/files");
        assert_eq!(config.reporter.order, ListingOrder::Lexical);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_port() {
        let result = config_from(&["radar-listing", "serve", "--port", "99999"]);
        assert_eq!(result.unwrap_err(), ConfigError::InvalidPort("99999".to_string()));

        let result = config_from(&["radar-listing", "serve", "--port", "0"]);
        assert_eq!(result.unwrap_err(), ConfigError::InvalidPort("0".to_string()));
    }

    #[test]
    fn test_invalid_order() {
        let result = config_from(&["radar-listing", "--order", "newest"]);
        assert_eq!(result.unwrap_err(), ConfigError::InvalidOrder("newest".to_string()));
    }

    #[test]
    fn test_invalid_route() {
        let result = config_from(&["radar-listing", "serve", "--route", "files"]);
        assert_eq!(result.unwrap_err(), ConfigError::InvalidRoute("files".to_string()));

        let result = config_from(&["radar-listing", "serve", "--route", "/*"]);
        assert_eq!(result.unwrap_err(), ConfigError::InvalidRoute("/*".to_string()));

        let result = config_from(&["radar-listing", "serve", "--route", "/:file"]);
        assert_eq!(result.unwrap_err(), ConfigError::InvalidRoute("/:file".to_string()));
    }

    #[test]
    fn test_empty_directory_rejected() {
        let result = config_from(&["radar-listing", "list", "--directory", " "]);
        assert_eq!(result.unwrap_err(), ConfigError::EmptyDirectory);
    }

    #[test]
    fn test_explicit_log_level() {
        let (_, config) =
            config_from(&["radar-listing", "--log-level", "debug", "--directory", "x"]).unwrap();
        assert_eq!(config.log_level, "debug");
    }
}
