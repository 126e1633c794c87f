//! Load-profile CLI entry point: argument wiring and report printing.

use std::path::Path;
use std::process;

use loadprofile::config::ProfileConfig;
use loadprofile::io::export::export_csv;
use loadprofile::profile::build_profile;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    date_override: Option<String>,
    start_hour_override: Option<u8>,
    end_hour_override: Option<u8>,
    export_path: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("loadprofile - industrial plant load-profile generator");
    eprintln!();
    eprintln!("Usage: loadprofile [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load profile config from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (daily)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --date <YYYY-MM-DD>      Override profiled date");
    eprintln!("  --start-hour <0-23>      Override first profiled hour");
    eprintln!("  --end-hour <0-23>        Override last profiled hour");
    eprintln!("  --export <path>          Export the load table to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the build");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Launch the interactive dashboard");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the daily preset is used.");
}

fn require_value<'a>(args: &'a [String], i: usize, flag: &str, kind: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("error: {flag} requires a {kind} argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        seed_override: None,
        date_override: None,
        start_hour_override: None,
        end_hour_override: None,
        export_path: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                cli.config_path = Some(require_value(&args, i, "--config", "path").to_string());
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(require_value(&args, i, "--preset", "name").to_string());
            }
            "--seed" => {
                i += 1;
                let raw = require_value(&args, i, "--seed", "u64");
                match raw.parse::<u64>() {
                    Ok(s) => cli.seed_override = Some(s),
                    Err(_) => {
                        eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                        process::exit(1);
                    }
                }
            }
            "--date" => {
                i += 1;
                cli.date_override = Some(require_value(&args, i, "--date", "date").to_string());
            }
            "--start-hour" => {
                i += 1;
                let raw = require_value(&args, i, "--start-hour", "hour");
                match raw.parse::<u8>() {
                    Ok(h) => cli.start_hour_override = Some(h),
                    Err(_) => {
                        eprintln!("error: --start-hour value \"{raw}\" is not a valid hour");
                        process::exit(1);
                    }
                }
            }
            "--end-hour" => {
                i += 1;
                let raw = require_value(&args, i, "--end-hour", "hour");
                match raw.parse::<u8>() {
                    Ok(h) => cli.end_hour_override = Some(h),
                    Err(_) => {
                        eprintln!("error: --end-hour value \"{raw}\" is not a valid hour");
                        process::exit(1);
                    }
                }
            }
            "--export" => {
                i += 1;
                cli.export_path = Some(require_value(&args, i, "--export", "path").to_string());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = require_value(&args, i, "--port", "u16");
                match raw.parse::<u16>() {
                    Ok(p) => cli.port = p,
                    Err(_) => {
                        eprintln!("error: --port value \"{raw}\" is not a valid u16");
                        process::exit(1);
                    }
                }
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = parse_args();

    // Load config: --config takes priority, then --preset, then daily default
    let mut config = if let Some(ref path) = cli.config_path {
        match ProfileConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ProfileConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ProfileConfig::daily()
    };

    // Apply overrides
    if let Some(seed) = cli.seed_override {
        config.profile.seed = seed;
    }
    if let Some(date) = cli.date_override {
        config.profile.date = date;
    }
    if let Some(hour) = cli.start_hour_override {
        config.profile.start_hour = hour;
    }
    if let Some(hour) = cli.end_hour_override {
        config.profile.end_hour = hour;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Interactive dashboard replaces the batch report entirely
    #[cfg(feature = "tui")]
    if cli.tui {
        loadprofile::tui::run(config);
        return;
    }

    // Build
    let profile = match build_profile(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print the table
    for i in 0..profile.table.len() {
        if let Some(row) = profile.table.format_row(i) {
            println!("{row}");
        }
    }

    // Print drill-down tables if enabled
    for breakdown in &profile.drilldown {
        println!("\n-- {} equipment --", breakdown.department);
        for i in 0..breakdown.table.len() {
            if let Some(row) = breakdown.table.format_row(i) {
                println!("{row}");
            }
        }
    }

    // Print the summary report
    println!("\n{}", profile.stats);

    // Export CSV if requested
    if let Some(ref path) = cli.export_path {
        if let Err(e) = export_csv(&profile.table, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Load table written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(loadprofile::api::AppState { config, profile });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(loadprofile::api::serve(state, addr));
    }
}
