use clap::Parser;
use log::LevelFilter;
use std::path::{Path, PathBuf};

use tradegen_core::{run, Catalog, SettingsFile};

#[derive(Debug, Parser)]
#[command(
    name = "tradegen",
    version,
    about = "Generate NPC, quest and lottery request JSON from an item database dump"
)]
struct Args {
    /// Item database dump (items.json).
    #[arg(long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// Directory the request_*.json files are written to.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Catalog definition file; the built-in catalog is used when omitted.
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// JSON settings file. Command line flags take precedence over it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    biome_id: Option<u32>,

    #[arg(long)]
    profession_id: Option<u32>,

    /// Key of the item used as exchange ticket and default quest reward.
    #[arg(long, value_name = "KEY")]
    ticket_item_key: Option<String>,

    #[arg(long, value_name = "ID")]
    lottery_ticket_item_id: Option<u32>,

    /// Print the effective catalog definition as JSON and exit.
    #[arg(long, default_value_t = false)]
    dump_catalog: bool,

    #[arg(long, default_value_t = false)]
    verbose: bool,

    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn build_dispatch(verbose: bool, log_file: Option<&Path>) -> Result<fern::Dispatch, fern::InitError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(path) = log_file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    Ok(dispatch)
}

fn setup_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), fern::InitError> {
    build_dispatch(verbose, log_file)?.apply()?;
    Ok(())
}

fn settings_file(args: &Args) -> tradegen_core::Result<SettingsFile> {
    let mut file = match &args.config {
        Some(path) => SettingsFile::load(path)?,
        None => SettingsFile::default(),
    };

    if args.items.is_some() {
        file.items_path = args.items.clone();
    }
    if args.output.is_some() {
        file.output_path = args.output.clone();
    }
    if args.catalog.is_some() {
        file.catalog_path = args.catalog.clone();
    }
    if args.biome_id.is_some() {
        file.biome_id = args.biome_id;
    }
    if args.profession_id.is_some() {
        file.profession_id = args.profession_id;
    }
    if args.ticket_item_key.is_some() {
        file.ticket_item_key = args.ticket_item_key.clone();
    }
    if args.lottery_ticket_item_id.is_some() {
        file.lottery_ticket_item_id = args.lottery_ticket_item_id;
    }

    Ok(file)
}

fn dump_catalog(path: Option<&Path>) -> tradegen_core::Result<String> {
    let catalog = match path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    catalog.to_json_pretty()
}

fn main() {
    let args = Args::parse();

    if let Err(err) = setup_logging(args.verbose, args.log_file.as_deref()) {
        eprintln!("Failed to set up logging: {err}");
        std::process::exit(1);
    }

    let file = match settings_file(&args) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    if args.dump_catalog {
        match dump_catalog(file.catalog_path.as_deref()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    let result = file.into_settings().and_then(run);
    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;
    use tradegen_core::{GeneratorError, DEFAULT_PROFESSION_ID};

    #[test]
    fn flags_override_config_values() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let config = dir.path().join("settings.json");
        fs::write(&config, r#"{"items_path": "from_file/items.json", "biome_id": 4}"#)
            .expect("write settings");

        let args = Args::parse_from([
            OsStr::new("tradegen"),
            OsStr::new("--config"),
            config.as_os_str(),
            OsStr::new("--biome-id"),
            OsStr::new("5"),
            OsStr::new("--output"),
            OsStr::new("out"),
        ]);
        let settings = settings_file(&args)
            .expect("config file parses")
            .into_settings()
            .expect("complete settings");

        assert_eq!(settings.items_path, PathBuf::from("from_file/items.json"));
        assert_eq!(settings.output_path, PathBuf::from("out"));
        assert_eq!(settings.biome_id, 5);
        assert_eq!(settings.profession_id, DEFAULT_PROFESSION_ID);
    }

    #[test]
    fn malformed_config_file_is_a_json_error() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let config = dir.path().join("settings.json");
        fs::write(&config, "{ not json").expect("write settings");

        let args = Args::parse_from([
            OsStr::new("tradegen"),
            OsStr::new("--config"),
            config.as_os_str(),
        ]);
        let err = settings_file(&args).expect_err("config file is not JSON");

        match err {
            GeneratorError::Json { path, .. } => assert_eq!(path, config),
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }

    #[test]
    fn log_file_receives_formatted_records() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let log_path = dir.path().join("tradegen.log");

        let (level, logger) = build_dispatch(true, Some(log_path.as_path()))
            .expect("log file opens")
            .into_log();
        assert_eq!(level, LevelFilter::Debug);

        logger.log(
            &log::Record::builder()
                .args(format_args!("Skipping unresolved item"))
                .level(log::Level::Debug)
                .target("tradegen_core::assemble")
                .build(),
        );
        logger.flush();

        let text = fs::read_to_string(&log_path).expect("read log file");
        assert!(text.contains("DEBUG tradegen_core::assemble] Skipping unresolved item"));
    }

    #[test]
    fn log_file_in_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let log_path = dir.path().join("no_such_dir").join("tradegen.log");

        assert!(build_dispatch(false, Some(log_path.as_path())).is_err());
    }

    #[test]
    fn missing_output_is_reported() {
        let args = Args::parse_from(["tradegen", "--items", "items.json"]);
        let result = settings_file(&args).and_then(SettingsFile::into_settings);
        assert!(result.is_err());
    }

    #[test]
    fn dump_catalog_prints_builtin_tables() {
        let json = dump_catalog(None).expect("builtin catalog serializes");
        assert!(json.contains("通常福引"));
        assert!(json.contains("\"pawnshop\""));
    }
}
