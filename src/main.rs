/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use shape_ingest::configs::{get_configs, Configs, SETTINGS_FILE};
use shape_ingest::remote::{RemoteShapeDataSet, SHAPE_FIELD};
use shape_ingest::utils::get_formatted_elapsed_time;
use shape_ingest::{parse, to_wkt, ShapeRegistry, Shapefile};
use std::env;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

enum Command {
    Parse(String),
    Shp(PathBuf),
    Preload(Option<PathBuf>),
    Fetch(String),
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

/// Strips a flag and an optional leading '=' from an argument, along with any quotes.
fn arg_value(arg: &str, flag: &str) -> String {
    let v = arg.replacen(flag, "", 1).replace('\"', "").replace('\'', "");
    match v.strip_prefix('=') {
        Some(s) => s.to_string(),
        None => v,
    }
}

fn run() -> shape_ingest::Result<()> {
    let mut settings = PathBuf::from(SETTINGS_FILE);
    let mut name_field: Option<String> = None;
    let mut verbose = false;
    let mut command: Option<Command> = None;

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        help();
        return Ok(());
    }
    for arg in args {
        if arg.starts_with("-h") || arg.starts_with("--help") {
            help();
            return Ok(());
        } else if arg.starts_with("--version") {
            version();
            return Ok(());
        } else if arg.starts_with("--parse") {
            command = Some(Command::Parse(arg_value(&arg, "--parse")));
        } else if arg.starts_with("--shp") {
            command = Some(Command::Shp(PathBuf::from(arg_value(&arg, "--shp"))));
        } else if arg.starts_with("--preload") {
            let v = arg_value(&arg, "--preload");
            command = Some(Command::Preload(if v.is_empty() {
                None
            } else {
                Some(PathBuf::from(v))
            }));
        } else if arg.starts_with("--fetch") {
            command = Some(Command::Fetch(arg_value(&arg, "--fetch")));
        } else if arg.starts_with("--name_field") {
            name_field = Some(arg_value(&arg, "--name_field"));
        } else if arg.starts_with("--settings") {
            settings = PathBuf::from(arg_value(&arg, "--settings"));
        } else if arg.starts_with("-v") {
            verbose = true;
        } else {
            eprintln!("Unrecognized argument: {}", arg);
        }
    }

    let mut configs = get_configs(&settings)?;
    configs.verbose_mode |= verbose;
    if let Some(field) = name_field {
        configs.name_field = field;
    }
    init_logging(&configs);

    let start = Instant::now();
    match command {
        Some(Command::Parse(text)) => {
            let shape = parse(&text)?;
            println!("{}", to_wkt(&shape));
            println!("bounding box: {:?}", shape.bounding_box());
        }
        Some(Command::Shp(path)) => {
            let shapefile = Shapefile::read(&path, &configs.name_field)?;
            println!("{}", shapefile.header);
            let source = path.to_string_lossy();
            for record in &shapefile.records {
                let doc = record.to_document(SHAPE_FIELD, "local", &source);
                println!("{}", serde_json::to_string(&doc)?);
            }
        }
        Some(Command::Preload(dir)) => {
            let registry = ShapeRegistry::new();
            let dir = dir.or_else(|| configs.shapes_directory.clone()).unwrap_or_else(|| PathBuf::from("."));
            let summary = registry.preload(&dir, &configs)?;
            for name in registry.names() {
                if let Some(shape) = registry.get(&name) {
                    println!("{}: {}", name, shape);
                }
            }
            println!("{}", summary);
        }
        Some(Command::Fetch(url)) => {
            let data_set = RemoteShapeDataSet::new("cli", &url, &configs.name_field)?;
            let timeout = Duration::from_secs(configs.fetch_timeout_secs);
            for doc in data_set.documents(timeout)? {
                println!("{}", serde_json::to_string(&doc)?);
            }
        }
        None => {
            help();
            return Ok(());
        }
    }
    if configs.verbose_mode {
        println!("Elapsed Time: {}", get_formatted_elapsed_time(start));
    }
    Ok(())
}

fn init_logging(configs: &Configs) {
    let level = if configs.verbose_mode { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn help() {
    let ext = if cfg!(target_os = "windows") { ".exe" } else { "" };
    let s = "shape_ingest Help

The following commands are recognized:
--parse          Parses a WKT shape and prints it normalized; --parse=\"POINT (1 2)\".
--shp            Reads a .shp file and the .dbf next to it, printing one JSON document per record.
--preload        Loads a directory of shape definitions; defaults to the configured directory.
--fetch          Fetches a zipped shapefile pair from a URL and prints its documents.
--name_field     The .dbf field holding each shape's name; defaults to 'name'.
--settings       The settings file; defaults to settings.json.
-v               Verbose mode.
--version        Prints the version.
-h, --help       Prints help information.

Example Usage:
>> ./shape_ingestEXE --shp=countries.shp --name_field=NAME -v
"
    .replace("EXE", ext);
    println!("{}", s);
}

fn version() {
    const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
    println!("shape_ingest v{}", VERSION.unwrap_or("unknown"));
}
