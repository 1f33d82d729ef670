use elfventure::config::{Config, DEFAULT_CONFIG_FILE};
use elfventure::game::{GameSession, Outcome};
use elfventure::input::TerminalInput;
use elfventure::rng::StartPicker;
use elfventure::store::JsonFileStore;
use elfventure::world::{World, WorldLoadError};
use log::{debug, info};
use std::env;
use std::io;
use std::process;

fn usage(program: &str) {
    println!("elfventure - a text-based navigation game");
    println!();
    println!("Usage: {program} [world_file.json] [options]");
    println!();
    println!("Examples:");
    println!("  {program} resources/worlds/elf.json");
    println!("  {program} resources/worlds/elf.json --seed 7 --finish \"Hobbs' Apartment\"");
    println!();
    println!("Options:");
    println!("  --positions FILE   per-user position store (default location.json)");
    println!("  --finish NAME      finish location name (default Hobbs' Apartment)");
    println!("  --seed N           fixed seed for the start-room choice");
    println!("  --config FILE      config file (default {DEFAULT_CONFIG_FILE})");
    println!("  --help             show this help");
    println!();
    println!("Settings resolve as: command line > config file > defaults.");
}

/// Everything main needs before a session can start. Flags override the
/// config file, which overrides the built-in defaults.
fn parse_args(args: &[String]) -> Result<Option<Config>, String> {
    let mut config_path = DEFAULT_CONFIG_FILE.to_string();
    // First pass: --config only, so the file is loaded before overrides.
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(None);
        }
        if arg == "--config" {
            config_path = iter
                .next()
                .ok_or_else(|| "--config requires a file path".to_string())?
                .clone();
        }
    }

    let mut config = Config::load_or_default(&config_path).map_err(|e| e.to_string())?;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                iter.next();
            }
            "--positions" => {
                config.positions = iter
                    .next()
                    .ok_or_else(|| "--positions requires a file path".to_string())?
                    .clone();
            }
            "--finish" => {
                config.finish = iter
                    .next()
                    .ok_or_else(|| "--finish requires a location name".to_string())?
                    .clone();
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--seed requires a number".to_string())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed: {value}"))?;
                config.seed = Some(seed);
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option: {flag}"));
            }
            world_file => {
                config.world = world_file.to_string();
            }
        }
    }

    Ok(Some(config))
}

fn report_world_error(path: &str, err: &WorldLoadError) {
    match err {
        WorldLoadError::Io(e) if e.kind() == io::ErrorKind::NotFound => {
            eprintln!("Error: World file not found: {path}");
            eprintln!();
            eprintln!("Please check:");
            eprintln!("• File path is correct");
            eprintln!("• You're running from the right directory");
            eprintln!("• File exists and is readable");
        }
        _ => {
            eprintln!("Error: Cannot load world '{path}': {err}");
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            usage(&args[0]);
            return;
        }
        Err(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage.");
            process::exit(1);
        }
    };

    debug!("loading world: {}", config.world);
    let world = match World::load(&config.world) {
        Ok(world) => world,
        Err(e) => {
            report_world_error(&config.world, &e);
            process::exit(1);
        }
    };

    if !world.contains(&config.finish) {
        eprintln!(
            "Error: finish location '{}' is not in the world data",
            config.finish
        );
        process::exit(1);
    }

    let mut picker = match config.seed {
        Some(seed) => {
            info!("using fixed seed {}", seed);
            StartPicker::new_predictable(seed)
        }
        None => StartPicker::new_uniform(),
    };
    let start = match picker.pick_start(&world, &config.finish) {
        Some(start) => start.to_string(),
        None => {
            eprintln!("Error: the world has no starting location besides the finish");
            process::exit(1);
        }
    };
    info!("starting at '{}', finish is '{}'", start, config.finish);

    let mut input = TerminalInput::new();
    let mut store = JsonFileStore::open(&config.positions);
    let stdout = io::stdout();

    let mut session = GameSession::new(
        &world,
        &config.finish,
        &mut input,
        &mut store,
        stdout.lock(),
    );
    match session.run(&start) {
        Ok(Outcome::Finished) => debug!("session finished at the finish location"),
        Ok(Outcome::Quit) => debug!("session ended by quit"),
        Err(e) => {
            eprintln!("Error during play: {e}");
            process::exit(1);
        }
    }
}
