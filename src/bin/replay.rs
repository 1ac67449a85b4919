// Replays a JSONL decision log through the move policy
//
// Each logged turn is re-run with the RNG seed recorded next to it, so turns
// decided by a random tier reproduce exactly. Logs without seeds can be replayed
// deterministically with --seed.

use std::env;
use std::process::ExitCode;

use wary_snake::config::Config;
use wary_snake::replay::{LogEntry, ReplayEngine};
use wary_snake::types::Direction;

const USAGE: &str = "\
wary-snake replay

USAGE:
  replay <log_file> (--all | --turns <T1,T2,...> | --validate <T:M[|M],...>) [OPTIONS]

MODES:
  --all                  Replay every logged turn and report agreement per tier
  --turns <T1,T2,...>    Replay only the listed turns
  --validate <T:M,...>   Check the logged move of each turn against the accepted ones

OPTIONS:
  --config <path>        Policy configuration (default: Snake.toml, then built-in defaults)
  --seed <u64>           Policy seed for turns whose log entry carries none
  --verbose              Log every replayed turn
  --help                 Show this message";

enum Mode {
    All,
    Turns(Vec<i32>),
    Validate(Vec<(i32, Vec<Direction>)>),
}

struct Options {
    log_file: String,
    mode: Mode,
    config_path: Option<String>,
    seed: Option<u64>,
    verbose: bool,
}

impl Options {
    /// Parses everything after the program name. `Ok(None)` means help was asked for.
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Option<Options>, String> {
        let mut log_file = None;
        let mut mode = None;
        let mut config_path = None;
        let mut seed = None;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| format!("{} requires an argument", flag))
            };
            match arg.as_str() {
                "--help" => return Ok(None),
                "--all" => mode = Some(Mode::All),
                "--turns" => {
                    let list = value("--turns")?;
                    mode = Some(Mode::Turns(
                        list.split(',').map(parse_turn).collect::<Result<_, _>>()?,
                    ));
                }
                "--validate" => {
                    let list = value("--validate")?;
                    mode = Some(Mode::Validate(
                        list.split(',')
                            .map(parse_expectation)
                            .collect::<Result<_, _>>()?,
                    ));
                }
                "--config" => config_path = Some(value("--config")?),
                "--seed" => {
                    let raw = value("--seed")?;
                    seed = Some(
                        raw.parse::<u64>()
                            .map_err(|e| format!("Invalid seed '{}': {}", raw, e))?,
                    );
                }
                "--verbose" => verbose = true,
                flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
                path => {
                    if log_file.is_some() {
                        return Err(format!("Unexpected argument '{}'", path));
                    }
                    log_file = Some(path.to_string());
                }
            }
        }

        let log_file = log_file.ok_or("Missing log file")?;
        let mode = mode.ok_or("Must specify --all, --turns or --validate")?;
        Ok(Some(Options {
            log_file,
            mode,
            config_path,
            seed,
            verbose,
        }))
    }

    fn config(&self) -> Result<Config, String> {
        let mut config = match &self.config_path {
            Some(path) => Config::from_file(path)?,
            None => Config::load_or_default(),
        };
        if self.seed.is_some() {
            config.policy.rng_seed = self.seed;
        }
        Ok(config)
    }
}

fn parse_turn(raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse()
        .map_err(|e| format!("Invalid turn number '{}': {}", raw.trim(), e))
}

/// `turn:move` or `turn:move|move`
fn parse_expectation(raw: &str) -> Result<(i32, Vec<Direction>), String> {
    let (turn, moves) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("Invalid expectation '{}', expected turn:move", raw.trim()))?;
    let accepted = moves
        .split('|')
        .map(|m| Direction::parse(m.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((parse_turn(turn)?, accepted))
}

fn run(options: Options) -> Result<(), String> {
    let engine = ReplayEngine::new(options.config()?, options.verbose);
    let entries: Vec<LogEntry> = engine.load_log_file(&options.log_file)?;
    if entries.is_empty() {
        return Err(format!("{} holds no log entries", options.log_file));
    }
    println!("Loaded {} turns from {}", entries.len(), options.log_file);

    match options.mode {
        Mode::All => {
            let results = engine.replay_all(&entries);
            engine.print_report(&entries, &results);
        }
        Mode::Turns(turns) => {
            let results = engine.replay_turns(&entries, &turns)?;
            engine.print_report(&entries, &results);
        }
        Mode::Validate(expected) => {
            engine.validate_expected_moves(&entries, &expected)?;
            println!("✓ {} expected move(s) validated", expected.len());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match Options::parse(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            eprintln!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}
