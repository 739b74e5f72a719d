mod command;
mod paths;

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use combobox::prelude::*;
use combobox::render;
use combobox::WidgetError;
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use command::{Command, HELP};

/// Mount a combobox on a select field and drive it from stdin.
#[derive(Parser, Debug)]
#[command(name = "combobox", version)]
struct Args {
    /// Endpoint returning `{"options": [{"label": ..., "value": ...}]}`
    #[arg(long, env = "COMBOBOX_SOURCE_URL")]
    source_url: Option<String>,

    /// JSON file with combobox settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial option of the backing select, as `value=label` (repeatable)
    #[arg(long = "option", value_name = "VALUE=LABEL")]
    options: Vec<String>,

    /// Value selected in the backing select before the widget mounts
    #[arg(long)]
    selected: Option<String>,

    /// Name of the backing select field
    #[arg(long, default_value = "value")]
    name: String,

    /// Option fetch timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log file (defaults to the platform cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("logger already initialized: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("invalid --option {0:?}, expected VALUE=LABEL")]
    BadOption(String),
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    let Some(path) = args.log_file.clone().or_else(paths::log_file) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = File::create(&path)?;
    WriteLogger::init(args.log_level.into(), Config::default(), log_file)?;
    Ok(())
}

fn load_config(args: &Args) -> Result<ComboboxConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw).map_err(|source| CliError::Config {
                path: path.clone(),
                source,
            })?
        }
        None => ComboboxConfig::default(),
    };

    if let Some(url) = &args.source_url {
        config.source_url = Some(url.clone());
    }
    if let Some(ms) = args.timeout_ms {
        config = config.timeout(Duration::from_millis(ms));
    }
    if config.id.is_none() {
        config.id = Some(format!("{}-combobox", args.name));
    }
    Ok(config)
}

fn build_control(args: &Args) -> Result<SelectControl, CliError> {
    let mut control = SelectControl::new(&args.name);
    for raw in &args.options {
        let (value, label) = raw
            .split_once('=')
            .ok_or_else(|| CliError::BadOption(raw.clone()))?;
        control.push(SelectOption::new(label, value));
    }
    if let Some(value) = &args.selected {
        control.set_value(value);
    }
    Ok(control)
}

fn print_suggestions(combobox: &Combobox) {
    if !combobox.is_open() {
        println!("(menu closed)");
        return;
    }
    for (i, suggestion) in combobox.suggestions().iter().enumerate() {
        if suggestion.is_placeholder() {
            println!("   {}", suggestion.label);
        } else {
            println!("{:>2} {}", i + 1, suggestion.label);
        }
    }
}

fn print_state(combobox: &Combobox) {
    let load = match combobox.load_state() {
        LoadState::Loading => "loading".to_string(),
        LoadState::Loaded => "loaded".to_string(),
        LoadState::Failed(e) => format!("failed: {}", e),
    };
    println!(
        "text={:?} value={:?} open={} focused={} options={}",
        combobox.text(),
        combobox.value(),
        combobox.is_open(),
        combobox.is_focused(),
        load
    );
}

/// Apply one command. Returns `false` when the session should end.
async fn apply(combobox: &Combobox, command: Command) -> bool {
    match command {
        Command::Type(text) => {
            combobox.on_input(&text);
            print_suggestions(combobox);
        }
        Command::Focus => {
            combobox.on_focus();
            print_suggestions(combobox);
        }
        Command::Blur => {
            combobox.on_blur();
            print_state(combobox);
        }
        Command::Commit(text) => {
            combobox.on_commit(&text);
            print_state(combobox);
        }
        Command::Pick(index) => {
            if !combobox.pick_at(index) {
                println!("nothing to pick at {}", index + 1);
            }
        }
        Command::Press => combobox.toggle_press(),
        Command::Click => {
            combobox.toggle_click();
            print_suggestions(combobox);
        }
        Command::Toggle => {
            combobox.toggle_press();
            combobox.toggle_click();
            print_suggestions(combobox);
        }
        Command::Wait => {
            combobox.ready().await;
            print_state(combobox);
            print_suggestions(combobox);
        }
        Command::Show => println!("{}", render::render(combobox)),
        Command::State => print_state(combobox),
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

async fn run(args: Args) -> Result<(), CliError> {
    init_logging(&args)?;

    let config = load_config(&args)?;
    let control = build_control(&args)?;
    let combobox = Combobox::create(control, config)?;
    log::info!("Mounted combobox {}", combobox.id());

    combobox.on(EventKind::Selected, |event| {
        let ComboboxEvent::Selected(selected) = event;
        println!(
            "selected: {} = {:?}",
            selected.option.value, selected.option.label
        );
    });

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !apply(&combobox, command).await {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => println!("{}", e),
        }
    }

    let control = combobox.destroy()?;
    println!("{}", render::render_control(&control));
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
