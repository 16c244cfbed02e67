//! `featsynth config` command - Configuration management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::analyze::parse_threshold;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (see `featsynth config keys`)
    pub key: String,

    /// Value to set (comma-separated for batch_extensions)
    pub value: String,

    /// Set in global (user) config instead of ./.featsynth.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of ./.featsynth.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    (
        "confidence_threshold",
        "Threshold reported when a request has none (0..1)",
    ),
    (
        "default_format",
        "Default output format (yaml, json, tsv, csv, md)",
    ),
    (
        "batch_extensions",
        "Comma-separated extensions scanned by `featsynth batch`",
    ),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        check_key(key)?;
        return match get_config_value(&config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    match global.format {
        Some(format @ (OutputFormat::Json | OutputFormat::Yaml)) => {
            print!("{}", crate::cli::output::to_structured(&config, format)?);
        }
        _ => {
            println!("{}", style("Effective Configuration").bold().underlined());
            println!();
            for (key, _) in VALID_KEYS {
                print_config_value(key, get_config_value(&config, key).as_deref());
            }
            println!();
            println!("{}", style("Config Sources (in priority order):").dim());
            println!("  1. Environment variables (FEATSYNTH_CONFIDENCE_THRESHOLD, FEATSYNTH_FORMAT)");
            println!("  2. Local config (./.featsynth.yaml)");
            println!("  3. Global config (~/.config/featsynth/config.yaml)");
        }
    }

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let config_path = config_path(args.global)?;
    let value = parse_value(&args.key, &args.value)?;

    let mut config_map = read_mapping(&config_path)?;
    if let serde_yml::Value::Mapping(map) = &mut config_map {
        map.insert(serde_yml::Value::String(args.key.clone()), value);
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Set {} {} {} in {}",
            style("✓").green(),
            style(&args.key).cyan(),
            style("→").dim(),
            style(&args.value).yellow(),
            config_path.display()
        );
    }

    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    let config_path = config_path(args.global)?;

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_mapping(&config_path)?;
    let removed = match &mut config_map {
        serde_yml::Value::Mapping(map) => {
            let key = serde_yml::Value::String(args.key.clone());
            map.remove(&key).is_some()
        }
        _ => false,
    };

    if !removed {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Removed {} from {}",
            style("✓").green(),
            style(&args.key).cyan(),
            config_path.display()
        );
    }

    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    if let Some(global_path) = Config::global_config_path() {
        print_path("Global:", &global_path);
    } else {
        println!(
            "  {} {}",
            style("Global:").cyan(),
            style("(no config directory on this platform)").dim()
        );
    }
    print_path("Local: ", &Config::local_config_path());

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<22} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'featsynth config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn config_path(global: bool) -> Result<PathBuf> {
    if global {
        Config::global_config_path()
            .ok_or_else(|| miette::miette!("Could not determine global config directory"))
    } else {
        Ok(Config::local_config_path())
    }
}

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "run `featsynth config keys` to list valid keys",
            "Unknown configuration key '{}'",
            key
        ))
    }
}

/// Validate a raw CLI value and convert it to its YAML form
fn parse_value(key: &str, raw: &str) -> Result<serde_yml::Value> {
    check_key(key)?;
    match key {
        "confidence_threshold" => {
            let value = parse_threshold(raw).map_err(|e| miette::miette!("{}", e))?;
            serde_yml::to_value(value).into_diagnostic()
        }
        "default_format" => {
            let format = OutputFormat::from_str(raw, true)
                .map_err(|_| miette::miette!("'{}' is not an output format", raw))?;
            let name = format
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_else(|| raw.to_lowercase());
            Ok(serde_yml::Value::String(name))
        }
        _ => {
            let exts: Vec<serde_yml::Value> = raw
                .split(',')
                .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .map(serde_yml::Value::String)
                .collect();
            if exts.is_empty() {
                return Err(miette::miette!("No extensions given"));
            }
            Ok(serde_yml::Value::Sequence(exts))
        }
    }
}

/// Load a config file as a YAML mapping, empty when missing or blank
///
/// A file that does not parse, or is not a mapping, is an error so it is
/// never overwritten.
fn read_mapping(path: &Path) -> Result<serde_yml::Value> {
    if !path.exists() {
        return Ok(serde_yml::Value::Mapping(Default::default()));
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    let parsed: serde_yml::Value = serde_yml::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Malformed config file {}", path.display()))?;
    match parsed {
        serde_yml::Value::Null => Ok(serde_yml::Value::Mapping(Default::default())),
        serde_yml::Value::Mapping(_) => Ok(parsed),
        _ => Err(miette::miette!(
            "Config file {} is not a key/value mapping",
            path.display()
        )),
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "confidence_threshold" => config.confidence_threshold.map(|t| t.to_string()),
        "default_format" => config.default_format.clone(),
        "batch_extensions" => Some(config.batch_extensions().join(",")),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn print_path(label: &str, path: &Path) {
    println!("  {} {}", style(label).cyan(), path.display());
    if path.exists() {
        println!("         {}", style("(exists)").green());
    } else {
        println!("         {}", style("(not created)").dim());
    }
}
