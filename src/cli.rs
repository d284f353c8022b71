//! CLI implementation for pickset.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::config::{self, OptionFile, PicksetConfig};
use crate::options::{OptionEntry, OptionList};
use crate::picker::{self, PickSettings};

/// Build version string with git info for local builds
static VERSION: LazyLock<String> = LazyLock::new(|| {
    let version = env!("CARGO_PKG_VERSION");

    // Get short SHA, branch, and dirty status
    let sha = option_env!("VERGEN_GIT_SHA").map(|s| &s[..7.min(s.len())]);
    let branch = option_env!("VERGEN_GIT_BRANCH").filter(|b| *b != "main" && *b != "master");
    let dirty = option_env!("VERGEN_GIT_DIRTY") == Some("true");

    match (sha, branch, dirty) {
        (Some(sha), Some(branch), true) => format!("{version} ({branch} {sha}-dirty)"),
        (Some(sha), Some(branch), false) => format!("{version} ({branch} {sha})"),
        (Some(sha), None, true) => format!("{version} ({sha}-dirty)"),
        (Some(sha), None, false) => format!("{version} ({sha})"),
        (None, _, _) => version.to_string(),
    }
});

/// Version plus build time, for `--version`
static LONG_VERSION: LazyLock<String> =
    LazyLock::new(|| match option_env!("VERGEN_BUILD_TIMESTAMP") {
        Some(built) => format!("{}\nbuilt {built}", *VERSION),
        None => VERSION.clone(),
    });

fn version_string() -> &'static str {
    &VERSION
}

fn long_version_string() -> &'static str {
    &LONG_VERSION
}

/// Pick values from a list with staged multi-selection
#[derive(Parser)]
#[command(name = "pickset")]
#[command(version = version_string(), long_version = long_version_string(), about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick values from an option file
    ///
    /// Prints the committed value, one per line. Outside a terminal the
    /// initial value is printed unchanged.
    Pick {
        /// Option file (CCL)
        file: PathBuf,

        /// Initially selected value (can be specified multiple times)
        #[arg(short, long = "value", value_name = "VALUE")]
        values: Vec<String>,

        /// Value meaning "no filter" (can be specified multiple times)
        #[arg(short, long = "default", value_name = "VALUE")]
        defaults: Vec<String>,

        /// Disable multi-selection: every pick replaces the selection
        #[arg(long)]
        single: bool,

        /// Refuse to apply selections larger than this
        #[arg(short, long, value_name = "N")]
        max: Option<usize>,

        /// Prompt shown above the list
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// List the options in an option file
    Options {
        /// Option file (CCL)
        file: PathBuf,

        /// Only show options matching this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the global config file location
    Path,

    /// Show the effective configuration for the current directory
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pick {
            file,
            values,
            defaults,
            single,
            max,
            prompt,
        } => {
            let config = config::load_config(Some(Path::new(".")))?;
            pick_command(&file, &config, values, defaults, single, max, prompt)?;
        }
        Commands::Options { file, filter } => {
            list_options(&file, filter.as_deref())?;
        }
        Commands::Config { command } => match command {
            ConfigCommand::Path => {
                println!("{}", config::global_config_path()?.display());
            }
            ConfigCommand::Show => {
                let config = config::load_config(Some(Path::new(".")))?;
                print!("{}", config::generate_config_ccl(&config));
            }
        },
    }

    Ok(())
}

fn load_options(file: &Path) -> Result<(OptionFile, OptionList<String>)> {
    let option_file = OptionFile::load(file)?;
    let options = option_file
        .to_option_list()
        .with_context(|| format!("Invalid option file: {}", file.display()))?;
    Ok((option_file, options))
}

fn pick_command(
    file: &Path,
    config: &PicksetConfig,
    values: Vec<String>,
    defaults: Vec<String>,
    single: bool,
    max: Option<usize>,
    prompt: Option<String>,
) -> Result<()> {
    let (option_file, options) = load_options(file)?;

    let value = if values.is_empty() {
        option_file.value
    } else {
        values
    };
    let default_value = if defaults.is_empty() {
        option_file.default
    } else {
        defaults
    };

    for v in value.iter().chain(&default_value) {
        if !options.contains(v) {
            warn!("'{v}' is not one of the options in {}", file.display());
        }
    }

    let multiple = !single && config.multiple();
    let max_selected = max.or(config.max_selected);
    if max_selected == Some(0) {
        bail!("--max must be at least 1");
    }

    let settings = PickSettings {
        prompt: prompt.unwrap_or_else(|| format!("Select from {}", file.display())),
        value,
        default_value,
        multiple,
        max_selected,
        platform: config.platform()?,
        page_size: config.page_size(),
    };

    let result = picker::pick(options, settings)?;
    if result.cancelled {
        eprintln!("{}", "Selection cancelled".yellow());
        return Ok(());
    }

    for v in &result.value {
        println!("{v}");
    }
    Ok(())
}

fn list_options(file: &Path, filter: Option<&str>) -> Result<()> {
    let (_, options) = load_options(file)?;
    let query = filter.unwrap_or("");
    let visible = options.filtered_values(query);

    if visible.is_empty() {
        println!("{}", "No options match the filter.".dimmed());
        return Ok(());
    }

    for entry in options.entries() {
        match entry {
            OptionEntry::Option(option) => {
                if visible.contains(&option.value) {
                    print_option(&option.value, &option.label, option.details.as_deref(), "");
                }
            }
            OptionEntry::Section(section) => {
                let members: Vec<_> = section
                    .options
                    .iter()
                    .filter(|o| visible.contains(&o.value))
                    .collect();
                if members.is_empty() {
                    continue;
                }
                println!("{}", section.label.bold());
                for option in members {
                    print_option(&option.value, &option.label, option.details.as_deref(), "  ");
                }
            }
        }
    }

    Ok(())
}

fn print_option(value: &str, label: &str, details: Option<&str>, indent: &str) {
    let mut line = format!("{indent}{}", value.cyan());
    if label != value {
        line.push_str(&format!("  {label}"));
    }
    if let Some(details) = details {
        line.push_str(&format!("  {}", details.dimmed()));
    }
    println!("{line}");
}
