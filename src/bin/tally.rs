//! Tally CLI binary.
//!
//! Token frequency histograms for files and standard input.
//!
//! # Commands
//!
//! - `dump` - Print the full token -> count mapping
//! - `all` - Print every distinct token
//! - `top` - Print the most frequent tokens
//! - `bottom` - Print the least frequent tokens

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tally::{count_sources, render, Config, OutputFormat, Query, Source, VERSION};

#[derive(Parser)]
#[command(name = "tally")]
#[command(version = VERSION)]
#[command(about = "Tally - count bytes, words or lines in files", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the frequency distribution of tokens
    Dump {
        #[command(flatten)]
        count: CountArgs,
    },

    /// All the distinct tokens
    All {
        #[command(flatten)]
        count: CountArgs,

        /// Sort values in lexicographic order
        #[arg(short, long, conflicts_with = "no_sort")]
        sort: bool,

        /// Do not sort, even if sorting is configured
        #[arg(long)]
        no_sort: bool,
    },

    /// The most frequent tokens
    Top {
        #[command(flatten)]
        count: CountArgs,

        /// Number of values to return
        #[arg(short, long, allow_negative_numbers = true)]
        number: Option<i64>,

        /// Minimum count
        #[arg(short = 'm', long, allow_negative_numbers = true)]
        minimum: Option<i64>,

        /// Sort values in descending order before the values are chosen
        #[arg(short, long, conflicts_with = "no_sort")]
        sort: bool,

        /// Do not sort, even if sorting is configured
        #[arg(long)]
        no_sort: bool,
    },

    /// The least frequent tokens
    Bottom {
        #[command(flatten)]
        count: CountArgs,

        /// Number of values to return
        #[arg(short, long, allow_negative_numbers = true)]
        number: Option<i64>,

        /// Maximum count (negative: no limit)
        #[arg(short = 'm', long, allow_negative_numbers = true)]
        maximum: Option<i64>,

        /// Sort values in ascending order before the values are chosen
        #[arg(short, long, conflicts_with = "no_sort")]
        sort: bool,

        /// Do not sort, even if sorting is configured
        #[arg(long)]
        no_sort: bool,
    },
}

/// Options shared by every counting command
#[derive(Args)]
struct CountArgs {
    /// Sources to read (- or stdin for standard input)
    #[arg(value_name = "FILE", required = true)]
    sources: Vec<String>,

    /// Count bytes
    #[arg(short, long)]
    bytes: bool,

    /// Count words
    #[arg(short, long)]
    words: bool,

    /// Count lines
    #[arg(short, long)]
    lines: bool,

    /// Skip sources that cannot be opened or read
    #[arg(short = 'e', long)]
    skip_errors: bool,

    /// JSON output
    #[arg(short, long, conflicts_with = "yaml")]
    json: bool,

    /// YAML output
    #[arg(short, long)]
    yaml: bool,
}

impl CountArgs {
    /// Layer command-line switches over `config`.
    fn apply(&self, config: &mut Config) {
        // Any split flag on the command line replaces the configured mode
        if self.bytes || self.words || self.lines {
            config.split.bytes = self.bytes;
            config.split.words = self.words;
            config.split.lines = self.lines;
        }
        if self.skip_errors {
            config.input.skip_errors = true;
        }
        if self.json {
            config.output.format = OutputFormat::Json;
        } else if self.yaml {
            config.output.format = OutputFormat::Yaml;
        }
    }

    fn sources(&self) -> Vec<Source> {
        self.sources.iter().map(|s| Source::from(s.as_str())).collect()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())
        .and_then(Config::apply_env)
        .context("error loading configuration")?;

    match cli.command {
        Commands::Dump { count } => cmd_dump(&mut config, &count),

        Commands::All {
            count,
            sort,
            no_sort,
        } => cmd_all(&mut config, &count, sort_flag(sort, no_sort)),

        Commands::Top {
            count,
            number,
            minimum,
            sort,
            no_sort,
        } => cmd_top(&mut config, &count, number, minimum, sort_flag(sort, no_sort)),

        Commands::Bottom {
            count,
            number,
            maximum,
            sort,
            no_sort,
        } => cmd_bottom(&mut config, &count, number, maximum, sort_flag(sort, no_sort)),
    }
}

/// `--sort` or `--no-sort`; `None` keeps the configured ordering.
fn sort_flag(sort: bool, no_sort: bool) -> Option<bool> {
    match (sort, no_sort) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn cmd_dump(config: &mut Config, count: &CountArgs) -> anyhow::Result<()> {
    count.apply(config);
    run(config, count, Query::Dump)
}

fn cmd_all(config: &mut Config, count: &CountArgs, sort: Option<bool>) -> anyhow::Result<()> {
    count.apply(config);
    if let Some(sort) = sort {
        config.output.sort = sort;
    }
    let query = config.all_query();
    run(config, count, query)
}

fn cmd_top(
    config: &mut Config,
    count: &CountArgs,
    number: Option<i64>,
    minimum: Option<i64>,
    sort: Option<bool>,
) -> anyhow::Result<()> {
    count.apply(config);
    if let Some(number) = number {
        config.selection.number = number;
    }
    if let Some(minimum) = minimum {
        config.selection.minimum = minimum;
    }
    if let Some(sort) = sort {
        config.output.sort = sort;
    }
    let query = config.top_query()?;
    run(config, count, query)
}

fn cmd_bottom(
    config: &mut Config,
    count: &CountArgs,
    number: Option<i64>,
    maximum: Option<i64>,
    sort: Option<bool>,
) -> anyhow::Result<()> {
    count.apply(config);
    if let Some(number) = number {
        config.selection.number = number;
    }
    if let Some(maximum) = maximum {
        config.selection.maximum = maximum;
    }
    if let Some(sort) = sort {
        config.output.sort = sort;
    }
    let query = config.bottom_query()?;
    run(config, count, query)
}

/// Count every source, run `query` and print the selection.
fn run(config: &Config, count: &CountArgs, query: Query) -> anyhow::Result<()> {
    let mode = config.split_mode()?;
    let sources = count.sources();

    tracing::debug!(
        "Running {} over {} sources ({}, skip errors: {})",
        query,
        sources.len(),
        mode,
        config.input.skip_errors
    );

    let counter = count_sources(&sources, mode, config.input.skip_errors)
        .context("error counting tokens")?;

    let selection = query.run(&counter);
    let output = render(&selection, config.output.format).context("error printing values")?;
    emit(&mut std::io::stdout().lock(), &output)
}

/// Write one rendered selection; a closed pipe is an error, not a panic.
fn emit(out: &mut impl Write, output: &str) -> anyhow::Result<()> {
    writeln!(out, "{output}")
        .and_then(|()| out.flush())
        .context("error writing output")
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_appends_newline() {
        let mut out = Vec::new();
        emit(&mut out, r#"["a","b"]"#).unwrap();
        assert_eq!(out, b"[\"a\",\"b\"]\n");
    }

    #[test]
    fn test_emit_reports_closed_pipe() {
        let err = emit(&mut ClosedPipe, "x").unwrap_err();
        assert_eq!(err.to_string(), "error writing output");
    }

    #[test]
    fn test_sort_flag() {
        assert_eq!(sort_flag(false, false), None);
        assert_eq!(sort_flag(true, false), Some(true));
        assert_eq!(sort_flag(false, true), Some(false));
    }

    #[test]
    fn test_no_sort_overrides_config() {
        let cli = Cli::try_parse_from(["tally", "all", "-w", "--no-sort", "f.txt"]).unwrap();
        let Commands::All {
            count,
            sort,
            no_sort,
        } = cli.command
        else {
            panic!("expected all");
        };

        let mut config = Config::default();
        config.output.sort = true;
        count.apply(&mut config);
        if let Some(sort) = sort_flag(sort, no_sort) {
            config.output.sort = sort;
        }
        assert_eq!(config.all_query(), Query::All { sort: false });
    }

    #[test]
    fn test_sort_conflicts_with_no_sort() {
        assert!(Cli::try_parse_from(["tally", "top", "-w", "-s", "--no-sort", "f.txt"]).is_err());
        assert!(Cli::try_parse_from(["tally", "bottom", "-l", "--no-sort", "f.txt"]).is_ok());
    }
}
