//! Command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use polint::config::{DEFAULT_FUNCTION, DEFAULT_LOCALE_SUBDIR};
use polint::diagnostics::Reporter;
use polint::{GitLinkReporter, LintConfig, Linter, PlainReporter, RunSummary};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReporterKind {
    /// `file:line:col:LEVEL: message`
    Plain,
    /// Checklist lines linking to the line on the git remote
    Github,
}

/// Check gettext catalogs and the lookup calls that use them.
#[derive(Parser, Debug)]
#[command(name = "polint", version, about)]
struct Cli {
    /// Source tree to scan for lookup calls
    #[arg(long)]
    src: Option<PathBuf>,

    /// Plugin directory holding a locale tree (repeatable)
    #[arg(long = "plugin", value_name = "DIR")]
    plugins: Vec<PathBuf>,

    /// Prefix removed from file names in plain output
    #[arg(long, default_value = "")]
    strip_prefix: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReporterKind::Plain)]
    reporter: ReporterKind,

    /// Name of the translation lookup function
    #[arg(long, default_value = DEFAULT_FUNCTION)]
    function: String,

    /// Source file extension to scan, without the dot (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Locale root relative to each plugin directory
    #[arg(long, default_value = DEFAULT_LOCALE_SUBDIR)]
    locale_subdir: String,

    /// Parse and scan files in parallel
    #[arg(long)]
    parallel: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Trace every catalog token and record
    #[arg(long)]
    parse_trace: bool,
}

impl Cli {
    /// Plugins in the order given, repeats dropped.
    fn unique_plugins(&self) -> Vec<PathBuf> {
        let mut seen = Vec::with_capacity(self.plugins.len());
        for plugin in &self.plugins {
            if !seen.contains(plugin) {
                seen.push(plugin.clone());
            }
        }
        seen
    }

    fn config(&self) -> LintConfig {
        LintConfig::new()
            .with_lookup_function(self.function.clone())
            .with_source_extensions(self.extensions.iter().cloned())
            .with_locale_subdir(self.locale_subdir.clone())
            .with_parallel(self.parallel)
            .with_parse_trace(self.parse_trace)
    }

    fn log_filter(&self) -> String {
        let mut filter = String::from(if self.verbose { "polint=debug" } else { "polint=info" });
        if self.parse_trace {
            filter.push_str(",polint::catalog=trace");
        }
        filter
    }
}

fn init_tracing(default_filter: String) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let plugins = cli.unique_plugins();
    let config = cli.config();
    let reporter: Box<dyn Reporter> = match cli.reporter {
        ReporterKind::Plain => Box::new(PlainReporter::stdout(cli.strip_prefix.clone())),
        ReporterKind::Github => Box::new(GitLinkReporter::stdout(cli.strip_prefix.clone())),
    };
    let mut linter = Linter::new(config, reporter);
    linter
        .run(&plugins, cli.src.as_deref())
        .context("lint run aborted")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_filter());
    tracing::info!(
        plugins = cli.plugins.len(),
        src = ?cli.src,
        reporter = ?cli.reporter,
        "starting polint"
    );

    match run(&cli) {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
