//! CLI definition, tracing setup, and the compile command.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use stepdoc_core::pipeline::{CompiledTutorial, ProgressReporter, compile_tutorial};
use stepdoc_core::resources::FsResources;
use stepdoc_core::writer::write_documents;
use stepdoc_shared::{AppConfig, StepId, load_config, render_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// stepdoc — turn tutorial step directories into linked markdown pages.
#[derive(Parser, Debug)]
#[command(
    name = "stepdoc",
    version,
    about = "Compile step-by-step tutorial directories into linked markdown pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Step directories in display order. Defaults to the current directory.
    #[arg(value_name = "STEP_DIR")]
    pub steps: Vec<String>,

    /// Directory to write the markdown files to (overrides config).
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Overview directory (overrides config).
    #[arg(long, value_name = "DIR")]
    pub overview: Option<String>,

    /// Config file (defaults to ./stepdoc.toml, then ~/.stepdoc/stepdoc.toml).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Assemble everything but write nothing; list the documents instead.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "stepdoc=info",
        1 => "stepdoc=debug",
        _ => "stepdoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    if cli.print_config {
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    let cwd = std::env::current_dir()
        .map_err(|e| eyre!("cannot determine working directory: {e}"))?;
    let steps = resolve_steps(&cli.steps, &cwd);

    info!(
        steps = steps.len(),
        overview = %config.layout.overview_dir,
        out_dir = %config.output.dir.display(),
        "compiling tutorial"
    );

    let reporter = CliProgress::new();
    let compiled = compile_tutorial(&FsResources, &config.layout, &steps, &reporter)?;

    let written = match emit(&compiled, &config.output.dir, cli.dry_run)? {
        Emitted::Planned(listing) => {
            print!("{listing}");
            return Ok(());
        }
        Emitted::Written(paths) => paths,
    };

    println!();
    println!("  Tutorial compiled!");
    println!("  Title:     {}", compiled.overview.name);
    println!("  Steps:     {}", compiled.step_count);
    println!("  Documents: {}", written.len());
    println!("  Output:    {}", config.output.dir.display());
    println!("  Time:      {:.1}ms", compiled.elapsed.as_secs_f64() * 1000.0);
    println!();

    Ok(())
}

/// Load the config file and apply CLI overrides.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let config = load_config(cli.config.as_deref())?;
    Ok(apply_overrides(config, cli))
}

/// CLI flags win over whatever the config file says.
fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(dir) = &cli.out_dir {
        config.output.dir = dir.clone();
    }
    if let Some(overview) = &cli.overview {
        config.layout.overview_dir = overview.clone();
    }
    config
}

/// What [`emit`] did with the compiled documents.
enum Emitted {
    /// Dry run: the listing of documents that would have been written.
    Planned(String),
    /// Paths of the written documents.
    Written(Vec<PathBuf>),
}

/// Write the documents, or with `dry_run` only describe them.
fn emit(compiled: &CompiledTutorial, out_dir: &Path, dry_run: bool) -> Result<Emitted> {
    if dry_run {
        return Ok(Emitted::Planned(dry_run_listing(compiled, out_dir)));
    }
    Ok(Emitted::Written(write_documents(out_dir, &compiled.documents)?))
}

fn dry_run_listing(compiled: &CompiledTutorial, out_dir: &Path) -> String {
    let mut out = format!(
        "\n  Dry run, nothing written. Target directory {}:\n",
        out_dir.display()
    );
    for doc in &compiled.documents {
        out.push_str(&format!(
            "    {:<32} {:>8} bytes\n",
            doc.filename,
            doc.content.len()
        ));
    }
    out.push('\n');
    out
}

/// Map positional arguments to steps; no arguments means the current directory.
fn resolve_steps(args: &[String], cwd: &Path) -> Vec<StepId> {
    if args.is_empty() {
        vec![StepId::current_dir(cwd)]
    } else {
        args.iter().map(|arg| StepId::from_arg(arg)).collect()
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn step_assembled(&self, id: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Assembled [{current}/{total}] {id}"));
    }

    fn done(&self, _result: &CompiledTutorial) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // Errors skip `done`; don't leave the spinner on screen.
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use stepdoc_shared::{Document, Overview};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_argument_reads_the_environment() {
        let cmd = Cli::command();
        let from_env: Vec<&str> = cmd
            .get_arguments()
            .filter(|arg| arg.get_env().is_some())
            .map(|arg| arg.get_id().as_str())
            .collect();
        assert!(from_env.is_empty(), "env-backed args: {from_env:?}");
    }

    #[test]
    fn parses_positional_steps_in_order() {
        let cli = Cli::try_parse_from(["stepdoc", "step2", "step1", "--out-dir", "site"]).unwrap();
        assert_eq!(cli.steps, ["step2", "step1"]);
        assert_eq!(cli.out_dir, Some(PathBuf::from("site")));
        assert!(!cli.dry_run);
    }

    #[test]
    fn no_arguments_means_current_directory() {
        let steps = resolve_steps(&[], Path::new("/work/tutorial/step1"));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].id, "step1");
        assert_eq!(steps[0].dir, PathBuf::from("."));
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stepdoc-cli-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn compiled() -> CompiledTutorial {
        CompiledTutorial {
            overview: Overview {
                name: "My Tutorial".into(),
                body: String::new(),
            },
            documents: vec![
                Document {
                    filename: "out_s1.md".into(),
                    content: "one".into(),
                },
                Document {
                    filename: "index.md".into(),
                    content: "index".into(),
                },
            ],
            step_count: 1,
            elapsed: std::time::Duration::ZERO,
        }
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = temp_dir();
        let file = tmp.join("stepdoc.toml");
        std::fs::write(&file, "[layout]\noverview_dir = \"intro\"\n\n[output]\ndir = \"docs\"\n").unwrap();
        let file_arg = file.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["stepdoc", "-c", file_arg.as_str()]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.layout.overview_dir, "intro");
        assert_eq!(config.output.dir, PathBuf::from("docs"));

        let cli = Cli::try_parse_from([
            "stepdoc",
            "-c",
            file_arg.as_str(),
            "--out-dir",
            "site",
            "--overview",
            "about",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.layout.overview_dir, "about");
        assert_eq!(config.output.dir, PathBuf::from("site"));
        assert_eq!(config.layout.description_file, "desc.txt");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn dry_run_lists_and_writes_nothing() {
        let tmp = temp_dir();
        let out = tmp.join("site");

        let emitted = emit(&compiled(), &out, true).unwrap();
        let Emitted::Planned(listing) = emitted else {
            panic!("dry run wrote documents");
        };
        assert!(listing.contains("out_s1.md"));
        assert!(listing.contains("index.md"));
        assert!(!out.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn emit_writes_documents() {
        let tmp = temp_dir();
        let out = tmp.join("site");

        let Emitted::Written(paths) = emit(&compiled(), &out, false).unwrap() else {
            panic!("documents were not written");
        };
        assert_eq!(paths, [out.join("out_s1.md"), out.join("index.md")]);
        assert_eq!(std::fs::read_to_string(out.join("index.md")).unwrap(), "index");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn arguments_keep_order() {
        let args = vec!["b".to_string(), "a/".to_string()];
        let steps = resolve_steps(&args, Path::new("/ignored"));
        let ids: Vec<&str> = steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
