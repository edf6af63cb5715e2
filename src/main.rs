use anyhow::{Context, Result};
use ptrstyle::cli::{self, Cli, Mode};
use ptrstyle::config::{self, Config};
use ptrstyle::diff_formatter::DiffFormatter;
use ptrstyle::file_processor::{BatchSummary, FileProcessor};
use ptrstyle::file_selection::FileSelection;
use ptrstyle::vcs::{self, Vcs};
use ptrstyle::{logger, regression};
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    let mode = cli.mode();

    // `config --init` must work even when the existing file is broken.
    let config = match (&mode, config::load_config(cli.config.as_deref())) {
        (_, Ok(config)) => config,
        (Mode::Config { init: true, .. }, Err(e)) => {
            eprintln!("Warning: {:#}", e);
            Config::default()
        }
        (_, Err(e)) => return Err(e),
    };

    let _log_guard = logger::init_logging(cli.verbose, config.logging.debug)?;

    // Broken classification rules must never reach a file.
    regression::run_regression_suite().context("Regression cases failed; no files were touched")?;

    match mode {
        Mode::SelfTest => {
            println!("{} regression cases passed", regression::CASES.len());
        }
        Mode::Tree => restyle_tree(&cli, &config)?,
        Mode::Files(files) => restyle_paths(&cli, &config, &files)?,
        Mode::Config { show, init, force } => manage_config(&cli, &config, show, init, force)?,
    }

    Ok(())
}

fn restyle_tree(cli: &Cli, config: &Config) -> Result<()> {
    let root = std::env::current_dir().context("Cannot determine current directory")?;
    let vcs = Vcs::resolve(config.tree.vcs, &root);
    info!("Restyling tree at {} ({:?})", root.display(), vcs);

    let tracked = vcs::list_tracked_files(vcs, &root)?;
    let selection = FileSelection::new(&config.selection);
    let selected = selection.filter(tracked.iter().map(String::as_str));
    info!("{} of {} tracked files selected", selected.len(), tracked.len());

    let paths: Vec<PathBuf> = selected.into_iter().map(PathBuf::from).collect();
    restyle_paths(cli, config, &paths)
}

fn restyle_paths(cli: &Cli, config: &Config, paths: &[PathBuf]) -> Result<()> {
    let processor = FileProcessor::new(cli.dry_run);
    let jobs = cli.jobs.unwrap_or(config.processing.jobs);
    let results = run_with_jobs(jobs, || processor.restyle_files(paths))?;

    let context = cli.context.unwrap_or(config.processing.context_lines);
    let use_color = DiffFormatter::should_use_color();

    for (path, result) in &results {
        match result {
            Ok(report) if report.is_changed() => {
                println!("{}", DiffFormatter::format_status(report, processor.is_dry_run()));
                if cli.diff {
                    print!("{}", DiffFormatter::format_report(report, context, use_color));
                }
            }
            Ok(_) => {}
            Err(e) => eprintln!("Error processing {}: {:#}", path.display(), e),
        }
    }

    let summary = BatchSummary::from_results(&results);
    println!("{}", DiffFormatter::format_summary(&summary, processor.is_dry_run()));

    if summary.failed > 0 {
        anyhow::bail!("{} file(s) could not be restyled", summary.failed);
    }

    Ok(())
}

/// Run `work` on a dedicated pool of `jobs` threads, or the global pool when 0.
fn run_with_jobs<T, F>(jobs: usize, work: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    if jobs == 0 {
        return Ok(work());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build worker pool")?;

    Ok(pool.install(work))
}

fn manage_config(cli: &Cli, config: &Config, show: bool, init: bool, force: bool) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_file_path()?,
    };

    if init {
        if path.exists() && !force {
            anyhow::bail!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            );
        }
        config::save_default_config(&path)?;
        println!("Wrote {}", path.display());
    }

    if show || !init {
        let effective = if init {
            config::load_config(Some(&path))?
        } else {
            config.clone()
        };

        let status = if path.exists() { "" } else { " (not found, using defaults)" };
        println!("# Config file: {}{}", path.display(), status);
        if let Some(log_path) = logger::get_log_path() {
            println!("# Debug log: {}", log_path.display());
        }
        println!();
        print!(
            "{}",
            toml::to_string_pretty(&effective).context("Failed to serialize config")?
        );
    }

    Ok(())
}
