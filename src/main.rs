use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tapkit::batch::output_path;
use tapkit::{init_logging, BatchRunner, Config, InputFile, TapProcessor};

#[derive(Parser)]
#[command(name = "tapkit")]
#[command(version, about = "Thermal dwell insertion for hot-wire foam cutter G-code", long_about = None)]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert dwells into one or more G-code files
    Process {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Material id (configured default when omitted)
        #[arg(short, long)]
        material: Option<String>,

        /// Output directory (next to each input when omitted)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Rescale each file to this path length in mm
        #[arg(short, long)]
        desired_length: Option<f64>,

        /// Print the processed program to stdout instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Replace existing output files
        #[arg(long)]
        overwrite: bool,
    },

    /// List the available materials
    Materials,

    /// Print the Chebyshev path length of a file
    Measure {
        /// Input file
        file: PathBuf,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a configuration file with the default settings
    Init {
        /// Destination (platform config directory when omitted)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file location
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs)?;

    tracing::debug!(version = tapkit::VERSION, build_date = tapkit::BUILD_DATE, "starting");

    match cli.command {
        Commands::Process {
            files,
            material,
            output_dir,
            desired_length,
            stdout,
            overwrite,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let options = ProcessOptions {
                material,
                output_dir: output_dir.or_else(|| config.output.directory.clone()),
                desired_length,
                stdout,
                overwrite: overwrite || config.output.overwrite,
            };
            run_process(&config, &files, options).await
        }
        Commands::Materials => {
            let config = load_config(cli.config.as_deref())?;
            let library = config.library()?;
            for material in library.get_all_materials() {
                let marker = if material.id.as_str() == config.default_material {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{marker} {:<6} {:<20} F{:<6} {}",
                    material.id.as_str(),
                    material.name,
                    material.feed_rate,
                    material.tiers,
                );
            }
            Ok(())
        }
        Commands::Measure { file } => {
            let input = InputFile::read(&file).await?;
            let length = tapkit::measure_path_length(input.text()?);
            println!("{length:.4}");
            Ok(())
        }
        Commands::Config {
            action: ConfigAction::Path,
        } => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::default_path()?,
            };
            println!("{}", path.display());
            Ok(())
        }
        Commands::Config {
            action: ConfigAction::Init { path, force },
        } => {
            let path = match path.or(cli.config) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to replace it)",
                    path.display()
                );
            }
            Config::default()
                .save_to_file(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

struct ProcessOptions {
    material: Option<String>,
    output_dir: Option<PathBuf>,
    desired_length: Option<f64>,
    stdout: bool,
    overwrite: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    Config::load_or_default(&path).with_context(|| format!("loading {}", path.display()))
}

async fn run_process(
    config: &Config,
    files: &[PathBuf],
    options: ProcessOptions,
) -> anyhow::Result<()> {
    let material = config.material(options.material.as_deref())?;
    tracing::info!(material = %material.id, files = files.len(), "processing");

    let mut inputs = Vec::with_capacity(files.len());
    for file in files {
        inputs.push(InputFile::read(file).await?);
    }

    let mut runner = BatchRunner::new(TapProcessor::new(material, config.template.clone()));
    if let Some(desired) = options.desired_length {
        runner = runner.with_desired_length(desired);
    }

    if let Some(dir) = &options.output_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let jobs = runner.run(inputs).await;
    let mut failed = 0usize;

    for (job, input_path) in jobs.iter().zip(files) {
        let Some(result) = &job.result else {
            failed += 1;
            eprintln!(
                "{}: {}",
                job.name,
                job.error.as_deref().unwrap_or("unknown error")
            );
            continue;
        };

        let stats = &result.statistics;
        let summary = if stats.is_reprocessed_file {
            format!("{} -> {} (already processed)", job.name, result.filename)
        } else {
            format!(
                "{} -> {}: {:.2} mm, {} dwells, {} removed, {}",
                job.name,
                result.filename,
                stats.total_distance,
                stats.pauses_inserted.total,
                stats.removed_commands.total,
                stats.cut_time()
            )
        };

        if options.stdout {
            print!("{}", result.processed_content);
            eprintln!("{summary}");
            continue;
        }

        let target = output_path(
            input_path,
            options.output_dir.as_deref(),
            &result.filename,
        );
        if target.exists() && !options.overwrite {
            tracing::warn!(path = %target.display(), "output exists, skipped");
            eprintln!("{}: skipped, {} exists", job.name, target.display());
            continue;
        }

        tokio::fs::write(&target, &result.processed_content)
            .await
            .with_context(|| format!("writing {}", target.display()))?;
        println!("{summary}");
    }

    if failed > 0 {
        bail!("{failed} of {} files failed", jobs.len());
    }
    Ok(())
}
