use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use depsweep_unused::Config;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "depsweep")]
#[command(about = "Find declared dependencies that a JavaScript/TypeScript project never imports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report which package.json dependencies are used and which look unused
    Unused(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Unused(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!(
                "Running unused dependency check (dev: {}, using {} threads)",
                cfg.dev, num_threads
            );
            debug!("Config: root={:?}, ext={:?}, exclude={:?}", cfg.root, cfg.extensions, cfg.exclude);

            let root = depsweep_core::resolve_root(cfg.root.as_deref())?;
            let json = cfg.json;
            let result = depsweep_unused::run_unused_check(Config { root: Some(root.clone()), ..cfg })?;
            debug!("Found {} unused dependencies", result.unused.len());

            if json {
                depsweep_unused::print_json(&mut stdout, &result)?;
                return Ok(());
            }

            depsweep_unused::print_report(&mut stdout, &result, &root)?;

            let elapsed_ms = start.elapsed().as_millis();
            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                result.files_analyzed.to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;

            Ok(())
        }
    }
}
