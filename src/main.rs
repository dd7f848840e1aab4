use clap::Parser;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use osprey::cli_main::{Cli, Commands};
use osprey::config::{RunConfig, RunModeArg, TriggerMode};
use osprey::controller::RunController;
use osprey::fastainfo::assembly_info;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            scaffolder,
            watch_dir,
            short_reads,
            run_mode,
            intensity,
            stop,
            genome_size,
            output,
        } => {
            let trigger = match run_mode {
                RunModeArg::Time => TriggerMode::Time(Duration::from_secs(intensity)),
                RunModeArg::Reads => TriggerMode::Reads(intensity as usize),
            };
            let config = RunConfig {
                scaffolder,
                watch_dir: watch_dir.into(),
                short_reads: short_reads.into(),
                trigger,
                stop_threshold: stop,
                genome_size,
                output_dir: output.into(),
            };

            info!("Starting real-time scaffolding run");
            if let Err(e) = RunController::new(config).run() {
                eprintln!("Error during scaffolding run: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Stats { input, format } => {
            info!("Calculating assembly statistics for: {}", input);
            match assembly_info(Path::new(&input)) {
                Ok(stats) => match format.as_str() {
                    "json" => {
                        println!("{}", serde_json::to_string_pretty(&stats).unwrap());
                    }
                    "tsv" => {
                        println!("contigs\ttotal_len\tavg_len\tn50");
                        println!(
                            "{}\t{}\t{:.2}\t{}",
                            stats.total_contigs,
                            stats.total_length,
                            stats.average_length,
                            stats.n50
                        );
                    }
                    _ => eprintln!("Unsupported format: {}", format),
                },
                Err(e) => eprintln!("Error reading assembly: {}", e),
            }
        }
    }
}
