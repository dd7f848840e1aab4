use clap::{Parser, Subcommand};

use crate::config::{RunModeArg, ScaffolderKind};

#[derive(Parser, Debug)]
#[command(name = "Osprey", version, about = "Real-time genome scaffolding controller", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch a sequencing run and scaffold in real time
    Watch {
        /// Which scaffolder to use
        #[arg(short, long, value_enum)]
        scaffolder: ScaffolderKind,

        /// Directory to watch for fast5 files
        #[arg(short, long)]
        watch_dir: String,

        /// Path to the short-read assembly FASTA
        #[arg(short = 'c', long)]
        short_reads: String,

        /// Use a timer or the accumulated read count as the trigger
        #[arg(short, long, value_enum)]
        run_mode: RunModeArg,

        /// How often to run the scaffolder (seconds in time mode, reads in reads mode)
        #[arg(short, long)]
        intensity: u64,

        /// Stop sequencing when this number of scaffolds has been reached
        #[arg(short = 'q', long)]
        stop: u64,

        /// Stop sequencing when a scaffold is within 10% of this size
        #[arg(short, long)]
        genome_size: u64,

        /// Output directory for scaffold files
        #[arg(short, long)]
        output: String,
    },

    /// Print assembly statistics for a FASTA file
    Stats {
        /// Input FASTA(.gz)
        #[arg(short, long)]
        input: String,

        /// Output format: json or tsv
        #[arg(short, long, default_value = "tsv")]
        format: String,
    },
}
