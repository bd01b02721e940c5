use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod buffer;
mod dgst;
mod enc;
mod rc5cmd;
mod rsa_cmd;
mod speed;

/// parfish command-line tool for parallel block-cipher operations.
#[derive(Parser)]
#[command(name = "parfish")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file with Blowfish, write the artifacts and verify the round trip.
    Enc {
        /// Input file.
        #[arg(short, long)]
        input: PathBuf,
        /// Directory for the .enc, .enc.sha256 and .dec files (default: next to the input).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// ASCII key, 1 to 56 bytes.
        #[arg(short, long, env = "PARFISH_KEY", default_value = "TESTKEY", hide_env_values = true)]
        key: String,
        /// Worker threads (default: one per logical CPU).
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// SHA-256 checksum of a file's word buffer.
    Dgst {
        /// Input file (use - for stdin).
        file: String,
    },
    /// Bulk throughput benchmark.
    Speed {
        /// Cipher (blowfish, rc5, all).
        #[arg(short, long, default_value = "all")]
        algorithm: String,
        /// Buffer size in bytes per pass.
        #[arg(short, long, default_value = "1048576")]
        size: usize,
        /// Seconds to run each cipher.
        #[arg(long, default_value = "3")]
        seconds: u64,
        /// Worker threads (default: one per logical CPU).
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// RC5-32 testbench: chained known-answer rows and a timed run.
    Rc5 {
        /// Key file; its first 32 bytes are the key (zero padded).
        #[arg(short, long)]
        key_file: Option<PathBuf>,
        /// Number of rounds.
        #[arg(short, long, default_value = "15")]
        rounds: u8,
        /// Chained single-block encryptions in the timed run.
        #[arg(short = 'n', long, default_value = "100000")]
        iterations: u64,
    },
    /// Toy RSA demo over small primes.
    Rsa {
        /// Message file (default: a built-in greeting).
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// First prime (default: 157).
        #[arg(short, long, requires = "q")]
        p: Option<u32>,
        /// Second prime (default: 151).
        #[arg(short, long, requires = "p")]
        q: Option<u32>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Enc {
            input,
            output_dir,
            key,
            threads,
        } => enc::run(input, output_dir.as_deref(), key, *threads),
        Commands::Dgst { file } => dgst::run(file),
        Commands::Speed {
            algorithm,
            size,
            seconds,
            threads,
        } => speed::run(algorithm, *size, *seconds, *threads),
        Commands::Rc5 {
            key_file,
            rounds,
            iterations,
        } => rc5cmd::run(key_file.as_deref(), *rounds, *iterations),
        Commands::Rsa { input, p, q } => rsa_cmd::run(input.as_deref(), *p, *q),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
