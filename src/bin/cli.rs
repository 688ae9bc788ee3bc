use clap::{Parser, Subcommand};
use fnv_bloom::{
    BloomFilter, BloomFilterConfigBuilder, BloomParams, QueryStrategy,
    common::bytes2hr, hash_fnv64, keys::load_keys, prefetch,
};
use std::{path::PathBuf, time::Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the bit vector size and hash count derived for a configuration
    Info {
        /// Expected number of elements
        #[arg(short, long, default_value = "10000")]
        capacity: usize,

        /// False positive rate (between 0 and 1)
        #[arg(short, long, default_value = "0.01")]
        fpr: f64,

        /// Pin the number of hash functions
        #[arg(short = 'k', long)]
        hashes: Option<usize>,
    },

    /// Print the 64-bit FNV-1a hash of each argument
    Hash {
        #[arg(required = true)]
        strings: Vec<String>,
    },

    /// Load keys from a file, insert them all and time one query pass
    Query {
        /// File with one key per line
        #[arg(short, long)]
        keys: PathBuf,

        /// False positive rate (between 0 and 1)
        #[arg(short, long, default_value = "0.000001")]
        fpr: f64,

        /// Repeat the key list this many times so it does not fit in cache
        #[arg(short, long, default_value = "10")]
        scale: usize,

        /// Lookup path to time
        #[arg(long, value_enum, default_value_t = QueryStrategy::Sequential)]
        strategy: QueryStrategy,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info {
            capacity,
            fpr,
            hashes,
        } => {
            let mut builder = BloomFilterConfigBuilder::default()
                .capacity(capacity)
                .false_positive_rate(fpr);
            if let Some(k) = hashes {
                builder = builder.num_hashes(k);
            }
            let config = builder.build()?;
            let params = BloomParams::try_from(&config)?;

            let m = params.bit_vector_size.div_ceil(8) * 8;
            let k = params.num_hashes as f64;
            let expected_fpr =
                (1.0 - (-k * capacity as f64 / m as f64).exp()).powf(k);

            println!("Bloom filter parameters:");
            println!("  target num elements: {capacity}");
            println!("  target false positive rate: {fpr}");
            println!("  num hash functions: {}", params.num_hashes);
            println!("  bit vector size: {m} bits");
            println!("  memory: {}", bytes2hr(m / 8));
            println!(
                "  expected false positive rate at capacity: {expected_fpr:.6}"
            );
        }

        Commands::Hash { strings } => {
            for s in &strings {
                let hash = hash_fnv64(s.as_bytes());
                println!("{s}: {hash} ({hash:#018x})");
            }
        }

        Commands::Query {
            keys,
            fpr,
            scale,
            strategy,
        } => {
            if scale == 0 {
                return Err("scale must be at least 1".into());
            }
            let loaded = load_keys(&keys)?;
            if loaded.is_empty() {
                return Err(format!("no keys in {}", keys.display()).into());
            }
            info!(path = %keys.display(), count = loaded.len(), "loaded keys");

            let replicated: Vec<&[u8]> = std::iter::repeat_n(&loaded, scale)
                .flatten()
                .map(Vec::as_slice)
                .collect();

            let mut filter = BloomFilter::new(replicated.len(), fpr)?;
            println!("{filter}");

            for key in &replicated {
                filter.insert(key);
            }
            info!(
                inserted = replicated.len(),
                fill = filter.fill_ratio(),
                "populated filter"
            );

            if strategy == QueryStrategy::Prefetch && !prefetch::SUPPORTED {
                info!(
                    "no prefetch instruction on this target, timing the plain path"
                );
            }

            info!(%strategy, "starting queries");
            let start = Instant::now();
            let mut positives = 0usize;
            let mut last = false;
            for key in &replicated {
                last = filter.query(strategy, key);
                positives += usize::from(last);
            }
            let elapsed = start.elapsed();

            println!(
                "{} queries took {:.6} seconds",
                replicated.len(),
                elapsed.as_secs_f64()
            );
            // results are printed so the query loop stays live
            println!("positives: {positives}, last result: {last}");
        }
    }

    Ok(())
}
