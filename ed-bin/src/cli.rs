use anyhow::{bail, ensure, Context};
use bio::io::fasta;
use clap::{value_parser, Parser, ValueEnum};
use ed_algos::{CostModel, Myers, WagnerFischer};
use itertools::Itertools;
use log::{debug, info};
use pa_types::{Aligner, Cost, Seq, Sequence};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::ControlFlow,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(ValueEnum, Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlgorithmType {
    /// Full DP grid with the given insertion, deletion and substitution costs.
    WagnerFischer,
    /// Greedy diagonal search; unit indel costs, the cost flags are ignored.
    #[default]
    Myers,
}

impl AlgorithmType {
    pub fn build(&self, cm: CostModel) -> Box<dyn Aligner> {
        match self {
            AlgorithmType::WagnerFischer => Box::new(WagnerFischer::new(cm)),
            AlgorithmType::Myers => Box::new(Myers),
        }
    }
}

/// Compute the edit distance between pairs of sequences.
#[derive(Parser, Serialize, Deserialize)]
#[clap(author, about, disable_version_flag(true))]
#[clap(mut_arg("seed", |a| a.hide_short_help(true)))]
#[clap(mut_arg("cnt", |a| a.hide_short_help(true)))]
#[clap(mut_arg("error_model", |a| a.hide_short_help(true)))]
#[clap(group(
    clap::ArgGroup::new("input_type")
        .required(true)
        .args(&["input", "length"]),
))]
pub struct Cli {
    /// A .seq, .txt, or Fasta file with sequence pairs, or a directory of them.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub input: Option<PathBuf>,

    /// Write the summary statistics as json.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub output: Option<PathBuf>,

    /// The algorithm to use.
    #[clap(short, long, value_enum, default_value_t, display_order = 2)]
    pub algorithm: AlgorithmType,

    #[clap(flatten, next_help_heading = "Costs")]
    pub costs: CostArgs,

    /// Options to generate input pairs.
    #[clap(flatten, next_help_heading = "Generated input")]
    pub generate: pa_generate::DatasetGenerator,

    /// Print less. Pass twice for summary line only.
    ///
    /// Do not print a new line per pair, but instead overwrite the previous one.
    /// Pass twice to only print a summary line and avoid all terminal clutter.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    /// Stop starting new pairs after this timeout.
    #[arg(long, value_parser = parse_duration::parse, hide_short_help = true)]
    pub timeout: Option<Duration>,
}

/// Costs for the Wagner-Fischer engine.
#[derive(Parser, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostArgs {
    /// Insertion cost.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub ins: Cost,
    /// Deletion cost.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub del: Cost,
    /// Substitution cost. Matches are always free.
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    pub sub: Cost,
}

impl CostArgs {
    pub fn cost_model(&self) -> anyhow::Result<CostModel> {
        CostModel::new(self.ins, self.del, self.sub).context("invalid costs")
    }
}

/// Read all pairs of consecutive sequences in a single file.
///
/// `.txt` files have one sequence per line. `.seq` files prefix the first
/// sequence of each pair by `>` and the second by `<`.
pub fn read_pairs(path: &Path) -> anyhow::Result<Vec<(Sequence, Sequence)>> {
    let open = || {
        File::open(path)
            .map(BufReader::new)
            .with_context(|| format!("failed to open {}", path.display()))
    };
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .with_context(|| format!("{} has no file extension", path.display()))?;

    let seqs: Vec<Sequence> = match ext {
        "seq" | "txt" => {
            let mut seqs = vec![];
            for (idx, line) in open()?.lines().enumerate() {
                let mut line = line
                    .with_context(|| format!("failed to read {}", path.display()))?
                    .into_bytes();
                if ext == "seq" {
                    let marker = if idx % 2 == 0 { b'>' } else { b'<' };
                    ensure!(
                        line.first() == Some(&marker),
                        "{}:{}: expected a line starting with '{}'",
                        path.display(),
                        idx + 1,
                        marker as char
                    );
                    line.remove(0);
                }
                seqs.push(line);
            }
            seqs
        }
        "fna" | "fa" | "fasta" => fasta::Reader::new(open()?)
            .records()
            .map(|record| -> anyhow::Result<Sequence> {
                let record = record
                    .with_context(|| format!("invalid fasta record in {}", path.display()))?;
                Ok(record.seq().to_vec())
            })
            .collect::<anyhow::Result<_>>()?,
        ext => bail!("Unknown file extension {ext:?}. Must be in {{seq,txt,fna,fa,fasta}}."),
    };
    ensure!(
        seqs.len() % 2 == 0,
        "{} contains an odd number ({}) of sequences",
        path.display(),
        seqs.len()
    );
    debug!("read {} pairs from {}", seqs.len() / 2, path.display());
    Ok(seqs.into_iter().tuples().collect())
}

impl Cli {
    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(Seq, Seq) -> ControlFlow<()>,
    ) -> anyhow::Result<()> {
        if let Some(input) = &self.input {
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                let mut files: Vec<PathBuf> = input
                    .read_dir()
                    .with_context(|| format!("{} is not a file or directory", input.display()))?
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<Result<_, _>>()?;
                files.sort();
                files
            };

            for f in files {
                for (a, b) in read_pairs(&f)? {
                    if let ControlFlow::Break(()) = run_pair(&a, &b) {
                        return Ok(());
                    }
                }
            }
        } else {
            // Generate random input.
            let seed = self.generate.seed.unwrap_or_else(|| {
                let seed = ChaCha8Rng::from_entropy().gen_range(0..1_000);
                info!("Seed: {seed}");
                seed
            });
            let ref mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..self.generate.cnt.unwrap_or(1) {
                let (a, b) = self.generate.settings.generate(rng);
                if let ControlFlow::Break(()) = run_pair(&a, &b) {
                    break;
                }
            }
        }
        Ok(())
    }
}
