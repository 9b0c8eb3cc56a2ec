// This software is released under the MIT license.
// See file LICENSE for full license details.
use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use super::super::constants::{
    PIPELINE_DEFAULT_KMER_SIZE, PIPELINE_DEFAULT_MINI_SIZE, PIPELINE_DEFAULT_MIN_ABUNDANCE,
    PIPELINE_DEFAULT_MIN_FRAC_ABSENT, PIPELINE_DEFAULT_MIN_FRAC_PRESENT,
    PIPELINE_DEFAULT_MIN_UTG_FRAC, PIPELINE_DEFAULT_PATH_OUT, PIPELINE_DEFAULT_THREADS,
};

/// Typed command-line values, before any cross-field check.
/// `None` marks options whose absence matters to the resolver.
#[derive(Clone, Debug, PartialEq)]
pub struct RawParameters {
    pub path_fof: Option<PathBuf>,
    pub path_in_matrix: Option<PathBuf>,
    pub path_out: PathBuf,

    pub kmer_size: u32,
    pub mini_size: u32,
    pub min_abundance: u32,
    pub logan: bool,

    pub min_utg_len: Option<u32>,
    pub min_utg_frac: f64,
    pub write_utg_seq: bool,
    pub write_frac_matrix: bool,
    pub abundance_metric: AbundanceMetric,
    pub output_format: OutputFormat,
    pub write_utg_links: bool,

    pub no_kmer_filter: bool,
    pub min_frac_absent: f64,
    pub min_frac_present: f64,
    pub min_nb_absent: Option<u32>,
    pub min_nb_present: Option<u32>,

    pub keep_tmp: bool,
    pub threads: usize,
}

impl Default for RawParameters {
    fn default() -> Self {
        Self {
            path_fof: None,
            path_in_matrix: None,
            path_out: PathBuf::from(PIPELINE_DEFAULT_PATH_OUT),
            kmer_size: PIPELINE_DEFAULT_KMER_SIZE,
            mini_size: PIPELINE_DEFAULT_MINI_SIZE,
            min_abundance: PIPELINE_DEFAULT_MIN_ABUNDANCE,
            logan: false,
            min_utg_len: None,
            min_utg_frac: PIPELINE_DEFAULT_MIN_UTG_FRAC,
            write_utg_seq: false,
            write_frac_matrix: false,
            abundance_metric: AbundanceMetric::default(),
            output_format: OutputFormat::default(),
            write_utg_links: false,
            no_kmer_filter: false,
            min_frac_absent: PIPELINE_DEFAULT_MIN_FRAC_ABSENT,
            min_frac_present: PIPELINE_DEFAULT_MIN_FRAC_PRESENT,
            min_nb_absent: None,
            min_nb_present: None,
            keep_tmp: false,
            threads: PIPELINE_DEFAULT_THREADS,
        }
    }
}

/// How a unitig's per-sample abundance is aggregated from its k-mers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AbundanceMetric {
    #[default]
    Mean,
    Median,
}

impl AbundanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbundanceMetric::Mean => "mean",
            AbundanceMetric::Median => "median",
        }
    }
}

impl fmt::Display for AbundanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unitig matrix output format. `Tsv` is gzip compressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Txt,
    Tsv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the pipeline starts.
#[derive(Clone, Debug, PartialEq)]
pub enum InputSource {
    /// Sample list: the k-mer matrix is built first.
    SampleList(PathBuf),
    /// Pre-built k-mer matrix: matrix construction is skipped.
    Matrix(PathBuf),
}

impl InputSource {
    pub fn path(&self) -> &Path {
        match self {
            InputSource::SampleList(p) | InputSource::Matrix(p) => p,
        }
    }

    pub fn builds_matrix(&self) -> bool {
        matches!(self, InputSource::SampleList(_))
    }
}

/// Effective threshold for one side of the k-mer row filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleThreshold {
    Fraction(f64),
    Count(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct IO {
    pub source: InputSource,
    pub path_out: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Kmer {
    pub kmer_size: u32,
    pub mini_size: u32,
    pub min_abundance: u32,
    pub logan: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Unitig {
    pub min_utg_len: u32,
    pub min_utg_frac: f64,
    pub write_seq: bool,
    pub write_frac_matrix: bool,
    pub abundance_metric: AbundanceMetric,
    pub output_format: OutputFormat,
    pub write_links: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub enabled: bool,
    pub absent: SampleThreshold,
    pub present: SampleThreshold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Runtime {
    pub threads: usize,
    pub keep_tmp: bool,
}

/// Fully defaulted, cross-checked configuration. Only the resolver builds one.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub(super) io: IO,
    pub(super) kmer: Kmer,
    pub(super) unitig: Unitig,
    pub(super) filter: Filter,
    pub(super) runtime: Runtime,
}

impl ResolvedConfig {
    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn kmer(&self) -> &Kmer {
        &self.kmer
    }

    pub fn unitig(&self) -> &Unitig {
        &self.unitig
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}
