// This software is released under the MIT license.
// See file LICENSE for full license details.
pub const PIPELINE_DEFAULT_PATH_OUT: &str = "output";

pub const PIPELINE_DEFAULT_KMER_SIZE: u32 = 31;
pub const PIPELINE_MIN_KMER_SIZE: u32 = 8;
pub const PIPELINE_MAX_KMER_SIZE: u32 = 63;

pub const PIPELINE_DEFAULT_MINI_SIZE: u32 = 15;
pub const PIPELINE_MIN_MINI_SIZE: u32 = 4;
pub const PIPELINE_MAX_MINI_SIZE: u32 = 15;

pub const PIPELINE_DEFAULT_MIN_ABUNDANCE: u32 = 2;
pub const PIPELINE_DEFAULT_MIN_UTG_FRAC: f64 = 0.0;

pub const PIPELINE_DEFAULT_MIN_FRAC_ABSENT: f64 = 0.1;
pub const PIPELINE_DEFAULT_MIN_FRAC_PRESENT: f64 = 0.1;

pub const PIPELINE_DEFAULT_THREADS: usize = 4;
pub const PIPELINE_MIN_THREADS: usize = 1;
pub const PIPELINE_MIN_UTG_LEN: u32 = 1;

// Logan unitigs are only published for this k.
pub const PIPELINE_LOGAN_KMER_SIZE: u32 = 31;

pub const FIELD_KMER_SIZE: &str = "k-mer size (-k)";
pub const FIELD_MINI_SIZE: &str = "minimizer size (-m)";
pub const FIELD_MIN_ABUNDANCE: &str = "minimum abundance (-a)";
pub const FIELD_MIN_UTG_LEN: &str = "minimum unitig length (-l)";
pub const FIELD_MIN_UTG_FRAC: &str = "minimum unitig k-mer fraction (-r)";
pub const FIELD_MIN_FRAC_ABSENT: &str = "min fraction of samples absent (-f)";
pub const FIELD_MIN_FRAC_PRESENT: &str = "min fraction of samples present (-F)";
pub const FIELD_MIN_NB_ABSENT: &str = "min number of samples absent (-n)";
pub const FIELD_MIN_NB_PRESENT: &str = "min number of samples present (-N)";
pub const FIELD_THREADS: &str = "number of threads (-t)";

pub const TOOL_KMTRICKS: &str = "muset-kmtricks";
pub const TOOL_KMAT_TOOLS: &str = "kmat_tools";
pub const TOOL_GGCAT: &str = "ggcat";

pub const PATH_KMER_MATRIX: &str = "kmer_matrix";
pub const PATH_FILTERED_MATRIX: &str = "matrix.filtered.mat";
pub const PATH_FILTERED_KMERS: &str = "matrix.filtered.fasta";
pub const PATH_UNITIGS: &str = "unitigs";
pub const PATH_FILTERED_UNITIGS: &str = "unitigs.fa";
pub const PATH_GGCAT_TEMP: &str = "ggcat_build_temp";
