// This software is released under the MIT license.
// See file LICENSE for full license details.
use std::error::Error as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::error::ContextKind;
use clap::Parser;
use path_clean::PathClean;

use super::{
    constants::*,
    core::{
        core::Resolver,
        params::{AbundanceMetric, OutputFormat, RawParameters},
        plan::PipelinePlan,
    },
};
use crate::bounded_parser;
use crate::runtime::{DiagnosticSink, Error};
use crate::utils::{check_companions, command_to_string, DependencyPolicy, SearchPath};

#[derive(Parser, Debug)]
#[command(
    name = "muset",
    version,
    about = "A pipeline for building an abundance unitig matrix from a list of FASTA/FASTQ files",
    disable_version_flag = true
)]
pub struct Command {
    /// kmtricks-like sample list (see README.md). Ignored when -i is given
    #[arg(value_name = "INPUT_FILE")]
    pub path_fof: Option<PathBuf>,

    /// Run the pipeline from a previously computed k-mer matrix
    #[arg(short = 'i', value_name = "PATH", help_heading = "Main options")]
    pub path_in_matrix: Option<PathBuf>,

    /// Output directory
    #[arg(short = 'o', value_name = "PATH", default_value = PIPELINE_DEFAULT_PATH_OUT, help_heading = "Main options")]
    pub path_out: PathBuf,

    /// k-mer size [8, 63]
    #[arg(short = 'k', value_name = "INT",
        value_parser = bounded_parser!(FIELD_KMER_SIZE, u32, PIPELINE_MIN_KMER_SIZE, PIPELINE_MAX_KMER_SIZE),
        default_value_t = PIPELINE_DEFAULT_KMER_SIZE, help_heading = "Main options")]
    pub kmer_size: u32,

    /// Minimizer size [4, 15], must be smaller than -k
    #[arg(short = 'm', value_name = "INT",
        value_parser = bounded_parser!(FIELD_MINI_SIZE, u32, PIPELINE_MIN_MINI_SIZE, PIPELINE_MAX_MINI_SIZE),
        default_value_t = PIPELINE_DEFAULT_MINI_SIZE, help_heading = "Main options")]
    pub mini_size: u32,

    /// Minimum abundance to keep a k-mer
    #[arg(short = 'a', value_name = "INT",
        value_parser = bounded_parser!(FIELD_MIN_ABUNDANCE, u32, 0, u32::MAX),
        default_value_t = PIPELINE_DEFAULT_MIN_ABUNDANCE, help_heading = "Main options")]
    pub min_abundance: u32,

    /// Minimum length to keep a unitig in the output matrix [default: 2k-1]
    #[arg(short = 'l', value_name = "INT",
        value_parser = bounded_parser!(FIELD_MIN_UTG_LEN, u32, PIPELINE_MIN_UTG_LEN, u32::MAX),
        help_heading = "Main options")]
    pub min_utg_len: Option<u32>,

    /// Minimum k-mer fraction to set a unitig's average abundance [0, 1]
    #[arg(short = 'r', value_name = "FLOAT",
        value_parser = bounded_parser!(FIELD_MIN_UTG_FRAC, f64, 0.0, 1.0),
        default_value_t = PIPELINE_DEFAULT_MIN_UTG_FRAC, help_heading = "Main options")]
    pub min_utg_frac: f64,

    /// Write the unitig sequence instead of the identifier in the output matrix
    #[arg(short = 's', help_heading = "Main options")]
    pub write_utg_seq: bool,

    /// Also write a matrix of k-mer fractions per unitig
    #[arg(long = "out-frac", help_heading = "Main options")]
    pub write_frac_matrix: bool,

    /// Metric used to aggregate unitig abundance from its k-mers
    #[arg(long = "abundance-metric", value_name = "STRING", value_enum,
        default_value_t = AbundanceMetric::Mean, help_heading = "Main options")]
    pub abundance_metric: AbundanceMetric,

    /// Unitig matrix format (tsv is gzip compressed)
    #[arg(long = "output-format", value_name = "STRING", value_enum,
        default_value_t = OutputFormat::Txt, help_heading = "Main options")]
    pub output_format: OutputFormat,

    /// Have ggcat write maximal unitig links, in BCALM2 format L:<+/->:<other id>:<+/->
    #[arg(short = 'e', long = "generate-maximal-unitigs-links", help_heading = "Main options")]
    pub write_utg_links: bool,

    /// Input samples are Logan unitigs (with abundance). Requires -k 31
    #[arg(long = "logan", help_heading = "Main options")]
    pub logan: bool,

    /// Disable filtering of k-mer matrix rows before unitig construction
    #[arg(long = "no-kmer-filter", help_heading = "Filtering options")]
    pub no_kmer_filter: bool,

    /// Fraction of samples from which a k-mer should be absent [0, 1]
    #[arg(short = 'f', value_name = "FLOAT",
        value_parser = bounded_parser!(FIELD_MIN_FRAC_ABSENT, f64, 0.0, 1.0),
        default_value_t = PIPELINE_DEFAULT_MIN_FRAC_ABSENT, help_heading = "Filtering options")]
    pub min_frac_absent: f64,

    /// Fraction of samples in which a k-mer should be present [0, 1]
    #[arg(short = 'F', value_name = "FLOAT",
        value_parser = bounded_parser!(FIELD_MIN_FRAC_PRESENT, f64, 0.0, 1.0),
        default_value_t = PIPELINE_DEFAULT_MIN_FRAC_PRESENT, help_heading = "Filtering options")]
    pub min_frac_present: f64,

    /// Minimum number of samples from which a k-mer should be absent (overrides -f, needs -N)
    #[arg(short = 'n', value_name = "INT",
        value_parser = bounded_parser!(FIELD_MIN_NB_ABSENT, u32, 0, u32::MAX),
        help_heading = "Filtering options")]
    pub min_nb_absent: Option<u32>,

    /// Minimum number of samples in which a k-mer should be present (overrides -F, needs -n)
    #[arg(short = 'N', value_name = "INT",
        value_parser = bounded_parser!(FIELD_MIN_NB_PRESENT, u32, 0, u32::MAX),
        help_heading = "Filtering options")]
    pub min_nb_present: Option<u32>,

    /// Number of threads
    #[arg(short = 't', long = "threads", value_name = "INT",
        value_parser = bounded_parser!(FIELD_THREADS, usize, PIPELINE_MIN_THREADS, usize::MAX),
        default_value_t = PIPELINE_DEFAULT_THREADS, help_heading = "Other options")]
    pub threads: usize,

    /// Keep temporary files
    #[arg(long = "keep-temp", help_heading = "Other options")]
    pub keep_tmp: bool,

    /// Fail instead of warning when a companion executable is missing
    #[arg(long = "strict-deps", help_heading = "Other options")]
    pub strict_deps: bool,

    /// Extra directory to search for companion executables (repeatable)
    #[arg(long = "bin-dir", value_name = "PATH", help_heading = "Other options")]
    pub bin_dirs: Vec<PathBuf>,

    /// Verbose output
    #[arg(long, help_heading = "Other options")]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version, help_heading = "Other options")]
    version: (),
}

impl Command {
    /// Run the commandline option.
    /// Resolves the configuration, checks companions and returns the stages to run.
    pub fn try_execute(&self, sink: &mut dyn DiagnosticSink) -> Result<PipelinePlan> {
        let config = Resolver::resolve(&self.raw_parameters(), sink)?;
        let plan = PipelinePlan::from_config(&config);

        let search_path = SearchPath::from_env(&self.bin_dirs);
        let tools = check_companions(
            &plan.utilities(),
            &search_path,
            self.dependency_policy(),
            sink,
        )?;

        for line in config.report() {
            sink.info(&line);
        }
        for stage in plan.stages() {
            sink.debug(&format!(
                "Stage {}: {}",
                stage.name(),
                command_to_string(&stage.command(&tools))
            ));
        }
        Ok(plan)
    }

    pub fn raw_parameters(&self) -> RawParameters {
        RawParameters {
            path_fof: self.path_fof.clone(),
            path_in_matrix: self.path_in_matrix.clone(),
            path_out: self.path_out.clean(),
            kmer_size: self.kmer_size,
            mini_size: self.mini_size,
            min_abundance: self.min_abundance,
            logan: self.logan,
            min_utg_len: self.min_utg_len,
            min_utg_frac: self.min_utg_frac,
            write_utg_seq: self.write_utg_seq,
            write_frac_matrix: self.write_frac_matrix,
            abundance_metric: self.abundance_metric,
            output_format: self.output_format,
            write_utg_links: self.write_utg_links,
            no_kmer_filter: self.no_kmer_filter,
            min_frac_absent: self.min_frac_absent,
            min_frac_present: self.min_frac_present,
            min_nb_absent: self.min_nb_absent,
            min_nb_present: self.min_nb_present,
            keep_tmp: self.keep_tmp,
            threads: self.threads,
        }
    }

    pub fn dependency_policy(&self) -> DependencyPolicy {
        if self.strict_deps {
            DependencyPolicy::FailFast
        } else {
            DependencyPolicy::WarnOnly
        }
    }
}

/// Map a command-line parse failure onto the error kinds of this crate.
/// Bounded options carry their `Error` as the clap error source.
pub fn intake_error(err: &clap::Error) -> Error {
    if let Some(inner) = err.source().and_then(|s| s.downcast_ref::<Error>()) {
        return inner.clone();
    }

    let field = err
        .get(ContextKind::InvalidArg)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "command line".to_string());
    let value = err
        .get(ContextKind::InvalidValue)
        .map(|v| v.to_string())
        .unwrap_or_default();
    let rendered = err.render().to_string();
    let reason = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    Error::invalid_argument(field, value, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::CaptureSink;
    use clap::error::ErrorKind;
    use std::io::Write;

    fn parse(args: &[&str]) -> std::result::Result<Command, clap::Error> {
        Command::try_parse_from(std::iter::once("muset").chain(args.iter().copied()))
    }

    #[test]
    fn declared_defaults() {
        let raw = parse(&["reads.fof"]).unwrap().raw_parameters();
        assert_eq!(
            raw,
            RawParameters {
                path_fof: Some(PathBuf::from("reads.fof")),
                ..Default::default()
            }
        );
    }

    #[test]
    fn flags_and_overrides_are_captured() {
        let cmd = parse(&[
            "-i", "m.mat", "-o", "res/", "-k", "25", "-m", "9", "-a", "3", "-l", "60", "-s",
            "--no-kmer-filter", "-n", "2", "-N", "4", "-t", "8", "--keep-temp", "--verbose",
        ])
        .unwrap();
        let raw = cmd.raw_parameters();

        assert_eq!(raw.path_in_matrix, Some(PathBuf::from("m.mat")));
        assert_eq!(raw.path_out, PathBuf::from("res"));
        assert_eq!(raw.kmer_size, 25);
        assert_eq!(raw.mini_size, 9);
        assert_eq!(raw.min_abundance, 3);
        assert_eq!(raw.min_utg_len, Some(60));
        assert!(raw.write_utg_seq);
        assert!(raw.no_kmer_filter);
        assert_eq!(raw.min_nb_absent, Some(2));
        assert_eq!(raw.min_nb_present, Some(4));
        assert_eq!(raw.threads, 8);
        assert!(raw.keep_tmp);
        assert!(cmd.verbose);
        assert_eq!(cmd.dependency_policy(), DependencyPolicy::WarnOnly);
    }

    #[test]
    fn out_of_range_kmer_is_reported_with_bounds() {
        let err = parse(&["reads.fof", "-k", "70"]).unwrap_err();
        assert_eq!(
            intake_error(&err),
            Error::out_of_range("k-mer size (-k)", "70", 8, 63)
        );
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        let err = parse(&["reads.fof", "-f", "1.2"]).unwrap_err();
        assert!(matches!(intake_error(&err), Error::OutOfRange { .. }));
    }

    #[test]
    fn unitig_output_options_are_captured() {
        let raw = parse(&[
            "reads.fof",
            "--abundance-metric",
            "median",
            "--output-format",
            "tsv",
            "-e",
        ])
        .unwrap()
        .raw_parameters();
        assert_eq!(raw.abundance_metric, AbundanceMetric::Median);
        assert_eq!(raw.output_format, OutputFormat::Tsv);
        assert!(raw.write_utg_links);

        let raw = parse(&["reads.fof", "--generate-maximal-unitigs-links"])
            .unwrap()
            .raw_parameters();
        assert!(raw.write_utg_links);
    }

    #[test]
    fn unknown_metric_is_invalid_argument() {
        let err = parse(&["reads.fof", "--abundance-metric", "max"]).unwrap_err();
        assert!(matches!(intake_error(&err), Error::InvalidArgument { .. }));

        let err = parse(&["reads.fof", "--output-format", "csv"]).unwrap_err();
        assert!(matches!(intake_error(&err), Error::InvalidArgument { .. }));
    }

    #[test]
    fn intake_does_not_check_ordering() {
        let raw = parse(&["reads.fof", "-k", "15", "-m", "15"])
            .unwrap()
            .raw_parameters();
        assert_eq!((raw.kmer_size, raw.mini_size), (15, 15));
    }

    #[test]
    fn zero_threads_is_out_of_range() {
        let err = parse(&["reads.fof", "-t", "0"]).unwrap_err();
        assert!(matches!(intake_error(&err), Error::OutOfRange { .. }));
    }

    #[test]
    fn unknown_flag_is_invalid_argument() {
        let err = parse(&["reads.fof", "--bogus"]).unwrap_err();
        assert!(matches!(intake_error(&err), Error::InvalidArgument { .. }));
    }

    #[test]
    fn help_and_version_are_not_failures() {
        assert_eq!(parse(&["-h"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse(&["-v"]).unwrap_err().kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn execute_reports_then_plans() {
        let dir = tempfile::tempdir().unwrap();
        let fof = dir.path().join("reads.fof");
        let mut f = std::fs::File::create(&fof).unwrap();
        writeln!(f, "A : a.fq").unwrap();

        let cmd = parse(&[
            fof.to_str().unwrap(),
            "-k",
            "21",
            "-m",
            "11",
            "--bin-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        let mut sink = CaptureSink::new();
        let plan = cmd.try_execute(&mut sink).unwrap();

        assert_eq!(plan.stages().len(), 6);
        let info = sink.messages(log::Level::Info);
        assert_eq!(info[1], "k-mer size (-k): 21");
        assert_eq!(info[3], "Minimum unitig length (-l): 41");
        assert_eq!(sink.messages(log::Level::Debug).iter().filter(|m| m.starts_with("Stage ")).count(), 6);
    }

    #[test]
    fn execute_fails_without_input() {
        let cmd = parse(&["-k", "21"]).unwrap();
        let mut sink = CaptureSink::new();
        let err = cmd.try_execute(&mut sink).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::MissingInput));
        assert!(sink.messages(log::Level::Info).is_empty());
    }
}
