// This software is released under the MIT license.
// See file LICENSE for full license details.
use std::fs;
use std::path::Path;

use super::params::{
    Filter, InputSource, Kmer, RawParameters, ResolvedConfig, Runtime, SampleThreshold, Unitig,
    IO,
};
use crate::command::pipeline::constants::{
    FIELD_KMER_SIZE, FIELD_MINI_SIZE, FIELD_MIN_FRAC_ABSENT, FIELD_MIN_FRAC_PRESENT,
    FIELD_MIN_UTG_FRAC, FIELD_MIN_UTG_LEN, FIELD_THREADS, PIPELINE_LOGAN_KMER_SIZE,
    PIPELINE_MAX_KMER_SIZE, PIPELINE_MAX_MINI_SIZE, PIPELINE_MIN_KMER_SIZE,
    PIPELINE_MIN_MINI_SIZE, PIPELINE_MIN_THREADS, PIPELINE_MIN_UTG_LEN,
};
use crate::runtime::{DiagnosticSink, Error};
use crate::utils::check_bounded;

/// Cross-field validation and defaulting. Rules run in a fixed order and the
/// first failing rule ends resolution; no partial configuration escapes.
pub struct Resolver {}

impl Resolver {
    pub fn resolve(
        raw: &RawParameters,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ResolvedConfig, Error> {
        Self::verify_bounds(raw)?;
        let source = Self::resolve_input_source(raw, sink)?;
        Self::verify_minimizer_size(raw)?;
        Self::verify_logan(raw)?;
        Self::verify_filter_overrides(raw)?;

        let min_utg_len = match raw.min_utg_len {
            Some(len) => len,
            None => {
                let len = raw.kmer_size.saturating_mul(2) - 1;
                sink.debug(&format!("Minimum unitig length not set, using 2k-1 = {}", len));
                len
            }
        };

        Ok(ResolvedConfig {
            io: IO {
                source,
                path_out: raw.path_out.clone(),
            },
            kmer: Kmer {
                kmer_size: raw.kmer_size,
                mini_size: raw.mini_size,
                min_abundance: raw.min_abundance,
                logan: raw.logan,
            },
            unitig: Unitig {
                min_utg_len,
                min_utg_frac: raw.min_utg_frac,
                write_seq: raw.write_utg_seq,
                write_frac_matrix: raw.write_frac_matrix,
                abundance_metric: raw.abundance_metric,
                output_format: raw.output_format,
                write_links: raw.write_utg_links,
            },
            filter: Self::select_filter(raw),
            runtime: Runtime {
                threads: raw.threads,
                keep_tmp: raw.keep_tmp,
            },
        })
    }

    /// Same intervals as the command line, for parameters built without it.
    fn verify_bounds(raw: &RawParameters) -> Result<(), Error> {
        check_bounded(
            FIELD_KMER_SIZE,
            raw.kmer_size,
            PIPELINE_MIN_KMER_SIZE,
            PIPELINE_MAX_KMER_SIZE,
        )?;
        check_bounded(
            FIELD_MINI_SIZE,
            raw.mini_size,
            PIPELINE_MIN_MINI_SIZE,
            PIPELINE_MAX_MINI_SIZE,
        )?;
        if let Some(len) = raw.min_utg_len {
            check_bounded(FIELD_MIN_UTG_LEN, len, PIPELINE_MIN_UTG_LEN, u32::MAX)?;
        }
        check_bounded(FIELD_MIN_UTG_FRAC, raw.min_utg_frac, 0.0, 1.0)?;
        check_bounded(FIELD_MIN_FRAC_ABSENT, raw.min_frac_absent, 0.0, 1.0)?;
        check_bounded(FIELD_MIN_FRAC_PRESENT, raw.min_frac_present, 0.0, 1.0)?;
        check_bounded(FIELD_THREADS, raw.threads, PIPELINE_MIN_THREADS, usize::MAX)?;
        Ok(())
    }

    fn resolve_input_source(
        raw: &RawParameters,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<InputSource, Error> {
        if let Some(path_matrix) = &raw.path_in_matrix {
            verify_input_file("Input matrix (-i)", path_matrix, false)?;
            if let Some(path_fof) = &raw.path_fof {
                sink.warn(&format!(
                    "Input file \"{}\" is ignored because a pre-built matrix was given with -i",
                    path_fof.display()
                ));
            }
            return Ok(InputSource::Matrix(path_matrix.clone()));
        }

        let Some(path_fof) = &raw.path_fof else {
            return Err(Error::MissingInput);
        };
        verify_input_file("Input file", path_fof, true)?;
        Ok(InputSource::SampleList(path_fof.clone()))
    }

    fn verify_minimizer_size(raw: &RawParameters) -> Result<(), Error> {
        if raw.mini_size >= raw.kmer_size {
            return Err(Error::OrderingViolation {
                mini_size: raw.mini_size,
                kmer_size: raw.kmer_size,
            });
        }
        Ok(())
    }

    fn verify_logan(raw: &RawParameters) -> Result<(), Error> {
        if raw.logan && raw.kmer_size != PIPELINE_LOGAN_KMER_SIZE {
            return Err(Error::incompatible_option(
                "--logan",
                format!(
                    "only available for k-mer size (-k) {}, got {}",
                    PIPELINE_LOGAN_KMER_SIZE, raw.kmer_size
                ),
            ));
        }
        Ok(())
    }

    fn verify_filter_overrides(raw: &RawParameters) -> Result<(), Error> {
        match (raw.min_nb_absent, raw.min_nb_present) {
            (Some(n), None) => Err(Error::incoherent_filter_override("-n", "-N", n)),
            (None, Some(n)) => Err(Error::incoherent_filter_override("-N", "-n", n)),
            _ => Ok(()),
        }
    }

    /// Absolute counts win over fractions. The choice is stored so later stages
    /// never re-derive it.
    fn select_filter(raw: &RawParameters) -> Filter {
        let absent = match raw.min_nb_absent {
            Some(n) => SampleThreshold::Count(n),
            None => SampleThreshold::Fraction(raw.min_frac_absent),
        };
        let present = match raw.min_nb_present {
            Some(n) => SampleThreshold::Count(n),
            None => SampleThreshold::Fraction(raw.min_frac_present),
        };
        Filter {
            enabled: !raw.no_kmer_filter,
            absent,
            present,
        }
    }
}

/// `path` must be an existing regular file, and non-empty unless `allow_empty`.
fn verify_input_file(role: &str, path: &Path, allow_empty: bool) -> Result<(), Error> {
    let metadata = fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .ok_or_else(|| Error::file_not_found(role, path))?;
    if !allow_empty && metadata.len() == 0 {
        return Err(Error::empty_file(role, path));
    }
    Ok(())
}
