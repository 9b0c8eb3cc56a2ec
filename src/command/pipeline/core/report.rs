// This software is released under the MIT license.
// See file LICENSE for full license details.
use super::params::{InputSource, ResolvedConfig, SampleThreshold};

impl ResolvedConfig {
    /// One line per effective setting, always in the same order.
    pub fn report(&self) -> Vec<String> {
        let mut lines = vec![
            format!("muset v{}", env!("CARGO_PKG_VERSION")),
            format!("k-mer size (-k): {}", self.kmer.kmer_size),
            format!("Number of threads (-t): {}", self.runtime.threads),
            format!("Minimum unitig length (-l): {}", self.unitig.min_utg_len),
            format!("Minimizer length (-m): {}", self.kmer.mini_size),
            format!("Minimum abundance (-a): {}", self.kmer.min_abundance),
            format!(
                "Skip matrix construction (-i): {}",
                !self.io.source.builds_matrix()
            ),
        ];

        lines.push(match &self.io.source {
            InputSource::SampleList(p) => format!("Input file: {}", p.display()),
            InputSource::Matrix(p) => format!("Input matrix (-i): {}", p.display()),
        });

        lines.extend([
            format!("Output directory (-o): {}", self.io.path_out.display()),
            format!(
                "Write unitig sequence instead of identifier (-s): {}",
                self.unitig.write_seq
            ),
            format!(
                "Minimum k-mer fraction for unitig abundance (-r): {}",
                self.unitig.min_utg_frac
            ),
            format!(
                "Write k-mer fraction matrix (--out-frac): {}",
                self.unitig.write_frac_matrix
            ),
            format!(
                "Unitig abundance metric (--abundance-metric): {}",
                self.unitig.abundance_metric
            ),
            format!(
                "Unitig matrix format (--output-format): {}",
                self.unitig.output_format
            ),
            format!(
                "Write maximal unitig links (-e): {}",
                self.unitig.write_links
            ),
            format!("Input consists of Logan unitigs (--logan): {}", self.kmer.logan),
            format!("Keep temporary files (--keep-temp): {}", self.runtime.keep_tmp),
            "Filter settings:".to_string(),
            format!("K-mer matrix filtering enabled: {}", self.filter.enabled),
            threshold_line("absent", "-n", "-f", self.filter.absent),
            threshold_line("present", "-N", "-F", self.filter.present),
        ]);

        lines
    }
}

fn threshold_line(side: &str, count_flag: &str, frac_flag: &str, t: SampleThreshold) -> String {
    match t {
        SampleThreshold::Count(n) => {
            format!("Min number of samples {} ({}): {}", side, count_flag, n)
        }
        SampleThreshold::Fraction(f) => {
            format!("Min fraction of samples {} ({}): {}", side, frac_flag, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Resolver;
    use super::super::params::RawParameters;
    use crate::runtime::CaptureSink;
    use std::io::Write;

    fn fof() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "S1 : s1.fa").unwrap();
        f
    }

    #[test]
    fn report_has_stable_order() {
        let fof = fof();
        let raw = RawParameters {
            path_fof: Some(fof.path().to_path_buf()),
            kmer_size: 21,
            mini_size: 11,
            ..Default::default()
        };
        let report = Resolver::resolve(&raw, &mut CaptureSink::new())
            .unwrap()
            .report();

        assert_eq!(report.len(), 21);
        assert!(report[0].starts_with("muset v"));
        assert_eq!(report[1], "k-mer size (-k): 21");
        assert_eq!(report[2], "Number of threads (-t): 4");
        assert_eq!(report[3], "Minimum unitig length (-l): 41");
        assert_eq!(report[4], "Minimizer length (-m): 11");
        assert_eq!(report[5], "Minimum abundance (-a): 2");
        assert_eq!(report[6], "Skip matrix construction (-i): false");
        assert_eq!(report[7], format!("Input file: {}", fof.path().display()));
        assert_eq!(report[8], "Output directory (-o): output");
        assert_eq!(report[12], "Unitig abundance metric (--abundance-metric): mean");
        assert_eq!(report[13], "Unitig matrix format (--output-format): txt");
        assert_eq!(report[14], "Write maximal unitig links (-e): false");
        assert_eq!(report[17], "Filter settings:");
        assert_eq!(report[19], "Min fraction of samples absent (-f): 0.1");
        assert_eq!(report[20], "Min fraction of samples present (-F): 0.1");
    }

    #[test]
    fn counts_replace_fractions_in_report() {
        let fof = fof();
        let raw = RawParameters {
            path_fof: Some(fof.path().to_path_buf()),
            min_nb_absent: Some(2),
            min_nb_present: Some(3),
            ..Default::default()
        };
        let report = Resolver::resolve(&raw, &mut CaptureSink::new())
            .unwrap()
            .report();

        assert_eq!(report[19], "Min number of samples absent (-n): 2");
        assert_eq!(report[20], "Min number of samples present (-N): 3");
    }
}
