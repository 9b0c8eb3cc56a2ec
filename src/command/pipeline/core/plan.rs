// This software is released under the MIT license.
// See file LICENSE for full license details.
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use super::params::{ResolvedConfig, SampleThreshold};
use crate::command::pipeline::constants::{
    PATH_FILTERED_KMERS, PATH_FILTERED_MATRIX, PATH_FILTERED_UNITIGS, PATH_GGCAT_TEMP,
    PATH_KMER_MATRIX, PATH_UNITIGS, TOOL_GGCAT, TOOL_KMAT_TOOLS, TOOL_KMTRICKS,
};
use crate::utils::CompanionTools;

/// One external step of the pipeline: which utility to call and with what.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    name: &'static str,
    utility: &'static str,
    args: Vec<OsString>,
}

impl Stage {
    fn new(name: &'static str, utility: &'static str) -> Self {
        Self {
            name,
            utility,
            args: Vec::new(),
        }
    }

    fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    fn flag(self, enabled: bool, flag: &str) -> Self {
        if enabled {
            self.arg(flag)
        } else {
            self
        }
    }

    fn threshold(self, count_flag: &str, frac_flag: &str, t: SampleThreshold) -> Self {
        match t {
            SampleThreshold::Count(n) => self.arg(count_flag).arg(n.to_string()),
            SampleThreshold::Fraction(f) => self.arg(frac_flag).arg(f.to_string()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn utility(&self) -> &'static str {
        self.utility
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Build the process invocation, using the located path of the utility when known.
    /// Nothing is spawned here.
    pub fn command(&self, tools: &CompanionTools) -> std::process::Command {
        let mut cmd = std::process::Command::new(tools.program(self.utility));
        cmd.args(&self.args);
        cmd
    }
}

/// Ordered external stages derived from a resolved configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelinePlan {
    stages: Vec<Stage>,
}

impl PipelinePlan {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let out = &config.io.path_out;
        let kmer = &config.kmer;
        let unitig = &config.unitig;
        let filter = &config.filter;
        let runtime = &config.runtime;
        let threads = runtime.threads.to_string();

        let path_filtered_matrix = out.join(PATH_FILTERED_MATRIX);
        let path_filtered_kmers = out.join(PATH_FILTERED_KMERS);
        let path_unitigs = out.join(PATH_UNITIGS);
        let path_filtered_unitigs = out.join(PATH_FILTERED_UNITIGS);

        let mut stages = Vec::new();

        let path_kmer_matrix: PathBuf = if config.io.source.builds_matrix() {
            let path_run_dir = out.join(PATH_KMER_MATRIX);
            stages.push(
                Stage::new("kmer-matrix", TOOL_KMTRICKS)
                    .arg("pipeline")
                    .arg("--file")
                    .arg(config.io.source.path())
                    .arg("--run-dir")
                    .arg(&path_run_dir)
                    .arg("--kmer-size")
                    .arg(kmer.kmer_size.to_string())
                    .arg("--hard-min")
                    .arg(kmer.min_abundance.to_string())
                    .arg("--mode")
                    .arg("kmer:count:bin")
                    .arg("--cpr")
                    .arg("--threads")
                    .arg(&threads)
                    .flag(kmer.logan, "--logan"),
            );
            path_run_dir
        } else {
            config.io.source.path().to_path_buf()
        };

        let stage_filter = Stage::new("filter", TOOL_KMAT_TOOLS)
            .arg("filter")
            .arg(&path_kmer_matrix)
            .arg("-o")
            .arg(&path_filtered_matrix)
            .arg("-a")
            .arg(kmer.min_abundance.to_string());
        let stage_filter = if filter.enabled {
            stage_filter
                .threshold("-n", "-f", filter.absent)
                .threshold("-N", "-F", filter.present)
        } else {
            stage_filter
                .threshold("-n", "-f", SampleThreshold::Count(0))
                .threshold("-N", "-F", SampleThreshold::Count(0))
        };
        stages.push(
            stage_filter
                .arg("-t")
                .arg(&threads)
                .flag(runtime.keep_tmp, "--keep-tmp"),
        );

        stages.push(
            Stage::new("fasta", TOOL_KMAT_TOOLS)
                .arg("fasta")
                .arg(&path_filtered_matrix)
                .arg("-o")
                .arg(&path_filtered_kmers),
        );

        stages.push(
            Stage::new("unitigs", TOOL_GGCAT)
                .arg("build")
                .arg("-j")
                .arg(&threads)
                .arg("-k")
                .arg(kmer.kmer_size.to_string())
                .arg("-s")
                .arg("1")
                .flag(unitig.write_links, "-e")
                .arg("-o")
                .arg(&path_unitigs)
                .flag(runtime.keep_tmp, "--keep-temp-files")
                .arg("--temp-dir")
                .arg(out.join(PATH_GGCAT_TEMP))
                .arg(&path_filtered_kmers),
        );

        stages.push(
            Stage::new("fafmt", TOOL_KMAT_TOOLS)
                .arg("fafmt")
                .arg("-l")
                .arg(unitig.min_utg_len.to_string())
                .arg("-o")
                .arg(&path_filtered_unitigs)
                .arg(&path_unitigs),
        );

        stages.push(
            Stage::new("unitig-matrix", TOOL_KMAT_TOOLS)
                .arg("unitig")
                .arg("-k")
                .arg(kmer.kmer_size.to_string())
                .arg("-m")
                .arg(kmer.mini_size.to_string())
                .arg("-p")
                .arg(&path_unitigs)
                .arg("-f")
                .arg(unitig.min_utg_frac.to_string())
                .flag(unitig.write_frac_matrix, "--out-frac")
                .flag(unitig.write_seq, "-s")
                .arg("--abundance-metric")
                .arg(unitig.abundance_metric.as_str())
                .arg("--output-format")
                .arg(unitig.output_format.as_str())
                .arg("-t")
                .arg(&threads)
                .arg(&path_filtered_unitigs)
                .arg(&path_filtered_matrix),
        );

        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Utilities the plan needs, in order of first use.
    pub fn utilities(&self) -> Vec<&'static str> {
        let mut utilities: Vec<&'static str> = Vec::new();
        for stage in &self.stages {
            if !utilities.contains(&stage.utility) {
                utilities.push(stage.utility);
            }
        }
        utilities
    }
}
