// This software is released under the MIT license.
// See file LICENSE for full license details.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{field} value ({value}) is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Input file missing. Give an INPUT_FILE or a pre-built matrix with -i. Try 'muset -h' for more information.")]
    MissingInput,

    #[error("{} \"{}\" does not exist or is not a file", role, path.display())]
    FileNotFound {
        role: String,
        path: std::path::PathBuf,
    },

    #[error("{} \"{}\" is empty", role, path.display())]
    EmptyFile {
        role: String,
        path: std::path::PathBuf,
    },

    #[error("Minimizer size (-m) value ({mini_size}) must be smaller than k-mer size (-k) value ({kmer_size}).")]
    OrderingViolation { mini_size: u32, kmer_size: u32 },

    #[error("Options {supplied} and {missing} must be given together, but only {supplied} was set (to {value}).")]
    IncoherentFilterOverride {
        supplied: String,
        missing: String,
        value: u32,
    },

    #[error("Option {option} cannot be used here: {reason}")]
    IncompatibleOption { option: String, reason: String },

    #[error("Companion executable '{utility}' was not found in search path: {search_path}")]
    MissingDependency {
        utility: String,
        search_path: String,
    },
}

impl Error {
    #[cold]
    pub fn invalid_argument<F: Into<String>, V: Into<String>, R: Into<String>>(
        field: F,
        value: V,
        reason: R,
    ) -> Self {
        Error::InvalidArgument {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    #[cold]
    pub fn out_of_range<F: Into<String>, V: ToString, B: ToString>(
        field: F,
        value: V,
        min: B,
        max: B,
    ) -> Self {
        Error::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    #[cold]
    pub fn file_not_found<R: Into<String>, P: AsRef<std::path::Path>>(role: R, path: P) -> Self {
        Error::FileNotFound {
            role: role.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn empty_file<R: Into<String>, P: AsRef<std::path::Path>>(role: R, path: P) -> Self {
        Error::EmptyFile {
            role: role.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn incoherent_filter_override<S: Into<String>, M: Into<String>>(
        supplied: S,
        missing: M,
        value: u32,
    ) -> Self {
        Error::IncoherentFilterOverride {
            supplied: supplied.into(),
            missing: missing.into(),
            value,
        }
    }

    #[cold]
    pub fn incompatible_option<O: Into<String>, R: Into<String>>(option: O, reason: R) -> Self {
        Error::IncompatibleOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    #[cold]
    pub fn missing_dependency<U: Into<String>, S: Into<String>>(utility: U, search_path: S) -> Self {
        Error::MissingDependency {
            utility: utility.into(),
            search_path: search_path.into(),
        }
    }
}
