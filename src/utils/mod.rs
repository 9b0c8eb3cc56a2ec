// This software is released under the MIT license.
// See file LICENSE for full license details.
mod clap_utils;
mod command_to_string;
mod detect_software;

pub use clap_utils::check_bounded;
pub use clap_utils::parse_bounded;

pub use command_to_string::command_to_string;

pub use detect_software::check_companions;
pub use detect_software::CompanionTools;
pub use detect_software::DependencyPolicy;
pub use detect_software::SearchPath;
