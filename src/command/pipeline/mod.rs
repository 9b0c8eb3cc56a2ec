// This software is released under the MIT license.
// See file LICENSE for full license details.
pub mod command;
pub mod constants;
pub mod core;

pub use command::intake_error;
pub use command::Command;

pub use self::core::core::Resolver;
pub use self::core::params::{InputSource, RawParameters, ResolvedConfig, SampleThreshold};
pub use self::core::plan::{PipelinePlan, Stage};
