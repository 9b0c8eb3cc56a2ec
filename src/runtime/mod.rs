// This software is released under the MIT license.
// See file LICENSE for full license details.
mod error;
mod log;

pub use self::error::Error;
pub use self::log::*;
