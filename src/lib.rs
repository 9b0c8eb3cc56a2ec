// This software is released under the MIT license.
// See file LICENSE for full license details.
pub mod command;
pub mod runtime;
pub mod utils;
