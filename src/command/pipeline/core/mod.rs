// This software is released under the MIT license.
// See file LICENSE for full license details.
pub mod core;
pub mod params;
pub mod plan;
mod report;
