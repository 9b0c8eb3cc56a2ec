// This software is released under the MIT license.
// See file LICENSE for full license details.
use std::fmt::Display;
use std::str::FromStr;

use crate::runtime::Error;

/// Parse `raw` and check it against the closed interval `[min, max]`.
/// NaN never satisfies the bounds, so it is rejected as out of range.
pub fn parse_bounded<T>(field: &str, raw: &str, min: T, max: T) -> Result<T, Error>
where
    T: FromStr + PartialOrd + Display + Copy,
    T::Err: Display,
{
    let raw = raw.trim();
    let value: T = raw
        .parse()
        .map_err(|e: T::Err| Error::invalid_argument(field, raw, e.to_string()))?;

    check_bounded(field, value, min, max).map_err(|_| Error::out_of_range(field, raw, min, max))
}

/// Check an already typed value against the closed interval `[min, max]`.
pub fn check_bounded<T>(field: &str, value: T, min: T, max: T) -> Result<T, Error>
where
    T: PartialOrd + Display + Copy,
{
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(Error::out_of_range(field, value, min, max))
    }
}

/// Build a clap value parser for a bounded numeric option, reporting failures
/// as `runtime::Error` so the command can recover the kind from the clap error.
#[macro_export]
macro_rules! bounded_parser {
    ($field:expr, $prim:ty, $min:expr, $max:expr) => {
        |raw: &str| -> ::std::result::Result<$prim, $crate::runtime::Error> {
            $crate::utils::parse_bounded::<$prim>($field, raw, $min, $max)
        }
    };
}
