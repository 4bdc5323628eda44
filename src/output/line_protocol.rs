//! Line protocol segment encoding
//!
//! Renders a set of key/value pairs as the comma separated `key=value` segment
//! used for both the tag set and the field set of a telegraf line. Only spaces
//! in keys are substituted (with `_`); commas, equals signs and quotes are
//! written verbatim, which is what existing collectors of this output expect.

use crate::output::value::{get_value_types, MetricValue};

/// Encode `sets` as `k=v,k=v`, in the iteration order of `sets`.
///
/// With `quote` set, values that do not type as numbers are wrapped in double
/// quotes. Numeric values are never quoted.
pub fn line_format<'a, I, K>(sets: I, quote: bool) -> String
where
    I: IntoIterator<Item = (K, &'a MetricValue)>,
    K: AsRef<str>,
{
    let store: Vec<String> = sets
        .into_iter()
        .map(|(key, value)| {
            let key = key.as_ref().replace(' ', "_");
            let typed = get_value_types(value, None);
            if quote && !typed.value.is_numeric() {
                format!("{}=\"{}\"", key, typed.value)
            } else {
                format!("{}={}", key, typed.value)
            }
        })
        .collect();

    store.join(",").trim_end_matches(',').to_string()
}
