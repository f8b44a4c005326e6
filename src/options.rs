//! Parser function option lists.
//!
//! Parser functions which accept named options receive them as a flat list of
//! `name=value` strings. A string without a separator is a flag, and is
//! recorded as present with no value.

use crate::php::{htmlspecialchars, trim};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::sync::LazyLock;

/// The value of a parsed option.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionValue {
    /// The option was given without a separator.
    Flag,
    /// The trimmed, HTML-escaped text after the separator.
    Value(String),
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag => serializer.serialize_bool(true),
            Self::Value(value) => serializer.serialize_str(value),
        }
    }
}

/// An ordered map of parsed options.
///
/// Iteration order is the order in which each name was first seen. A later
/// option with the same name replaces the value but keeps the position.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Options(IndexMap<String, OptionValue>);

impl Options {
    /// Returns the value of the option with the given name.
    #[cfg(test)]
    #[inline]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// Returns true if there are no options.
    #[cfg(test)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the options in order.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, OptionValue> {
        self.0.iter()
    }

    /// Returns the number of options.
    #[cfg(test)]
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Removes and returns the option with the given name, keeping the order
    /// of the remaining options.
    #[inline]
    pub fn take(&mut self, name: &str) -> Option<OptionValue> {
        self.0.shift_remove(name)
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = indexmap::map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parses a list of `name=value` strings into [`Options`], splitting each
/// string on the first `separator`.
///
/// Both halves of a pair are trimmed and the value is HTML-escaped. A string
/// without the separator is kept verbatim, untrimmed, as a flag.
pub fn extract_options<I, S>(options: I, separator: char) -> Options
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut results = IndexMap::new();
    for option in options {
        let option = option.as_ref();
        if let Some((name, value)) = option.split_once(separator) {
            let value = htmlspecialchars(trim(value)).into_owned();
            results.insert(trim(name).to_string(), OptionValue::Value(value));
        } else {
            results.insert(option.to_string(), OptionValue::Flag);
        }
    }
    Options(results)
}

/// Extracts `[name=value]` groups from an option value and returns them as a
/// string of HTML attributes, each preceded by a space.
///
/// Groups cannot be nested. A group without a separator gets the value `1`.
/// Returns an empty string if there are no groups.
pub fn extract_sub_options(option: &str) -> String {
    static GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").unwrap());

    let groups = GROUP
        .captures_iter(option)
        .filter_map(|captures| captures.get(1).map(|m| m.as_str()));
    let sub_options = extract_options(groups, '=');

    let mut attributes = String::new();
    for (name, value) in &sub_options {
        attributes.push(' ');
        attributes.push_str(&htmlspecialchars(name));
        // The value was already escaped when the options were extracted.
        // A flag is `true`, which PHP prints as `1`.
        let value = match value {
            OptionValue::Flag => "1",
            OptionValue::Value(value) => value,
        };
        attributes.push_str("=\"");
        attributes.push_str(value);
        attributes.push('"');
    }
    attributes
}
