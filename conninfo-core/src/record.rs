//! The resolved set of connection options.

use crate::error::{ConnInfoError, ConnInfoResult, OptionOrigin};
use crate::schema::{self, OPTION_COUNT, OPTIONS};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// One value per schema option, each either set or explicitly unset.
///
/// The key set of a record is always exactly the schema's name set: values
/// live in a fixed slot array indexed by schema position, so there is no way
/// to insert an unknown key or to lose a known one.
#[derive(Clone, PartialEq, Eq)]
pub struct OptionRecord {
    values: [Option<String>; OPTION_COUNT],
}

impl Default for OptionRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionRecord {
    /// Create a record with every option unset.
    pub fn new() -> Self {
        Self {
            values: std::array::from_fn(|_| None),
        }
    }

    /// Get the value of an option.
    ///
    /// Returns `None` both for unset options and for names outside the schema.
    pub fn get(&self, name: &str) -> Option<&str> {
        schema::index_of(name).and_then(|i| self.values[i].as_deref())
    }

    /// Check if an option has a value.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set an option, replacing any previous value.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<String>,
        origin: OptionOrigin,
    ) -> ConnInfoResult<()> {
        let i = schema::index_of(name)
            .ok_or_else(|| ConnInfoError::unknown_option(name, origin))?;
        self.values[i] = Some(value.into());
        Ok(())
    }

    /// Unset an option. Unknown names are ignored.
    pub fn clear(&mut self, name: &str) {
        if let Some(i) = schema::index_of(name) {
            self.values[i] = None;
        }
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&str> {
        self.values[index].as_deref()
    }

    pub(crate) fn set_slot(&mut self, index: usize, value: String) {
        self.values[index] = Some(value);
    }

    /// Iterate over every option in schema order, including unset ones.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        OPTIONS
            .iter()
            .zip(self.values.iter())
            .map(|(spec, value)| (spec.name, value.as_deref()))
    }

    /// Iterate over the options that have a value.
    pub fn iter_set(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
    }

    /// Number of options with a value.
    pub fn len_set(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Check if no option has a value.
    pub fn is_empty(&self) -> bool {
        self.len_set() == 0
    }

    /// Copy values from `other` into every option that is unset here.
    ///
    /// Returns the number of options filled.
    pub fn fill_unset_from(&mut self, other: &OptionRecord) -> usize {
        let mut filled = 0;
        for (mine, theirs) in self.values.iter_mut().zip(other.values.iter()) {
            if mine.is_none() {
                if let Some(value) = theirs {
                    *mine = Some(value.clone());
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Render the set options as a keyword/value connection string.
    ///
    /// Every value is single-quoted with `\` and `'` escaped, so parsing the
    /// output yields a record equal to this one.
    pub fn to_keyword_value(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter_set() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(name);
            out.push_str("='");
            for c in value.chars() {
                if c == '\\' || c == '\'' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('\'');
        }
        out
    }
}

impl fmt::Debug for OptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.iter_set() {
            if name == "password" || name == "sslpassword" {
                map.entry(&name, &"********");
            } else {
                map.entry(&name, &value);
            }
        }
        map.finish()
    }
}

impl Serialize for OptionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(OPTION_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
