//! A single CSV record.

use std::fmt;

use itertools::Itertools;

/// The fields of one logical line, in order.
///
/// A field is `None` when it is absent, which only happens for empty quoted
/// fields. Fields split in bare mode are always present.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    fields: Vec<Option<String>>,
}

impl Record {
    #[must_use]
    pub fn new(fields: Vec<Option<String>>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the value of the `i`-th field.
    ///
    /// An absent field and an out-of-range index both yield `None`; use
    /// [`field`](Self::field) to tell them apart.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&str> {
        self.fields.get(i)?.as_deref()
    }

    /// Returns the `i`-th field, or `None` if `i` is out of range.
    #[inline]
    #[must_use]
    pub fn field(&self, i: usize) -> Option<Option<&str>> {
        self.fields.get(i).map(Option::as_deref)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.fields.iter().map(Option::as_deref)
    }

    #[must_use]
    pub fn into_fields(self) -> Vec<Option<String>> {
        self.fields
    }
}

impl From<Vec<Option<String>>> for Record {
    fn from(fields: Vec<Option<String>>) -> Self {
        Self::new(fields)
    }
}

/// Writes the fields separated by commas, with absent fields left empty.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().map(|v| v.unwrap_or_default()).join(","))
    }
}
