use serde::{Deserialize, Serialize};

use crate::foundation::core::Seconds;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Named, numbered marker on the routine timeline, used for seeking.
pub struct Breakpoint {
    /// Display name.
    pub name: String,
    /// Ordinal.
    pub number: u32,
    /// Offset from routine start.
    pub time_offset: Seconds,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// Breakpoints in document order.
pub struct Breakpoints(Vec<Breakpoint>);

impl Breakpoints {
    /// Wrap an ordered list.
    pub fn new(items: Vec<Breakpoint>) -> Self {
        Self(items)
    }

    /// First breakpoint called `name`.
    pub fn by_name(&self, name: &str) -> Option<&Breakpoint> {
        self.0.iter().find(|b| b.name == name)
    }

    /// First breakpoint numbered `number`.
    pub fn by_number(&self, number: u32) -> Option<&Breakpoint> {
        self.0.iter().find(|b| b.number == number)
    }

    /// Earliest breakpoint strictly after `t`.
    pub fn next_after(&self, t: Seconds) -> Option<&Breakpoint> {
        self.0
            .iter()
            .filter(|b| b.time_offset > t)
            .min_by(|a, b| a.time_offset.total_cmp(&b.time_offset))
    }

    /// All breakpoints in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Breakpoint> {
        self.0.iter()
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the document had no breakpoints.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[Breakpoint] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Breakpoints {
    type Item = &'a Breakpoint;
    type IntoIter = std::slice::Iter<'a, Breakpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/routine/breakpoint.rs"]
mod tests;
