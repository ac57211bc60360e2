use std::fmt;

use crate::{
    document::node::DocumentNode,
    foundation::core::Point,
    foundation::error::{ChorusError, ChorusResult},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathElem {
    Field(&'static str),
    Index(usize),
}

/// A node plus the path that led to it, so every error names its location.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a, D> {
    node: &'a D,
    path: Vec<PathElem>,
}

impl<'a, D: DocumentNode> Cursor<'a, D> {
    pub(crate) fn root(node: &'a D) -> Self {
        Self {
            node,
            path: Vec::new(),
        }
    }

    fn child(&self, node: &'a D, elem: PathElem) -> Self {
        let mut path = self.path.clone();
        path.push(elem);
        Self { node, path }
    }

    pub(crate) fn path(&self) -> String {
        format_path(&self.path)
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> ChorusError {
        ChorusError::malformed(self.path(), message)
    }

    fn child_error(&self, key: &'static str, message: &str) -> ChorusError {
        let mut path = self.path.clone();
        path.push(PathElem::Field(key));
        ChorusError::malformed(format_path(&path), message)
    }

    pub(crate) fn field(&self, key: &'static str) -> ChorusResult<Self> {
        self.opt_field(key)
            .ok_or_else(|| self.child_error(key, "missing required field"))
    }

    /// Absent and explicit-null fields both read as `None`.
    pub(crate) fn opt_field(&self, key: &'static str) -> Option<Self> {
        match self.node.get(key) {
            Some(n) if !n.is_null() => Some(self.child(n, PathElem::Field(key))),
            _ => None,
        }
    }

    pub(crate) fn array(&self) -> ChorusResult<Vec<Self>> {
        let items = self
            .node
            .as_array()
            .ok_or_else(|| self.error("expected an array"))?;
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, n)| self.child(n, PathElem::Index(i)))
            .collect())
    }

    pub(crate) fn number(&self) -> ChorusResult<f64> {
        let v = self
            .node
            .as_number()
            .ok_or_else(|| self.error("expected a number"))?;
        if !v.is_finite() {
            return Err(self.error("number must be finite"));
        }
        Ok(v)
    }

    pub(crate) fn non_negative(&self) -> ChorusResult<f64> {
        let v = self.number()?;
        if v < 0.0 {
            return Err(self.error(format!("must be >= 0, got {v}")));
        }
        Ok(v)
    }

    pub(crate) fn integer(&self) -> ChorusResult<i64> {
        let v = self.number()?;
        if v.fract() != 0.0 || v.abs() > i64::MAX as f64 {
            return Err(self.error(format!("expected an integer, got {v}")));
        }
        Ok(v as i64)
    }

    pub(crate) fn index(&self) -> ChorusResult<usize> {
        let v = self.integer()?;
        usize::try_from(v).map_err(|_| self.error(format!("expected an index >= 0, got {v}")))
    }

    pub(crate) fn string(&self) -> ChorusResult<&'a str> {
        self.node
            .as_string()
            .ok_or_else(|| self.error("expected a string"))
    }

    /// A `[x, y, z]` triple.
    pub(crate) fn point(&self) -> ChorusResult<Point> {
        let items = self.array()?;
        if items.len() != 3 {
            return Err(self.error(format!(
                "expected [x, y, z], got {} element(s)",
                items.len()
            )));
        }
        Ok(Point::new(
            items[0].number()?,
            items[1].number()?,
            items[2].number()?,
        ))
    }

    pub(crate) fn opt_point(&self, key: &'static str) -> ChorusResult<Option<Point>> {
        self.opt_field(key).map(|c| c.point()).transpose()
    }
}

struct DisplayPath<'p>(&'p [PathElem]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for p in self.0 {
            match *p {
                PathElem::Field(name) => write!(f, ".{name}")?,
                PathElem::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

pub(crate) fn format_path(path: &[PathElem]) -> String {
    DisplayPath(path).to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/document/cursor.rs"]
mod tests;
