//! Document access: the tree capability the loader reads through, and path-tracking helpers.

pub(crate) mod cursor;
pub(crate) mod node;
