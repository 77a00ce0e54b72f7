//! Query engine for kabi type-graph databases.
//!
//! [`Lookup`](lookup::Lookup) resolves a query string against a loaded
//! store and walks the graph: down from exported functions, up from
//! nested compounds. [`RowMan`](rowman::RowMan) turns the visited
//! instances into the hierarchical text output.

pub mod lookup;
pub mod rowman;

#[cfg(test)]
mod lookup_tests;
#[cfg(test)]
mod rowman_tests;

pub use lookup::Lookup;
pub use rowman::{Row, RowMan};
