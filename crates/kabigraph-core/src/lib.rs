//! Core data structures for the kabi type graph.
//!
//! Three layers:
//! - **Fingerprint** (`crc`): stable 32-bit identity of a declaration string
//! - **Graph store** (`graph`): crc-keyed declaration nodes, each owning the
//!   ordered set of its use-site instances
//! - **Persistence** (`db`): checksummed segment files that round-trip the
//!   store and merge on load

pub mod crc;
pub mod db;
pub mod dump;
pub mod flags;
pub mod graph;


pub use crc::{Crc, fingerprint};
pub use db::DbError;
pub use flags::Ctl;
pub use graph::{Cnode, Dnode, Edge, TypeGraph};
