//! Instance control flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Role and shape of one use-site instance.
    ///
    /// The first four bits tag the nesting role (file root, export line,
    /// argument/return slot, nested member); the rest describe the type
    /// itself and how the builder handled it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Ctl: u16 {
        /// File root of a translation unit.
        const FILE = 1 << 0;
        /// Exported function (or exported object).
        const EXPORTED = 1 << 1;
        /// Positional argument of an exported function.
        const ARG = 1 << 2;
        /// Return slot of an exported function.
        const RETURN = 1 << 3;
        /// Member reached by descending into a compound type.
        const NESTED = 1 << 4;
        /// The base-type chain went through a pointer link.
        const POINTER = 1 << 5;
        /// Struct or union declaration.
        const STRUCT = 1 << 6;
        /// Function declaration.
        const FUNCTION = 1 << 7;
        /// Carries a member list the builder descends into.
        const HAS_MEMBERS = 1 << 8;
        /// Declaration equals its direct parent's; traversal stops here.
        const BACK_PTR = 1 << 9;
        /// Use-site of a compound already explored elsewhere.
        const IS_DUP = 1 << 10;
    }
}

impl Default for Ctl {
    fn default() -> Self {
        Ctl::empty()
    }
}
