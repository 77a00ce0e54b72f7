//! The graph store: declaration nodes and their use-site instances.
//!
//! Every distinct declaration string owns one [`Dnode`], keyed by its
//! fingerprint. Each use-site of that declaration is one [`Cnode`] held in
//! the owning `Dnode`'s `siblings` map. Edges are `(order, crc)` pairs,
//! never live references: `order` is a graph-global dense counter assigned
//! at insertion, so an edge names one exact instance and cycles are plain
//! data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::crc::{Crc, fingerprint};
use crate::flags::Ctl;

/// Reference to one instance: the owning declaration's crc plus the
/// instance's order index within it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub order: u32,
    pub crc: Crc,
}

impl Edge {
    /// Sentinel for "no parent"; file roots carry it and traversals stop
    /// when they reach it.
    pub const NONE: Edge = Edge { order: 0, crc: 0 };

    pub fn new(order: u32, crc: Crc) -> Self {
        Self { order, crc }
    }

    pub fn is_none(self) -> bool {
        self.crc == 0
    }
}

/// One use-site of a declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cnode {
    /// Identifier at the use-site; empty for anonymous types and returns.
    pub name: String,
    /// Nesting depth from the file root of the use-site.
    pub level: u32,
    pub flags: Ctl,
    /// The instance that enclosed this one; `Edge::NONE` for file roots.
    pub parent: Edge,
    /// Fingerprint of the enclosing exported function.
    pub function: Crc,
    /// Fingerprint of the enclosing top-level argument or return slot.
    pub argument: Crc,
}

/// Canonical record for one distinct declaration string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dnode {
    pub crc: Crc,
    pub decl: String,
    /// Member instances in declaration order, one edge per use-site
    /// created while descending from an instance of this declaration.
    pub children: Vec<Edge>,
    /// Use-sites of this declaration, keyed by order index, in insertion
    /// order.
    pub siblings: IndexMap<u32, Cnode>,
}

impl Dnode {
    fn new(crc: Crc, decl: &str) -> Self {
        Self {
            crc,
            decl: decl.to_owned(),
            children: Vec::new(),
            siblings: IndexMap::new(),
        }
    }

    pub fn sibling(&self, order: u32) -> Option<&Cnode> {
        self.siblings.get(&order)
    }

    pub fn first_sibling(&self) -> Option<(u32, &Cnode)> {
        self.siblings.iter().next().map(|(o, cn)| (*o, cn))
    }

    /// The unique `EXPORTED` sibling, if this node is an exported symbol.
    pub fn exported(&self) -> Option<(u32, &Cnode)> {
        let mut found = None;
        for (order, cn) in &self.siblings {
            if cn.flags.contains(Ctl::EXPORTED) {
                if found.is_some() {
                    return None;
                }
                found = Some((*order, cn));
            }
        }
        found
    }
}

/// Mapping fingerprint → declaration node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeGraph {
    dnodes: IndexMap<Crc, Dnode>,
    next_order: u32,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct declarations.
    pub fn len(&self) -> usize {
        self.dnodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dnodes.is_empty()
    }

    pub fn contains(&self, crc: Crc) -> bool {
        self.dnodes.contains_key(&crc)
    }

    /// Fingerprint `decl` and create its node if absent.
    pub fn insert_or_get(&mut self, decl: &str) -> (Crc, bool) {
        let crc = fingerprint(decl);
        let is_new = !self.dnodes.contains_key(&crc);
        if is_new {
            self.dnodes.insert(crc, Dnode::new(crc, decl));
        }
        (crc, is_new)
    }

    pub fn lookup(&self, crc: Crc) -> Option<&Dnode> {
        self.dnodes.get(&crc)
    }

    /// Record one use-site of declaration `crc`.
    ///
    /// Appends a child edge to the parent named by `instance.parent` (file
    /// roots carry `Edge::NONE` and link nowhere) and the instance itself
    /// to its declaration's siblings. Returns the new order index.
    ///
    /// # Panics
    /// Panics if `crc` or a non-sentinel parent is not in the store; both
    /// are programming faults in the builder.
    pub fn add_instance(&mut self, crc: Crc, instance: Cnode) -> u32 {
        let order = self.next_order;
        self.next_order += 1;

        let parent = instance.parent;
        if !parent.is_none() {
            let pdn = self
                .dnodes
                .get_mut(&parent.crc)
                .expect("add_instance: unknown parent declaration");
            pdn.children.push(Edge::new(order, crc));
        }
        let dn = self
            .dnodes
            .get_mut(&crc)
            .expect("add_instance: unknown child declaration");
        dn.siblings.insert(order, instance);
        order
    }

    /// All declaration nodes, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Dnode> {
        self.dnodes.values()
    }

    /// Merge another store into this one.
    ///
    /// Incoming order indexes are rebased past this store's counter
    /// (relative order preserved, parent and child edges rewritten alike),
    /// then colliding declarations keep this store's identity and take the
    /// incoming siblings and child edges on top.
    pub fn merge(&mut self, other: TypeGraph) {
        let base = self.next_order;

        for (_, dn) in other.dnodes {
            let children: Vec<Edge> = dn
                .children
                .iter()
                .map(|e| Edge::new(e.order + base, e.crc))
                .collect();
            let siblings: IndexMap<u32, Cnode> = dn
                .siblings
                .into_iter()
                .map(|(order, mut cn)| {
                    if !cn.parent.is_none() {
                        cn.parent.order += base;
                    }
                    (order + base, cn)
                })
                .collect();

            match self.dnodes.get_mut(&dn.crc) {
                Some(existing) => {
                    existing.children.extend(children);
                    existing.siblings.extend(siblings);
                }
                None => {
                    self.dnodes.insert(
                        dn.crc,
                        Dnode {
                            crc: dn.crc,
                            decl: dn.decl,
                            children,
                            siblings,
                        },
                    );
                }
            }
        }

        self.next_order = base + other.next_order;
    }
}
