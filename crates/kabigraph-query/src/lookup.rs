//! Query resolution and graph traversal.
//!
//! Whole-word resolution fingerprints the query and hits the store
//! directly; substring resolution scans every declaration. The three
//! structural queries walk the graph from there:
//!
//! - *exports* walks down from an exported function over its children,
//! - *members* walks down from a compound and rebases levels to it,
//! - *affects* walks up from every use-site of a compound to the
//!   exported functions that reach it, one traversal per ancestry group.

use kabigraph_core::{Cnode, Crc, Ctl, Dnode, Edge, TypeGraph, fingerprint};

use crate::rowman::{Row, RowMan};

/// Upward traversals across the degenerate file/export levels cannot
/// match on provenance; below this level the first sibling stands in.
const ROOT_LEVELS: u32 = 3;

/// Query engine over a loaded store.
pub struct Lookup<'g> {
    graph: &'g TypeGraph,
    whole_word: bool,
    verbose: bool,
}

impl<'g> Lookup<'g> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        Self {
            graph,
            whole_word: false,
            verbose: true,
        }
    }

    /// Match the query as a whole declaration instead of a substring.
    pub fn whole_word(mut self, yes: bool) -> Self {
        self.whole_word = yes;
        self
    }

    /// Emit nested descendants; on by default.
    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    fn resolve(&self, query: &str) -> Vec<&'g Dnode> {
        if self.whole_word {
            self.graph.lookup(fingerprint(query)).into_iter().collect()
        } else {
            self.graph
                .iter()
                .filter(|dn| dn.decl.contains(query))
                .collect()
        }
    }

    /// Count query: use-sites of the exact declaration in whole-word
    /// mode, matching declarations otherwise. Zero means not found.
    pub fn count(&self, query: &str) -> usize {
        if self.whole_word {
            self.graph
                .lookup(fingerprint(query))
                .map_or(0, |dn| dn.siblings.len())
        } else {
            self.resolve(query).len()
        }
    }

    /// Exported functions matching the query; returns how many matched.
    pub fn exports(&self, query: &str, rowman: &mut RowMan) -> usize {
        let mut matched = 0;
        for dn in self.resolve(query) {
            let Some((order, cn)) = dn.exported() else {
                continue;
            };
            matched += 1;
            self.push_file_row(cn, rowman);
            rowman.push(self.row(dn, cn));
            self.walk_down(dn, order, rowman);
            rowman.put_rows_from_front(self.verbose);
        }
        matched
    }

    /// Compound listing: the declaration and its member tree, levels
    /// rebased so the compound starts at column 0.
    pub fn members(&self, query: &str, rowman: &mut RowMan) -> usize {
        let mut matched = 0;
        for dn in self.resolve(query) {
            // Prefer the use-site that was actually descended into.
            let canonical = dn
                .siblings
                .iter()
                .find(|(_, cn)| cn.flags.contains(Ctl::HAS_MEMBERS))
                .map(|(order, cn)| (*order, cn));
            let Some((order, cn)) = canonical.or_else(|| dn.first_sibling()) else {
                continue;
            };
            matched += 1;
            rowman.push(self.row(dn, cn));
            self.walk_down(dn, order, rowman);
            rowman.put_rows_from_front_normalized(self.verbose);
        }
        matched
    }

    /// Every exported function reaching the queried declaration: one
    /// upward traversal per ancestry group, deepest use-site first.
    pub fn affects(&self, query: &str, rowman: &mut RowMan) -> usize {
        let mut matched = 0;
        for dn in self.resolve(query) {
            matched += 1;
            for (_, cn) in ancestry_group_heads(dn) {
                self.walk_up(dn, cn, rowman);
                rowman.put_rows_from_back(self.verbose);
            }
        }
        matched
    }

    fn push_file_row(&self, cn: &Cnode, rowman: &mut RowMan) {
        if cn.parent.is_none() {
            return;
        }
        let fdn = self
            .graph
            .lookup(cn.parent.crc)
            .expect("dangling parent reference");
        let fcn = fdn
            .sibling(cn.parent.order)
            .expect("dangling parent instance");
        rowman.push(self.row(fdn, fcn));
    }

    /// Pre-order over the member instances created under the instance
    /// `order` of `dn`. Only instances still carrying `HAS_MEMBERS` were
    /// descended into at build time, and back-pointers are terminal, so
    /// this cannot cycle.
    fn walk_down(&self, dn: &Dnode, order: u32, rowman: &mut RowMan) {
        for edge in &dn.children {
            let cdn = self
                .graph
                .lookup(edge.crc)
                .expect("dangling child reference");
            let ccn = cdn
                .sibling(edge.order)
                .expect("dangling child instance");
            if ccn.parent != Edge::new(order, dn.crc) {
                continue;
            }
            rowman.push(self.row(cdn, ccn));
            if ccn.flags.contains(Ctl::HAS_MEMBERS) && !ccn.flags.contains(Ctl::BACK_PTR) {
                self.walk_down(cdn, edge.order, rowman);
            }
        }
    }

    fn walk_up(&self, dn: &Dnode, cn: &Cnode, rowman: &mut RowMan) {
        rowman.push(self.row(dn, cn));

        if cn.parent.is_none() {
            // Root reached.
            return;
        }
        let pdn = self
            .graph
            .lookup(cn.parent.crc)
            .expect("dangling parent reference");
        let Some(target_level) = cn.level.checked_sub(1) else {
            return;
        };

        // The unique sibling one level up with the same provenance;
        // smallest order on a tie.
        let candidate = pdn
            .siblings
            .iter()
            .map(|(order, p)| (*order, p))
            .filter(|(_, p)| {
                p.level == target_level
                    && p.function == cn.function
                    && p.argument == cn.argument
            })
            .min_by_key(|(order, _)| *order);

        let selected = match candidate {
            Some(found) => Some(found),
            // File and export roots have degenerate ancestry.
            None if target_level < ROOT_LEVELS => pdn.first_sibling(),
            None => None,
        };
        if let Some((_, pcn)) = selected {
            self.walk_up(pdn, pcn, rowman);
        }
    }

    fn row(&self, dn: &Dnode, cn: &Cnode) -> Row {
        Row {
            level: cn.level,
            flags: cn.flags,
            decl: row_decl(dn, cn),
            name: cn.name.clone(),
        }
    }
}

/// Display form of an instance's declaration.
///
/// An export's declaration is its name, which the row already carries.
/// Non-compound declarations end with the use-site identifier; strip it
/// so the identifier prints once, in the name column.
fn row_decl(dn: &Dnode, cn: &Cnode) -> String {
    if cn.flags.contains(Ctl::EXPORTED) {
        return String::new();
    }
    if cn.flags.contains(Ctl::STRUCT) || cn.name.is_empty() {
        return dn.decl.clone();
    }
    match dn.decl.strip_suffix(cn.name.as_str()) {
        Some(rest) => rest.trim_end().to_owned(),
        None => dn.decl.clone(),
    }
}

/// Partition a declaration's use-sites into contiguous runs sharing the
/// same `(argument, function)` and pick each run's deepest instance
/// (first one on equal depth).
fn ancestry_group_heads(dn: &Dnode) -> Vec<(u32, &Cnode)> {
    let mut heads: Vec<(u32, &Cnode)> = Vec::new();
    let mut current_key: Option<(Crc, Crc)> = None;
    let mut best: Option<(u32, &Cnode)> = None;

    for (order, cn) in &dn.siblings {
        let key = (cn.argument, cn.function);
        if current_key != Some(key) {
            if let Some(head) = best.take() {
                heads.push(head);
            }
            current_key = Some(key);
            best = Some((*order, cn));
        } else if let Some((_, best_cn)) = best {
            if cn.level > best_cn.level {
                best = Some((*order, cn));
            }
        }
    }
    if let Some(head) = best {
        heads.push(head);
    }
    heads
}
