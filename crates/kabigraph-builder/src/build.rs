//! The type-graph builder.
//!
//! Scans each translation unit for `__ksymtab_` markers, resolves every
//! export to its internal declaration and grows one branch per export:
//! file root, export line, return and argument instances, then nested
//! members of every compound type reached. Duplicate compounds and
//! back-pointers link into the graph but are never descended into.

use kabigraph_core::{Cnode, Crc, Ctl, Edge, TypeGraph, fingerprint};

use crate::sym::{Symbol, TranslationUnit, Type};
use crate::walk::{FunctionParts, Walked, walk_chain};

/// Marker prefix of an exported symbol.
pub const KSYM_PREFIX: &str = "__ksymtab_";

/// Builds the type graph for a sequence of translation units.
pub struct Builder<'g> {
    graph: &'g mut TypeGraph,
    found_exports: bool,
}

impl<'g> Builder<'g> {
    pub fn new(graph: &'g mut TypeGraph) -> Self {
        Self {
            graph,
            found_exports: false,
        }
    }

    /// Whether any export resolved so far, across all units.
    pub fn found_exports(&self) -> bool {
        self.found_exports
    }

    /// Process a parsed unit; `path` stands in when the dump carries no
    /// file name of its own.
    pub fn build_translation_unit(&mut self, unit: &TranslationUnit, path: &str) {
        let file = unit.file.as_deref().unwrap_or(path);
        self.build_unit(file, &unit.symbols);
    }

    /// Process the top-level symbols of one unit.
    pub fn build_unit(&mut self, file: &str, symbols: &[Symbol]) {
        for sym in symbols {
            let Some(ident) = sym.ident.as_deref() else {
                continue;
            };
            let Some(name) = ident.strip_prefix(KSYM_PREFIX) else {
                continue;
            };
            // Exports without a resolvable internal declaration are
            // silently skipped.
            let Some(target) = find_internal_exported(symbols, name) else {
                continue;
            };
            self.build_branch(file, name, target);
        }
    }

    fn build_branch(&mut self, file: &str, name: &str, target: &Symbol) {
        self.found_exports = true;

        let (file_crc, _) = self.graph.insert_or_get(file);
        let root_order = self.graph.add_instance(
            file_crc,
            Cnode {
                name: String::new(),
                level: 0,
                flags: Ctl::FILE,
                parent: Edge::NONE,
                function: 0,
                argument: 0,
            },
        );

        let walked = walk_chain(target.base.as_deref());
        let mut flags = walked.flags | Ctl::EXPORTED;
        if !flags.contains(Ctl::STRUCT) {
            flags.remove(Ctl::HAS_MEMBERS);
        }

        // Exports are keyed by name: the same function must alias across
        // units regardless of where its declaration tokens came from.
        let (exp_crc, _) = self.graph.insert_or_get(name);
        let exp_order = self.graph.add_instance(
            exp_crc,
            Cnode {
                name: name.to_owned(),
                level: 1,
                flags,
                parent: Edge::new(root_order, file_crc),
                function: exp_crc,
                argument: 0,
            },
        );
        let exp_edge = Edge::new(exp_order, exp_crc);

        if let Some(FunctionParts { ret, args }) = walked.function {
            self.add_symbol(None, ret, Ctl::RETURN, exp_edge, 2, exp_crc, None);
            for arg in args {
                self.add_symbol(
                    arg.ident.as_deref(),
                    arg.base.as_deref(),
                    Ctl::ARG,
                    exp_edge,
                    2,
                    exp_crc,
                    None,
                );
            }
        } else if flags.contains(Ctl::HAS_MEMBERS) {
            // Exported compound object: walk its members directly.
            for member in walked.members {
                self.add_symbol(
                    member.ident.as_deref(),
                    member.base.as_deref(),
                    Ctl::NESTED,
                    exp_edge,
                    2,
                    exp_crc,
                    Some(exp_crc),
                );
            }
        }
    }

    /// Record one instance and descend into its members when it is the
    /// first full occurrence of a compound.
    #[allow(clippy::too_many_arguments)]
    fn add_symbol(
        &mut self,
        name: Option<&str>,
        chain: Option<&Type>,
        role: Ctl,
        parent: Edge,
        level: u32,
        function: Crc,
        argument: Option<Crc>,
    ) {
        let walked = walk_chain(chain);
        let name = name.unwrap_or("");

        let mut flags = walked.flags | role;
        // Only struct/union member lists matter.
        if !flags.contains(Ctl::STRUCT) {
            flags.remove(Ctl::HAS_MEMBERS);
        }

        let decl = compose_decl(&walked, name, flags);
        let crc = fingerprint(&decl);

        if crc == parent.crc {
            flags.insert(Ctl::BACK_PTR);
            flags.remove(Ctl::HAS_MEMBERS);
        } else if flags.contains(Ctl::HAS_MEMBERS) && self.graph.contains(crc) {
            flags.remove(Ctl::HAS_MEMBERS);
            flags.insert(Ctl::IS_DUP);
        }

        self.graph.insert_or_get(&decl);
        let argument = argument.unwrap_or(crc);
        let order = self.graph.add_instance(
            crc,
            Cnode {
                name: name.to_owned(),
                level,
                flags,
                parent,
                function,
                argument,
            },
        );

        if flags.contains(Ctl::HAS_MEMBERS) {
            let me = Edge::new(order, crc);
            for member in walked.members {
                self.add_symbol(
                    member.ident.as_deref(),
                    member.base.as_deref(),
                    Ctl::NESTED,
                    me,
                    level + 1,
                    function,
                    Some(argument),
                );
            }
        }
    }
}

/// The declaration string the fingerprint is computed from: compounds are
/// keyed by their type tokens alone, everything else includes the
/// use-site identifier.
fn compose_decl(walked: &Walked<'_>, name: &str, flags: Ctl) -> String {
    let decl = walked.decl();
    if flags.contains(Ctl::STRUCT) || name.is_empty() {
        decl
    } else if decl.is_empty() {
        name.to_owned()
    } else {
        format!("{decl} {name}")
    }
}

/// Resolve an export name to its internal declaration in the same unit.
fn find_internal_exported<'a>(symbols: &'a [Symbol], name: &str) -> Option<&'a Symbol> {
    symbols.iter().find(|sym| {
        sym.ident.as_deref() == Some(name)
            && sym.base.as_deref().is_some_and(Type::is_exportable)
    })
}
