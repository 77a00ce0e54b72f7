//! Debug listing of a graph store.
//!
//! One block per declaration node: the crc/decl line, then every use-site
//! with its provenance, then the child edges. Used by `kabi-parser --dump`
//! and by tests that want to eyeball a whole store.

use std::fmt::Write;

use crate::graph::TypeGraph;

impl TypeGraph {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        for dn in self.iter() {
            writeln!(w, "crc: {:08x} decl: {}", dn.crc, dn.decl)?;
            for (order, cn) in &dn.siblings {
                write!(w, "  [{order}] level {} flags {:04x}", cn.level, cn.flags.bits())?;
                if !cn.name.is_empty() {
                    write!(w, " name {}", cn.name)?;
                }
                writeln!(
                    w,
                    " parent {:08x}/{} fn {:08x} arg {:08x}",
                    cn.parent.crc, cn.parent.order, cn.function, cn.argument
                )?;
            }
            for edge in &dn.children {
                writeln!(w, "  -> [{}] {:08x}", edge.order, edge.crc)?;
            }
        }
        Ok(())
    }
}
