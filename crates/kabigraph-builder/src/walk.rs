//! Declaration reconstruction.
//!
//! Walks a base-type chain and produces the token list the declaration
//! string and fingerprint are built from, the flags the links imply, and
//! the payloads (member list, function parts) the builder descends into
//! afterwards.

use kabigraph_core::Ctl;

use crate::modstr::{Modifiers, modifier_string};
use crate::sym::{Symbol, Type};

/// Result of walking one base-type chain.
#[derive(Debug)]
pub struct Walked<'a> {
    pub tokens: Vec<String>,
    pub flags: Ctl,
    /// Member list of the struct/union link, if the chain reached one.
    pub members: &'a [Symbol],
    /// Return chain and argument list, if the chain reached a function.
    pub function: Option<FunctionParts<'a>>,
}

#[derive(Debug)]
pub struct FunctionParts<'a> {
    pub ret: Option<&'a Type>,
    pub args: &'a [Symbol],
}

impl Walked<'_> {
    /// The declaration text: tokens joined by single spaces.
    pub fn decl(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Walk a base-type chain from its head link.
pub fn walk_chain(head: Option<&Type>) -> Walked<'_> {
    let mut walked = Walked {
        tokens: Vec::new(),
        flags: Ctl::empty(),
        members: &[],
        function: None,
    };
    descend(&mut walked, head);
    walked
}

fn descend<'a>(walked: &mut Walked<'a>, link: Option<&'a Type>) {
    let Some(ty) = link else { return };

    match ty {
        Type::BaseType { modifiers } => {
            let mods = Modifiers::from_bits_truncate(*modifiers);
            walked.tokens.push(if mods.is_empty() {
                "void".to_owned()
            } else {
                modifier_string(mods)
            });
        }
        // A pointer contributes no token, only the flag.
        Type::Pointer { base } => {
            walked.flags |= Ctl::POINTER;
            descend(walked, base.as_deref());
        }
        // A function terminates the chain; its return type and arguments
        // become instances of their own, so the enclosing decl stays
        // free of them.
        Type::Function { ret, args } => {
            walked.flags |= Ctl::FUNCTION;
            walked.function = Some(FunctionParts {
                ret: ret.as_deref(),
                args,
            });
        }
        Type::Array { base } => {
            walked.tokens.push("array".to_owned());
            descend(walked, base.as_deref());
        }
        Type::Struct { ident, members } => {
            compound(walked, "struct", ident.as_deref(), members);
        }
        Type::Union { ident, members } => {
            compound(walked, "union", ident.as_deref(), members);
        }
        Type::Enum { ident } => {
            walked.tokens.push("enum".to_owned());
            if let Some(ident) = ident {
                walked.tokens.push(ident.clone());
            }
        }
        Type::Typedef { ident, base } => {
            walked.tokens.push("typedef".to_owned());
            if let Some(ident) = ident {
                walked.tokens.push(ident.clone());
            }
            descend(walked, base.as_deref());
        }
        // Transparent wrappers.
        Type::Node { base } | Type::Member { base } => {
            descend(walked, base.as_deref());
        }
        Type::Bitfield { base } => {
            walked.tokens.push("bitfield".to_owned());
            descend(walked, base.as_deref());
        }
        Type::Label | Type::Restrict | Type::Fouled | Type::Keyword | Type::Bad => {}
    }
}

fn compound<'a>(walked: &mut Walked<'a>, keyword: &str, ident: Option<&str>, members: &'a [Symbol]) {
    walked.tokens.push(keyword.to_owned());
    walked.flags |= Ctl::STRUCT;
    if !members.is_empty() {
        walked.flags |= Ctl::HAS_MEMBERS;
        walked.members = members;
    }
    if let Some(ident) = ident {
        walked.tokens.push(ident.to_owned());
    }
}
