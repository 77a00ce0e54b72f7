//! Deserialization layer for the front end's symbol dump.
//!
//! Maps 1:1 onto the JSON the external C parser emits per preprocessed
//! translation unit: a flat list of top-level symbols, each an identifier
//! plus a linked base-type chain. Compound links carry their member
//! lists, function links their return chain and argument list.

use serde::Deserialize;

/// One preprocessed translation unit.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationUnit {
    /// Source path of the unit; callers fall back to the dump's own path
    /// when absent.
    #[serde(default)]
    pub file: Option<String>,
    pub symbols: Vec<Symbol>,
}

/// A symbol: an identifier with a base-type chain.
#[derive(Debug, Clone, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub ident: Option<String>,
    /// Head of the base-type chain; absent for bodiless oddities.
    #[serde(default)]
    pub base: Option<Box<Type>>,
}

/// One link of a base-type chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    BaseType {
        /// Raw modifier bitmask as the front end reports it.
        #[serde(default)]
        modifiers: u32,
    },
    Pointer {
        #[serde(default)]
        base: Option<Box<Type>>,
    },
    /// Terminates the chain; the return type and arguments are processed
    /// as their own instances, never as tokens of the enclosing decl.
    Function {
        #[serde(default)]
        ret: Option<Box<Type>>,
        #[serde(default)]
        args: Vec<Symbol>,
    },
    Array {
        #[serde(default)]
        base: Option<Box<Type>>,
    },
    Struct {
        #[serde(default)]
        ident: Option<String>,
        #[serde(default)]
        members: Vec<Symbol>,
    },
    Union {
        #[serde(default)]
        ident: Option<String>,
        #[serde(default)]
        members: Vec<Symbol>,
    },
    Enum {
        #[serde(default)]
        ident: Option<String>,
    },
    Typedef {
        #[serde(default)]
        ident: Option<String>,
        #[serde(default)]
        base: Option<Box<Type>>,
    },
    Node {
        #[serde(default)]
        base: Option<Box<Type>>,
    },
    Member {
        #[serde(default)]
        base: Option<Box<Type>>,
    },
    Bitfield {
        #[serde(default)]
        base: Option<Box<Type>>,
    },
    Label,
    Restrict,
    Fouled,
    Keyword,
    Bad,
}

impl Type {
    /// Kinds an exported symbol may resolve to.
    pub fn is_exportable(&self) -> bool {
        matches!(
            self,
            Type::BaseType { .. }
                | Type::Pointer { .. }
                | Type::Function { .. }
                | Type::Array { .. }
                | Type::Struct { .. }
                | Type::Union { .. }
        )
    }
}

/// Parse one translation-unit dump.
pub fn parse_unit(json: &str) -> Result<TranslationUnit, serde_json::Error> {
    serde_json::from_str(json)
}
