//! Canonical modifier strings.
//!
//! Base-type links carry a modifier bitmask instead of a type name; this
//! module decodes it into the exact token the fingerprints are built
//! from. The common signed widths collapse to the spelling seen in
//! source code (`int`, `long`, ...); everything else is spelled out from
//! a fixed table.

use bitflags::bitflags;

bitflags! {
    /// Base-type modifier bitmask as reported by the front end.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Modifiers: u32 {
        const AUTO = 1 << 0;
        const REGISTER = 1 << 1;
        const STATIC = 1 << 2;
        const EXTERN = 1 << 3;
        const CONST = 1 << 4;
        const VOLATILE = 1 << 5;
        const SIGNED = 1 << 6;
        const UNSIGNED = 1 << 7;
        const CHAR = 1 << 8;
        const SHORT = 1 << 9;
        const LONG = 1 << 10;
        const LONGLONG = 1 << 11;
        const LONGLONGLONG = 1 << 12;
        const TYPEDEF = 1 << 13;
        const TLS = 1 << 14;
        const INLINE = 1 << 15;
        const ADDRESSABLE = 1 << 16;
        const NOCAST = 1 << 17;
        const NODEREF = 1 << 18;
        const ACCESSED = 1 << 19;
        const TOPLEVEL = 1 << 20;
        const ASSIGNED = 1 << 21;
        const TYPE = 1 << 22;
        const SAFE = 1 << 23;
        const USERTYPE = 1 << 24;
        const NORETURN = 1 << 25;
        const EXPLICITLY_SIGNED = 1 << 26;
        const BITWISE = 1 << 27;
        const PURE = 1 << 28;
    }
}

/// Decode table, in emission order.
const MOD_NAMES: [(Modifiers, &str); 29] = [
    (Modifiers::AUTO, "auto"),
    (Modifiers::REGISTER, "register"),
    (Modifiers::STATIC, "static"),
    (Modifiers::EXTERN, "extern"),
    (Modifiers::CONST, "const"),
    (Modifiers::VOLATILE, "volatile"),
    (Modifiers::SIGNED, "signed"),
    (Modifiers::UNSIGNED, "unsigned"),
    (Modifiers::CHAR, "char"),
    (Modifiers::SHORT, "short"),
    (Modifiers::LONG, "long"),
    (Modifiers::LONGLONG, "long long"),
    (Modifiers::LONGLONGLONG, "long long long"),
    (Modifiers::TYPEDEF, "typedef"),
    (Modifiers::TLS, "tls"),
    (Modifiers::INLINE, "inline"),
    (Modifiers::ADDRESSABLE, "addressable"),
    (Modifiers::NOCAST, "nocast"),
    (Modifiers::NODEREF, "noderef"),
    (Modifiers::ACCESSED, "accessed"),
    (Modifiers::TOPLEVEL, "toplevel"),
    (Modifiers::ASSIGNED, "assigned"),
    (Modifiers::TYPE, "type"),
    (Modifiers::SAFE, "safe"),
    (Modifiers::USERTYPE, "usertype"),
    (Modifiers::NORETURN, "noreturn"),
    (Modifiers::EXPLICITLY_SIGNED, "explicitly-signed"),
    (Modifiers::BITWISE, "bitwise"),
    (Modifiers::PURE, "pure"),
];

/// Decode a modifier bitmask into its canonical token.
///
/// A single-entry fallback result keeps one trailing space, a multi-entry
/// one does not. Existing fingerprints bake that asymmetry in; it must
/// not be normalized.
pub fn modifier_string(mods: Modifiers) -> String {
    // The standard signed widths read the way the source spells them.
    if mods == Modifiers::SIGNED {
        return "int".to_owned();
    }
    if mods == Modifiers::UNSIGNED {
        return "unsigned int".to_owned();
    }
    if mods == Modifiers::SIGNED | Modifiers::CHAR {
        return "char".to_owned();
    }
    if mods == Modifiers::SIGNED | Modifiers::LONG {
        return "long".to_owned();
    }
    if mods == Modifiers::SIGNED | Modifiers::LONGLONG {
        return "long long".to_owned();
    }
    if mods == Modifiers::SIGNED | Modifiers::LONGLONGLONG {
        return "long long long".to_owned();
    }

    // Clear redundant width bits before scanning the table.
    let mut mods = mods;
    if mods.contains(Modifiers::LONGLONGLONG) {
        mods.remove(Modifiers::LONGLONG | Modifiers::LONG);
    }
    if mods.contains(Modifiers::LONGLONG) {
        mods.remove(Modifiers::LONG);
    }

    let mut out = String::new();
    let mut entries = 0;
    for (bit, name) in MOD_NAMES {
        if mods.contains(bit) {
            out.push_str(name);
            out.push(' ');
            entries += 1;
        }
    }
    if entries > 1 {
        out.pop();
    }
    out
}
