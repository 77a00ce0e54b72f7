use kabigraph_builder::modstr::Modifiers;
use kabigraph_builder::sym::{Symbol, Type};
use kabigraph_builder::{Builder, KSYM_PREFIX};
use kabigraph_core::TypeGraph;

use crate::lookup::Lookup;
use crate::rowman::RowMan;

fn int() -> Type {
    Type::BaseType {
        modifiers: Modifiers::SIGNED.bits(),
    }
}

fn ptr(inner: Type) -> Type {
    Type::Pointer {
        base: Some(Box::new(inner)),
    }
}

fn sym(name: &str, ty: Type) -> Symbol {
    Symbol {
        ident: Some(name.to_owned()),
        base: Some(Box::new(ty)),
    }
}

fn strukt(ident: &str, members: Vec<Symbol>) -> Type {
    Type::Struct {
        ident: Some(ident.to_owned()),
        members,
    }
}

fn func(ret: Type, args: Vec<Symbol>) -> Type {
    Type::Function {
        ret: Some(Box::new(ret)),
        args,
    }
}

fn export_marker(name: &str) -> Symbol {
    Symbol {
        ident: Some(format!("{KSYM_PREFIX}{name}")),
        base: None,
    }
}

/// `int foo(int x)` exported from one.i.
fn scalar_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    let mut builder = Builder::new(&mut graph);
    builder.build_unit(
        "one.i",
        &[
            export_marker("foo"),
            sym("foo", func(int(), vec![sym("x", int())])),
        ],
    );
    graph
}

/// `int register_s(struct s *p)` with `struct s { int a; int b; }`.
fn struct_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    let mut builder = Builder::new(&mut graph);
    builder.build_unit(
        "two.i",
        &[
            export_marker("register_s"),
            sym(
                "register_s",
                func(
                    int(),
                    vec![sym(
                        "p",
                        ptr(strukt("s", vec![sym("a", int()), sym("b", int())])),
                    )],
                ),
            ),
        ],
    );
    graph
}

/// `struct inner` at depth 3 and depth 5 inside the same argument of F:
/// arg x: struct outer { struct inner i1; struct mid m { struct inner i2; } }
fn deep_graph() -> TypeGraph {
    let inner = |name: &str| {
        sym(
            name,
            strukt("inner", vec![sym("v", int())]),
        )
    };
    let mid = sym("m", strukt("mid", vec![inner("i2")]));
    let outer = strukt("outer", vec![inner("i1"), mid]);

    let mut graph = TypeGraph::new();
    let mut builder = Builder::new(&mut graph);
    builder.build_unit(
        "f.i",
        &[
            export_marker("F"),
            sym("F", func(int(), vec![sym("x", ptr(outer))])),
        ],
    );
    graph
}

#[test]
fn count_whole_word_counts_use_sites() {
    let graph = struct_graph();
    let lookup = Lookup::new(&graph).whole_word(true);
    assert_eq!(lookup.count("struct s"), 1);
    assert_eq!(lookup.count("struct missing"), 0);
}

#[test]
fn count_substring_counts_declarations() {
    let graph = struct_graph();
    let lookup = Lookup::new(&graph);
    // "int" also hits the return and both members.
    assert!(lookup.count("int") >= 3);
    assert_eq!(lookup.count("struct s"), 1);
    assert_eq!(lookup.count("no such thing"), 0);
}

#[test]
fn exports_whole_word() {
    let graph = scalar_graph();
    let mut rowman = RowMan::new();
    let matched = Lookup::new(&graph)
        .whole_word(true)
        .exports("foo", &mut rowman);

    assert_eq!(matched, 1);
    assert_eq!(
        rowman.finish(),
        "FILE: one.i\n EXPORTED:  foo\n  RETURN: int \n  ARG: int x\n\n"
    );
}

#[test]
fn exports_ignores_non_exported_matches() {
    let graph = scalar_graph();
    let mut rowman = RowMan::new();
    // "int x" resolves whole-word but is not an exported declaration.
    let matched = Lookup::new(&graph)
        .whole_word(true)
        .exports("int x", &mut rowman);
    assert_eq!(matched, 0);
    assert_eq!(rowman.finish(), "");
}

#[test]
fn exports_verbose_descends_into_compounds() {
    let graph = struct_graph();
    let mut rowman = RowMan::new();
    let matched = Lookup::new(&graph)
        .whole_word(true)
        .exports("register_s", &mut rowman);

    assert_eq!(matched, 1);
    assert_eq!(
        rowman.finish(),
        "FILE: two.i\n EXPORTED:  register_s\n  RETURN: int \n  ARG: struct s p\n   int a\n   int b\n\n"
    );
}

#[test]
fn exports_quiet_stops_at_arguments() {
    let graph = struct_graph();
    let mut rowman = RowMan::new();
    Lookup::new(&graph)
        .whole_word(true)
        .verbose(false)
        .exports("register_s", &mut rowman);

    assert_eq!(
        rowman.finish(),
        "FILE: two.i\n EXPORTED:  register_s\n  RETURN: int \n  ARG: struct s p\n\n"
    );
}

#[test]
fn members_lists_a_compound_from_column_zero() {
    let graph = struct_graph();
    let mut rowman = RowMan::new();
    let matched = Lookup::new(&graph)
        .whole_word(true)
        .members("struct s", &mut rowman);

    assert_eq!(matched, 1);
    insta::assert_snapshot!(rowman.finish(), @r"
    struct s
     int a
     int b
    ");
}

#[test]
fn affects_walks_up_to_the_export() {
    let graph = struct_graph();
    let mut rowman = RowMan::new();
    let matched = Lookup::new(&graph)
        .whole_word(true)
        .affects("struct s", &mut rowman);

    assert_eq!(matched, 1);
    insta::assert_snapshot!(rowman.finish(), @r"
    FILE: two.i
     EXPORTED:  register_s
      ARG: struct s p
    ");
}

#[test]
fn affects_emits_one_path_per_ancestry_group() {
    let graph = deep_graph();
    let mut rowman = RowMan::new();
    let matched = Lookup::new(&graph)
        .whole_word(true)
        .affects("struct inner", &mut rowman);

    assert_eq!(matched, 1);
    // Both use-sites share (argument, function): one traversal, from the
    // deeper instance; the shallower path is its prefix.
    insta::assert_snapshot!(rowman.finish(), @r"
    FILE: f.i
     EXPORTED:  F
      ARG: struct outer x
       struct mid m
        struct inner i2
    ");
}

#[test]
fn affects_quiet_still_names_the_queried_symbol() {
    let graph = deep_graph();
    let mut rowman = RowMan::new();
    Lookup::new(&graph)
        .whole_word(true)
        .verbose(false)
        .affects("struct inner", &mut rowman);

    insta::assert_snapshot!(rowman.finish(), @r"
    FILE: f.i
     EXPORTED:  F
      ARG: struct outer x
        struct inner i2
    ");
}

#[test]
fn affects_separates_exports_from_different_units() {
    let point = || strukt("point", vec![sym("px", int()), sym("py", int())]);
    let mut graph = TypeGraph::new();
    let mut builder = Builder::new(&mut graph);
    builder.build_unit(
        "a.i",
        &[
            export_marker("move_point"),
            sym("move_point", func(int(), vec![sym("p", ptr(point()))])),
        ],
    );
    builder.build_unit(
        "b.i",
        &[
            export_marker("draw_point"),
            sym("draw_point", func(int(), vec![sym("p", ptr(point()))])),
        ],
    );

    let mut rowman = RowMan::new();
    let matched = Lookup::new(&graph)
        .whole_word(true)
        .affects("struct point", &mut rowman);

    assert_eq!(matched, 1);
    insta::assert_snapshot!(rowman.finish(), @r"
    FILE: a.i
     EXPORTED:  move_point
      ARG: struct point p

    FILE: b.i
     EXPORTED:  draw_point
      ARG: struct point p
    ");
}

#[test]
fn substring_resolution_reaches_exports() {
    let graph = scalar_graph();
    let mut rowman = RowMan::new();
    // Substring match on the export name.
    let matched = Lookup::new(&graph).exports("fo", &mut rowman);
    assert_eq!(matched, 1);
}

#[test]
fn row_bound_for_affects() {
    // P6: at most sum over siblings of (1 + depth).
    let graph = deep_graph();
    let dn = graph
        .lookup(kabigraph_core::fingerprint("struct inner"))
        .unwrap();
    let bound: usize = dn
        .siblings
        .values()
        .map(|cn| 1 + cn.level as usize)
        .sum();

    let mut rowman = RowMan::new();
    Lookup::new(&graph)
        .whole_word(true)
        .affects("struct inner", &mut rowman);
    let rows = rowman.output().lines().filter(|l| !l.is_empty()).count();
    assert!(rows <= bound, "{rows} > {bound}");
}
