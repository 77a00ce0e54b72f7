use kabigraph_core::Ctl;

use crate::rowman::{Row, RowMan};

fn row(level: u32, flags: Ctl, decl: &str, name: &str) -> Row {
    Row {
        level,
        flags,
        decl: decl.to_owned(),
        name: name.to_owned(),
    }
}

#[test]
fn from_front_prints_the_hierarchy() {
    let mut rm = RowMan::new();
    rm.push(row(0, Ctl::FILE, "drivers/foo.i", ""));
    rm.push(row(1, Ctl::EXPORTED, "", "foo"));
    rm.push(row(2, Ctl::ARG, "int", "x"));
    rm.push(row(3, Ctl::NESTED, "struct bar", "b"));
    rm.put_rows_from_front(true);

    insta::assert_snapshot!(rm.finish(), @r"
    FILE: drivers/foo.i
     EXPORTED:  foo
      ARG: int x
       struct bar b
    ");
}

#[test]
fn return_rows_use_their_own_label() {
    let mut rm = RowMan::new();
    rm.push(row(2, Ctl::RETURN, "int", ""));
    rm.push(row(2, Ctl::ARG, "int", "x"));
    rm.put_rows_from_front(false);

    assert_eq!(rm.finish(), "  RETURN: int \n  ARG: int x\n\n");
}

#[test]
fn nested_rows_only_in_verbose_mode() {
    let mut rm = RowMan::new();
    rm.push(row(2, Ctl::ARG, "struct s", "p"));
    rm.push(row(3, Ctl::NESTED, "int a", "a"));
    rm.put_rows_from_front(false);

    assert_eq!(rm.finish(), "  ARG: struct s p\n\n");
}

#[test]
fn from_back_reverses_and_forces_the_deepest_row() {
    // Upward walks push deepest first; the queried symbol must print
    // even when verbosity hides nested rows.
    let mut rm = RowMan::new();
    rm.push(row(3, Ctl::NESTED, "struct inner", "i"));
    rm.push(row(2, Ctl::ARG, "struct outer", "o"));
    rm.push(row(1, Ctl::EXPORTED, "", "foo"));
    rm.push(row(0, Ctl::FILE, "a.i", ""));
    rm.put_rows_from_back(false);

    insta::assert_snapshot!(rm.finish(), @r"
    FILE: a.i
     EXPORTED:  foo
      ARG: struct outer o
       struct inner i
    ");
}

#[test]
fn duplicate_rows_at_a_tag_are_suppressed() {
    let mut rm = RowMan::new();
    rm.push(row(1, Ctl::EXPORTED, "", "foo"));
    rm.push(row(2, Ctl::ARG, "int", "x"));
    rm.put_rows_from_front(true);
    // Same export again, same argument: both suppressed.
    rm.push(row(1, Ctl::EXPORTED, "", "foo"));
    rm.push(row(2, Ctl::ARG, "int", "x"));
    rm.put_rows_from_front(true);

    assert_eq!(rm.finish(), " EXPORTED:  foo\n  ARG: int x\n\n\n");
}

#[test]
fn file_rows_reset_the_cache() {
    let mut rm = RowMan::new();
    rm.push(row(0, Ctl::FILE, "a.i", ""));
    rm.push(row(2, Ctl::ARG, "int", "x"));
    rm.put_rows_from_front(true);
    // A new unit: the argument prints again.
    rm.push(row(0, Ctl::FILE, "b.i", ""));
    rm.push(row(2, Ctl::ARG, "int", "x"));
    rm.put_rows_from_front(true);

    insta::assert_snapshot!(rm.finish(), @r"
    FILE: a.i
      ARG: int x

    FILE: b.i
      ARG: int x
    ");
}

#[test]
fn repeated_file_row_is_suppressed() {
    let mut rm = RowMan::new();
    rm.push(row(0, Ctl::FILE, "a.i", ""));
    rm.put_rows_from_front(true);
    rm.push(row(0, Ctl::FILE, "a.i", ""));
    rm.put_rows_from_front(true);

    assert_eq!(rm.finish(), "FILE: a.i\n\n\n");
}

#[test]
fn normalized_listing_starts_at_column_zero() {
    let mut rm = RowMan::new();
    rm.push(row(2, Ctl::ARG | Ctl::STRUCT, "struct s", "p"));
    rm.push(row(3, Ctl::NESTED, "int", "a"));
    rm.push(row(3, Ctl::NESTED, "int", "b"));
    rm.put_rows_from_front_normalized(true);

    insta::assert_snapshot!(rm.finish(), @r"
    struct s
     int a
     int b
    ");
}

#[test]
fn normalized_non_verbose_shows_direct_members_only() {
    let mut rm = RowMan::new();
    rm.push(row(2, Ctl::ARG | Ctl::STRUCT, "struct s", "p"));
    rm.push(row(3, Ctl::NESTED | Ctl::STRUCT, "struct t", "t"));
    rm.push(row(4, Ctl::NESTED, "int", "deep"));
    rm.put_rows_from_front_normalized(false);

    insta::assert_snapshot!(rm.finish(), @r"
    struct s
     struct t t
    ");
}
