//! Unit tests for the substitution table over realistic markup

use kbpack::SubstitutionTable;

fn demo_table() -> SubstitutionTable {
    // A slice of a real size-golfing table: class names and identifiers
    // with heavy shared prefixes.
    let pairs = [
        ("edge", "e"),
        ("edge-forward", "ef"),
        ("edge-reverse", "er"),
        ("node", "n"),
        ("node-effect", "ne"),
        ("node-effect-trace", "net"),
        ("node-offline", "no"),
        ("toolbar", "t"),
        ("spinner", "sp"),
    ]
    .iter()
    .map(|(p, r)| (p.to_string(), r.to_string()))
    .collect::<Vec<_>>();
    SubstitutionTable::new(pairs).unwrap()
}

#[test]
fn shared_prefix_families_resolve_longest_first() {
    let table = demo_table();
    assert_eq!(table.apply("node-effect-trace"), "net");
    assert_eq!(table.apply("node-effect"), "ne");
    assert_eq!(table.apply("node-offline"), "no");
    assert_eq!(table.apply("node"), "n");
    assert_eq!(table.apply("edge-forward edge"), "ef e");
}

#[test]
fn substitution_rewrites_class_attributes_and_identifiers() {
    let table = demo_table();
    let markup = "<div class=\"toolbar\"><span class=\"node-effect node\"></span></div>\
                  <script>const toolbar=1;</script>";
    assert_eq!(
        table.apply(markup),
        "<div class=\"t\"><span class=\"ne n\"></span></div><script>const t=1;</script>"
    );
}

#[test]
fn patterns_absent_from_the_input_change_nothing() {
    let table = demo_table();
    let markup = "<div class=\"grid\">plain text</div>";
    assert_eq!(table.apply(markup), markup);
}

#[test]
fn shrink_is_monotone_for_shrinking_tables() {
    let table = demo_table();
    let markup = "<span class=\"node-effect-trace spinner\"></span>";
    assert!(table.apply(markup).len() < markup.len());
}
