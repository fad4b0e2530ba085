use codecloak::parse::parse;
use codecloak::selector::{collect, SelectPolicy, Visit};

fn sites_of(source: &str) -> Vec<codecloak::LiteralSite> {
    let tree = parse(source).unwrap();
    collect(tree.root_node(), source, &SelectPolicy::default())
}

#[test]
fn finds_plain_literal() {
    let src = "package main\n\nfunc f() string {\n\treturn \"hi\"\n}\n";
    let sites = sites_of(src);
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].text, "\"hi\"");
    assert_eq!(&src[sites[0].start..sites[0].end], "\"hi\"");
}

#[test]
fn finds_raw_literal() {
    let src = "package main\n\nvar v = `raw\\n`\n";
    let sites = sites_of(src);
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].text, "`raw\\n`");
}

#[test]
fn skips_import_declarations() {
    let src = "package main\n\nimport \"fmt\"\n\nfunc f() {\n\tfmt.Println(\"x\")\n}\n";
    let sites = sites_of(src);
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].text, "\"x\"");
}

#[test]
fn skips_grouped_imports() {
    let src = "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n";
    assert!(sites_of(src).is_empty());
}

#[test]
fn skips_const_groups_at_any_depth() {
    let src = "package main\n\nfunc f() {\n\tconst s = \"secret\"\n\t_ = s\n}\n";
    assert!(sites_of(src).is_empty());
}

#[test]
fn skips_struct_tags_at_any_depth() {
    let src = concat!(
        "package main\n\n",
        "func f() {\n",
        "\ttype rec struct {\n",
        "\t\tName string `json:\"name\"`\n",
        "\t}\n",
        "\t_ = rec{}\n",
        "}\n",
    );
    assert!(sites_of(src).is_empty());
}

#[test]
fn sites_come_out_in_ascending_source_order() {
    let src = "package main\n\nfunc f() (string, string) {\n\treturn \"a\", \"b\"\n}\n";
    let sites = sites_of(src);
    assert_eq!(sites.len(), 2);
    assert!(sites[0].start < sites[1].start);
    assert_eq!(sites[0].text, "\"a\"");
    assert_eq!(sites[1].text, "\"b\"");
}

#[test]
fn empty_literal_is_a_site() {
    let src = "package main\n\nvar v = \"\"\n";
    let sites = sites_of(src);
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].text, "\"\"");
}

#[test]
fn policy_pruned_set_is_configurable() {
    let policy = SelectPolicy::with_pruned_kinds(vec!["function_declaration".into()]);
    assert_eq!(policy.visit("function_declaration"), Visit::Prune);
    assert_eq!(policy.visit("const_declaration"), Visit::Descend);

    let src = "package main\n\nfunc f() string {\n\treturn \"hi\"\n}\n";
    let tree = parse(src).unwrap();
    assert!(collect(tree.root_node(), src, &policy).is_empty());
}
