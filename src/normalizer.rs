use std::path::Path;

use tree_sitter::Node;

use crate::obfuscator::ObfuscateError;
use crate::parse;
use crate::replacer::{splice, Edit};

/// Rewrites each top-level `const` declaration whose every spec is bound only
/// to string literals into the equivalent `var` declaration. Names, values,
/// visibility and grouping are untouched; only the keyword span changes. The
/// obfuscation pass skips const groups, so this runs first to turn eligible
/// string constants into legal replacement targets.
///
/// Declarations with a missing or non-string value (typed numerics, `iota`
/// chains) keep their keyword: converting those would change semantics.
pub fn normalize_source(source: &str) -> Result<String, ObfuscateError> {
    let tree = parse::parse(source)?;
    let root = tree.root_node();

    let mut edits = Vec::new();
    let mut cursor = root.walk();
    for decl in root.children(&mut cursor) {
        if decl.kind() != "const_declaration" || !all_specs_are_strings(decl) {
            continue;
        }
        let mut kw_cursor = decl.walk();
        let kw = decl.children(&mut kw_cursor).find(|c| c.kind() == "const");
        if let Some(kw) = kw {
            edits.push(Edit {
                start: kw.start_byte(),
                end: kw.end_byte(),
                text: "var".into(),
            });
        }
    }

    let out = splice(source.as_bytes(), &edits);
    String::from_utf8(out).map_err(|e| {
        ObfuscateError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

pub fn normalize_file(path: &Path) -> Result<(), ObfuscateError> {
    let source = std::fs::read_to_string(path)?;
    let rewritten = normalize_source(&source)?;
    if rewritten != source {
        std::fs::write(path, rewritten)?;
    }
    Ok(())
}

fn all_specs_are_strings(decl: Node) -> bool {
    let mut cursor = decl.walk();
    let mut saw_spec = false;
    for child in decl.children(&mut cursor) {
        if child.kind() != "const_spec" {
            continue;
        }
        saw_spec = true;
        let Some(values) = child.child_by_field_name("value") else {
            return false;
        };
        let mut vc = values.walk();
        let mut saw_value = false;
        for value in values.named_children(&mut vc) {
            saw_value = true;
            if value.kind() != "interpreted_string_literal"
                && value.kind() != "raw_string_literal"
            {
                return false;
            }
        }
        if !saw_value {
            return false;
        }
    }
    saw_spec
}
