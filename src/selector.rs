use tree_sitter::Node;

/// One string-literal occurrence eligible for rewriting, located by byte
/// offsets into the file it came from. `text` is the literal exactly as it
/// appears in the source, delimiters and escapes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSite {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Per-node traversal decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Descend,
    Prune,
}

/// Decides, per node kind, what the walk does. Which contexts count as
/// compile-time-only differs between grammars, so the pruned set is data
/// rather than a hard-coded match.
#[derive(Debug, Clone)]
pub struct SelectPolicy {
    literal_kinds: Vec<String>,
    pruned_kinds: Vec<String>,
}

impl Default for SelectPolicy {
    /// Go defaults: both string literal forms are candidates; import groups
    /// and const groups hold compile-time-significant literals, and struct
    /// types carry field tags that packages read reflectively as literal
    /// text, so all three subtrees are skipped whole.
    fn default() -> Self {
        Self {
            literal_kinds: vec![
                "interpreted_string_literal".into(),
                "raw_string_literal".into(),
            ],
            pruned_kinds: vec![
                "import_declaration".into(),
                "const_declaration".into(),
                "struct_type".into(),
            ],
        }
    }
}

impl SelectPolicy {
    pub fn with_pruned_kinds(pruned_kinds: Vec<String>) -> Self {
        Self {
            pruned_kinds,
            ..Self::default()
        }
    }

    pub fn is_literal(&self, kind: &str) -> bool {
        self.literal_kinds.iter().any(|k| k == kind)
    }

    pub fn visit(&self, kind: &str) -> Visit {
        if self.pruned_kinds.iter().any(|k| k == kind) {
            Visit::Prune
        } else {
            Visit::Descend
        }
    }
}

/// Walks a parsed file and returns every eligible literal site in ascending
/// source order. A recorded literal's subtree is never descended, so sites
/// cannot overlap.
pub fn collect(root: Node, source: &str, policy: &SelectPolicy) -> Vec<LiteralSite> {
    let mut sites = Vec::new();
    walk(root, source, policy, &mut sites);
    // Tree traversal order is not guaranteed to match source order for every
    // node kind, and the splice pass requires strictly ascending offsets.
    sites.sort_by_key(|s| s.start);
    sites
}

fn walk(node: Node, source: &str, policy: &SelectPolicy, sites: &mut Vec<LiteralSite>) {
    if policy.is_literal(node.kind()) {
        sites.push(LiteralSite {
            start: node.start_byte(),
            end: node.end_byte(),
            text: source[node.start_byte()..node.end_byte()].to_string(),
        });
        return;
    }
    if policy.visit(node.kind()) == Visit::Prune {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, policy, sites);
    }
}
