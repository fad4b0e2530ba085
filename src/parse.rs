use thiserror::Error;
use tree_sitter::{Parser, Tree};

#[derive(Debug, Error)]
pub enum ParseFailed {
    #[error("go grammar rejected by tree-sitter: {0}")]
    Language(String),
    #[error("source is not valid Go")]
    Syntax,
}

/// Parses one Go source buffer. A tree containing ERROR or MISSING nodes is
/// rejected outright: splicing into a half-parsed file could move literal
/// spans onto the wrong bytes.
pub fn parse(source: &str) -> Result<Tree, ParseFailed> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| ParseFailed::Language(e.to_string()))?;
    let tree = parser.parse(source, None).ok_or(ParseFailed::Syntax)?;
    if tree.root_node().has_error() {
        return Err(ParseFailed::Syntax);
    }
    Ok(tree)
}
