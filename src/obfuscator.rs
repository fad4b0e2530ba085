use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::evaluator::{Evaluator, GenerationError};
use crate::mask::MaskGenerator;
use crate::parse::{self, ParseFailed};
use crate::replacer::{splice, Edit};
use crate::selector::{self, SelectPolicy};

#[derive(Debug, Error)]
pub enum ObfuscateError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseFailed),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

/// The per-file pipeline: parse, select literal sites, evaluate their decoded
/// values through the Go toolchain, and splice masked reconstruction
/// expressions over the original spans. The rewritten buffer is assembled in
/// memory before anything is written back, so a file is either untouched or
/// fully rewritten.
pub struct CodeObfuscator {
    policy: SelectPolicy,
    evaluator: Evaluator,
    masks: MaskGenerator,
}

impl CodeObfuscator {
    pub fn new(policy: SelectPolicy, evaluator: Evaluator, masks: MaskGenerator) -> Self {
        Self {
            policy,
            evaluator,
            masks,
        }
    }

    pub fn obfuscate_source(&mut self, source: &str) -> Result<String, ObfuscateError> {
        let tree = parse::parse(source)?;
        let sites = selector::collect(tree.root_node(), source, &self.policy);
        if sites.is_empty() {
            return Ok(source.to_string());
        }
        debug!(sites = sites.len(), "selected literal sites");

        let decoded = self.evaluator.evaluate(&sites)?;
        // Correspondence is positional: decoded[i] is the value of sites[i].
        let edits: Vec<Edit> = sites
            .iter()
            .zip(&decoded)
            .map(|(site, value)| Edit {
                start: site.start,
                end: site.end,
                text: self.masks.generate(value).render(),
            })
            .collect();

        let out = splice(source.as_bytes(), &edits);
        String::from_utf8(out).map_err(|e| {
            ObfuscateError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    pub fn obfuscate_file(&mut self, path: &Path) -> Result<(), ObfuscateError> {
        let source = std::fs::read_to_string(path)?;
        let rewritten = self.obfuscate_source(&source)?;
        std::fs::write(path, rewritten)?;
        info!(path = %path.display(), "rewrote string literals");
        Ok(())
    }
}
