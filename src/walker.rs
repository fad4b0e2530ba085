use std::path::Path;

use tracing::info;
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::evaluator::Evaluator;
use crate::mask::MaskGenerator;
use crate::normalizer;
use crate::obfuscator::CodeObfuscator;
use crate::selector::SelectPolicy;

// Rewritten files get a fixed mode regardless of what they had before.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o755;

/// Processes every regular source file under `root`, strictly sequentially:
/// constant normalization first, then the obfuscation pipeline, written back
/// in place. The first error halts the run; files past the failure point are
/// left untouched.
pub fn obfuscate_tree(
    root: &Path,
    config: &AppConfig,
    masks: MaskGenerator,
) -> Result<(), AppError> {
    let policy = SelectPolicy::with_pruned_kinds(config.excluded_kinds.clone());
    let mut obfuscator = CodeObfuscator::new(
        policy,
        Evaluator::new(config.go_binary.clone()),
        masks,
    );

    let mut processed = 0usize;
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| AppError::Other(e.to_string()))?;
        if !entry.file_type().is_file() || !has_source_extension(entry.path(), config) {
            continue;
        }
        normalizer::normalize_file(entry.path())?;
        obfuscator.obfuscate_file(entry.path())?;
        set_output_mode(entry.path())?;
        processed += 1;
    }
    info!(processed, root = %root.display(), "obfuscation pass complete");
    Ok(())
}

fn has_source_extension(path: &Path, config: &AppConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| config.extensions.iter().any(|e| e == ext))
        .unwrap_or(false)
}

#[cfg(unix)]
fn set_output_mode(path: &Path) -> Result<(), AppError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(OUTPUT_MODE))
        .map_err(|e| AppError::Other(e.to_string()))
}

#[cfg(not(unix))]
fn set_output_mode(_path: &Path) -> Result<(), AppError> {
    Ok(())
}
