use std::fmt::Write as _;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::selector::LiteralSite;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to stage oracle program: {0}")]
    Stage(#[from] std::io::Error),
    #[error("oracle program failed to build or run: {0}")]
    Run(String),
    #[error("oracle output truncated or malformed")]
    Decode,
    #[error("oracle returned {got} values for {expected} sites")]
    CountMismatch { expected: usize, got: usize },
}

/// Decodes literal values by asking the Go toolchain itself, instead of
/// reimplementing Go's escape and raw-string rules. A throwaway program is
/// generated containing each selected literal verbatim, run with `go run`,
/// and its output decoded back into one value per site, in site order.
pub struct Evaluator {
    go_binary: String,
}

// Environment variables re-exported into the oracle subprocess. Everything
// else is stripped; the toolchain needs its own configuration and a place to
// put its build cache, nothing more.
const ORACLE_ENV: &[&str] = &["PATH", "HOME", "GOROOT", "GOPATH", "GOCACHE", "GOTMPDIR"];

impl Evaluator {
    pub fn new(go_binary: impl Into<String>) -> Self {
        Self {
            go_binary: go_binary.into(),
        }
    }

    /// Evaluates every site's true decoded value. Index i of the result is
    /// the value of `sites[i]`. Zero sites spawns no subprocess.
    pub fn evaluate(&self, sites: &[LiteralSite]) -> Result<Vec<Vec<u8>>, GenerationError> {
        if sites.is_empty() {
            return Ok(Vec::new());
        }

        // TempDir removes the program and any build droppings on every exit
        // path, success or failure.
        let dir = tempfile::Builder::new().prefix("codecloak-oracle").tempdir()?;
        let program = dir.path().join("oracle.go");
        std::fs::write(&program, oracle_source(sites))?;

        debug!(sites = sites.len(), "running literal oracle");
        let mut cmd = Command::new(&self.go_binary);
        cmd.arg("run").arg(&program).current_dir(dir.path()).env_clear();
        for key in ORACLE_ENV {
            if let Ok(value) = std::env::var(key) {
                cmd.env(key, value);
            }
        }
        let output = cmd
            .output()
            .map_err(|e| GenerationError::Run(e.to_string()))?;
        if !output.status.success() {
            return Err(GenerationError::Run(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let values = decode_output(&output.stdout)?;
        if values.len() != sites.len() {
            return Err(GenerationError::CountMismatch {
                expected: sites.len(),
                got: values.len(),
            });
        }
        Ok(values)
    }
}

/// The generated program appends each literal, untouched, to a list in site
/// order, then writes the list to stdout as a length-prefixed binary stream:
/// a big-endian u32 count, then per string a big-endian u32 length and the
/// raw bytes.
fn oracle_source(sites: &[LiteralSite]) -> String {
    let mut src = String::from(
        "package main\n\nimport (\n\t\"bufio\"\n\t\"encoding/binary\"\n\t\"os\"\n)\n\nfunc main() {\n\tlist := []string{}\n",
    );
    for site in sites {
        let _ = writeln!(src, "\tlist = append(list, {})", site.text);
    }
    src.push_str(
        "\tout := bufio.NewWriter(os.Stdout)\n\
         \tdefer out.Flush()\n\
         \tvar n [4]byte\n\
         \tbinary.BigEndian.PutUint32(n[:], uint32(len(list)))\n\
         \tout.Write(n[:])\n\
         \tfor _, s := range list {\n\
         \t\tbinary.BigEndian.PutUint32(n[:], uint32(len(s)))\n\
         \t\tout.Write(n[:])\n\
         \t\tout.WriteString(s)\n\
         \t}\n}\n",
    );
    src
}

fn decode_output(bytes: &[u8]) -> Result<Vec<Vec<u8>>, GenerationError> {
    let mut cursor = 0usize;
    let count = read_u32(bytes, &mut cursor)? as usize;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let len = read_u32(bytes, &mut cursor)? as usize;
        let end = cursor.checked_add(len).ok_or(GenerationError::Decode)?;
        if end > bytes.len() {
            return Err(GenerationError::Decode);
        }
        values.push(bytes[cursor..end].to_vec());
        cursor = end;
    }
    if cursor != bytes.len() {
        return Err(GenerationError::Decode);
    }
    Ok(values)
}

fn read_u32(bytes: &[u8], cursor: &mut usize) -> Result<u32, GenerationError> {
    let end = *cursor + 4;
    if end > bytes.len() {
        return Err(GenerationError::Decode);
    }
    let value = u32::from_be_bytes(bytes[*cursor..end].try_into().unwrap());
    *cursor = end;
    Ok(value)
}
