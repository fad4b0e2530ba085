use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A decoded string hidden behind a one-time XOR pad: `ciphertext[i] =
/// decoded[i] ^ mask[i]`. Rendering produces a self-contained Go expression
/// that rebuilds the original value at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedExpression {
    pub mask: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl MaskedExpression {
    /// Emits an immediately-invoked closure with no free variables, so it is
    /// valid anywhere the original literal was. Every byte of both arrays is
    /// written as a `\xNN` escape; no plaintext substring of the original
    /// value survives in the rendered text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("(func() string {\nmask := []byte(\"");
        for b in &self.mask {
            let _ = write!(out, "\\x{:02x}", b);
        }
        out.push_str("\")\nmasked := []byte(\"");
        for b in &self.ciphertext {
            let _ = write!(out, "\\x{:02x}", b);
        }
        let _ = write!(out, "\")\nout := make([]byte, {})\n", self.mask.len());
        out.push_str("for i, m := range mask {\nout[i] = m ^ masked[i]\n}\nreturn string(out)\n}())");
        out
    }
}

/// Draws mask bytes from an injectable RNG. Production use takes the thread
/// RNG; tests and the `--seed` flag substitute a seeded `StdRng` so output is
/// reproducible.
pub struct MaskGenerator {
    rng: Box<dyn RngCore>,
}

impl MaskGenerator {
    pub fn new() -> Self {
        Self {
            rng: Box::new(rand::thread_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Box::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn with_rng(rng: Box<dyn RngCore>) -> Self {
        Self { rng }
    }

    /// Masks one decoded value. For the empty string both arrays are empty
    /// and the rendered expression evaluates to `""`.
    pub fn generate(&mut self, decoded: &[u8]) -> MaskedExpression {
        let mut mask = vec![0u8; decoded.len()];
        self.rng.fill_bytes(&mut mask);
        let ciphertext = decoded
            .iter()
            .zip(&mask)
            .map(|(d, m)| d ^ m)
            .collect();
        MaskedExpression { mask, ciphertext }
    }
}

impl Default for MaskGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let mut gen = MaskGenerator::seeded(7);
        let decoded = b"hello \x00 world";
        let m = gen.generate(decoded);
        let rebuilt: Vec<u8> = m
            .mask
            .iter()
            .zip(&m.ciphertext)
            .map(|(a, b)| a ^ b)
            .collect();
        assert_eq!(rebuilt, decoded);
    }

    #[test]
    fn empty_value_renders_empty_arrays() {
        let mut gen = MaskGenerator::seeded(7);
        let m = gen.generate(b"");
        assert!(m.mask.is_empty());
        assert!(m.ciphertext.is_empty());
        assert!(m.render().contains("make([]byte, 0)"));
    }

    #[test]
    fn same_seed_same_output() {
        let a = MaskGenerator::seeded(42).generate(b"abc");
        let b = MaskGenerator::seeded(42).generate(b"abc");
        assert_eq!(a, b);
    }

    #[test]
    fn rendered_text_hides_plaintext() {
        let mut gen = MaskGenerator::seeded(1);
        let rendered = gen.generate(b"supersecret").render();
        assert!(!rendered.contains("supersecret"));
    }
}
