pub mod config;
pub mod errors;
pub mod evaluator;
pub mod logger;
pub mod mask;
pub mod normalizer;
pub mod obfuscator;
pub mod parse;
pub mod replacer;
pub mod selector;
pub mod walker;

pub use errors::AppError;
pub use mask::MaskGenerator;
pub use obfuscator::CodeObfuscator;
pub use selector::LiteralSite;
