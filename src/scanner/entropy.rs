//! Binary detection via Shannon entropy.
//!
//! Files with an extension in the text allowlist are never probed. Everything
//! else at or above 1 KiB gets up to 32 KiB read; a byte-frequency entropy
//! above 7.5 bits/byte marks the file as binary.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Extensions that are always treated as text, skipping the entropy probe.
const TEXT_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".go", ".php", ".py", ".rs", ".rb", ".java",
    ".kt", ".swift", ".c", ".h", ".cpp", ".hpp", ".cc", ".cs", ".sh", ".bash", ".zsh", ".fish",
    ".ps1", ".bat", ".cmd", ".sql", ".html", ".htm", ".css", ".scss", ".less", ".vue", ".svelte",
    ".md", ".txt", ".rst", ".adoc", ".json", ".yml", ".yaml", ".toml", ".xml", ".ini", ".cfg",
    ".conf", ".env", ".proto", ".graphql", ".gql", ".prisma", ".lock", ".sum", ".mod", ".tf",
    ".dart", ".ex", ".exs", ".lua", ".mk",
];

const MIN_PROBE_SIZE: u64 = 1024;
const MAX_PROBE_BYTES: usize = 32 * 1024;
const BINARY_ENTROPY_THRESHOLD: f64 = 7.5;

/// Shannon entropy of a byte slice, in bits per byte.
#[must_use]
pub fn shannon_entropy(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }
    let mut counts = [0u64; 256];
    for &b in bytes {
        counts[b as usize] += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let total = bytes.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            #[allow(clippy::cast_precision_loss)]
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Entropy probe for a candidate file. Read errors count as binary: a file
/// we cannot read contributes nothing downstream anyway.
#[must_use]
pub fn is_probably_binary(abs_path: &Path, size_bytes: u64, extension: &str) -> bool {
    if size_bytes < MIN_PROBE_SIZE || TEXT_EXTENSIONS.contains(&extension) {
        return false;
    }
    let Ok(mut file) = File::open(abs_path) else {
        return true;
    };
    let mut buf = vec![0u8; MAX_PROBE_BYTES];
    let mut filled = 0;
    loop {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => {
                filled += n;
                if filled == buf.len() {
                    break;
                }
            }
            Err(_) => return true,
        }
    }
    shannon_entropy(&buf[..filled]) > BINARY_ENTROPY_THRESHOLD
}

#[cfg(test)]
#[path = "entropy_tests.rs"]
mod tests;
