//! Built-in ignore policy applied during the walk.
//!
//! Rules are consulted in order: directory names, dotfiles, suffixes, size.
//! The binary-entropy heuristic lives in [`super::entropy`].

/// Directory names whose whole subtree is skipped.
const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "dist",
    "build",
    "target",
    "bin",
    "obj",
    ".git",
    ".svn",
    ".hg",
    "__pycache__",
    ".venv",
    "venv",
    "coverage",
    ".next",
    ".nuxt",
    ".idea",
    ".vscode",
    ".terraform",
    ".gradle",
    // Our own artifact directory; profiling the profile would feed back.
    ".loom",
];

/// OS artifacts skipped wherever they appear.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// Dotfiles kept despite the blanket dotfile rule.
const DOTFILE_ALLOWLIST: &[&str] = &[
    ".gitignore",
    ".dockerignore",
    ".editorconfig",
    ".env.example",
    ".gitattributes",
    ".gitlab-ci.yml",
    ".travis.yml",
];

/// Dotfile prefixes kept despite the blanket dotfile rule (rc variants).
const DOTFILE_ALLOWED_PREFIXES: &[&str] = &[".eslint", ".prettier", ".babel"];

/// Lock/manifest files exempt from the suffix and size rules.
const KNOWN_LARGE_KEEP: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "composer.lock",
    "Cargo.lock",
    "go.sum",
    "poetry.lock",
];

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// Hard cap: nothing above this is scanned unless it is a known config/lock file.
pub const MAX_FILE_SIZE: u64 = 5 * MIB;
/// Soft cap: above this only the known-important-large set survives.
pub const MAX_PLAIN_FILE_SIZE: u64 = 512 * KIB;

#[must_use]
pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

#[must_use]
pub fn is_ignored_file(basename: &str) -> bool {
    IGNORED_FILES.contains(&basename)
}

/// Dotfiles at any depth are ignored unless allowlisted.
#[must_use]
pub fn is_disallowed_dotfile(basename: &str) -> bool {
    basename.starts_with('.')
        && !DOTFILE_ALLOWLIST.contains(&basename)
        && !DOTFILE_ALLOWED_PREFIXES
            .iter()
            .any(|p| basename.starts_with(p))
}

/// Suffix rules: minified/map/lock/generated artifacts are skipped outright.
///
/// The known-important-large lock files are exempt; they carry dependency
/// information the signature and scorer care about.
#[must_use]
pub fn has_ignored_suffix(basename: &str) -> bool {
    if KNOWN_LARGE_KEEP.contains(&basename) {
        return false;
    }
    basename.ends_with(".min.js")
        || basename.ends_with(".min.css")
        || basename.ends_with(".map")
        || basename.ends_with(".lock")
        || basename.contains(".generated.")
        || basename.ends_with(".pb.go")
        || basename.ends_with(".g.dart")
}

/// Size rules, applied after the cheaper name-based rules.
#[must_use]
pub fn is_skipped_by_size(basename: &str, size_bytes: u64) -> bool {
    if size_bytes > MAX_FILE_SIZE {
        return !KNOWN_LARGE_KEEP.contains(&basename);
    }
    if size_bytes > MAX_PLAIN_FILE_SIZE {
        return !KNOWN_LARGE_KEEP.contains(&basename);
    }
    false
}

#[cfg(test)]
#[path = "ignore_rules_tests.rs"]
mod tests;
