/// One scanned workspace file.
///
/// `path` is workspace-relative, POSIX-normalized and slash-separated; it is
/// canonicalized once by the scanner and used as an opaque key everywhere
/// downstream. Lookups are exact-string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub size_bytes: u64,
    /// Lower-cased dotted suffix (`.go`), or empty.
    pub extension: String,
    /// Last path segment.
    pub basename: String,
    pub is_config: bool,
    pub is_doc: bool,
    pub is_script: bool,
    pub is_generated: bool,
    pub is_vendored: bool,
}
