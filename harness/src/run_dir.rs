//! Run directory persistence: the result log and its run manifest on disk.
//!
//! # Directory layout (`RunDirectoryV1`)
//!
//! ```text
//! <dir>/
//!   resultat.txt         — result log, one `(a, b, c)` per line
//!   run_manifest.json    — canonical JSON, written only after a completed enumeration
//! ```
//!
//! The engine decides whether to enumerate from the existence of
//! `resultat.txt` alone. The manifest is an audit record: [`verify_run_dir`]
//! recomputes the log digest and record count, requires the manifest bytes
//! to be canonical, and fails closed on any mismatch, which is how a log left behind by a killed process can be
//! detected after the fact.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use serviette_kernel::proof::hash::{canonical_hash, ContentHash, DomainHasher, HashDomain};
use serviette_search::enumerate::EnumerationStatsV1;
use serviette_search::log::{LogReadError, LogWriteError};
use serviette_search::log_reader::ResultLogReader;
use serviette_search::log_writer::ResultLogWriter;
use serviette_search::params::EnumerationParamsV1;

use crate::engine::{LogProbe, ResultStore};

/// Result log filename.
pub const LOG_FILENAME: &str = "resultat.txt";

/// Run manifest filename.
pub const MANIFEST_FILENAME: &str = "run_manifest.json";

/// Manifest `schema_version` value.
pub const MANIFEST_SCHEMA_VERSION: &str = "serviette.run.v1";

/// Error reading, writing, or verifying a run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunDirError {
    /// I/O error outside the log writer/reader.
    Io { detail: String },
    /// The log writer failed.
    Write(LogWriteError),
    /// The log reader failed (including corrupt entries).
    Read(LogReadError),
    /// `resultat.txt` does not exist.
    MissingLog,
    /// `run_manifest.json` does not exist.
    MissingManifest,
    /// `run_manifest.json` is not valid JSON or lacks a field.
    ManifestParseError { detail: String },
    /// `run_manifest.json` parses but is not in canonical form.
    ManifestNotCanonical,
    /// Manifest `schema_version` is not recognized.
    ManifestVersionMismatch { found: String },
    /// Manifest `log_digest` doesn't match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
    /// Manifest `record_count` doesn't match the records in the log.
    RecordCountMismatch { stored: u64, recomputed: u64 },
    /// A record does not strictly follow its predecessor in `(a, b, c)` order.
    OutOfOrder { line_number: u64 },
}

impl std::fmt::Display for RunDirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Write(e) => write!(f, "{e}"),
            Self::Read(e) => write!(f, "{e}"),
            Self::MissingLog => write!(f, "missing result log: {LOG_FILENAME}"),
            Self::MissingManifest => write!(f, "missing run manifest: {MANIFEST_FILENAME}"),
            Self::ManifestParseError { detail } => write!(f, "manifest parse error: {detail}"),
            Self::ManifestNotCanonical => write!(f, "{MANIFEST_FILENAME} is not canonical JSON"),
            Self::ManifestVersionMismatch { found } => {
                write!(f, "manifest version mismatch: {found}")
            }
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "log digest mismatch: stored={stored}, recomputed={recomputed}")
            }
            Self::RecordCountMismatch { stored, recomputed } => {
                write!(f, "record count mismatch: stored={stored}, recomputed={recomputed}")
            }
            Self::OutOfOrder { line_number } => {
                write!(f, "record at line {line_number} is out of enumeration order")
            }
        }
    }
}

impl std::error::Error for RunDirError {}

impl From<LogWriteError> for RunDirError {
    fn from(e: LogWriteError) -> Self {
        Self::Write(e)
    }
}

impl From<LogReadError> for RunDirError {
    fn from(e: LogReadError) -> Self {
        Self::Read(e)
    }
}

// ---------------------------------------------------------------------------
// Run manifest
// ---------------------------------------------------------------------------

/// Audit record of a completed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunManifestV1 {
    pub bound: u32,
    /// Digit set rendered ascending, e.g. `"24"`.
    pub digit_set: String,
    pub record_count: u64,
    pub candidates_evaluated: u64,
    /// `canonical_hash(ResultLog, resultat.txt bytes)`.
    pub log_digest: ContentHash,
}

impl RunManifestV1 {
    /// Canonical JSON bytes: compact, keys sorted, integers only.
    #[must_use]
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        // serde_json's default map is ordered, so keys serialize sorted.
        let value = serde_json::json!({
            "bound": self.bound,
            "candidates_evaluated": self.candidates_evaluated,
            "digit_set": self.digit_set,
            "log_digest": self.log_digest.as_str(),
            "record_count": self.record_count,
            "schema_version": MANIFEST_SCHEMA_VERSION,
        });
        value.to_string().into_bytes()
    }

    /// Digest of the canonical bytes, under [`HashDomain::RunManifest`].
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(HashDomain::RunManifest, &self.to_canonical_bytes())
    }

    /// Parse manifest bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RunDirError::ManifestParseError`] or
    /// [`RunDirError::ManifestVersionMismatch`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RunDirError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| RunDirError::ManifestParseError {
                detail: format!("{e}"),
            })?;

        let schema_version = value["schema_version"].as_str().unwrap_or("");
        if schema_version != MANIFEST_SCHEMA_VERSION {
            return Err(RunDirError::ManifestVersionMismatch {
                found: schema_version.to_string(),
            });
        }

        let bound = u32::try_from(required_u64(&value, "bound")?).map_err(|_| {
            RunDirError::ManifestParseError {
                detail: "\"bound\" does not fit in u32".into(),
            }
        })?;
        let log_digest_str = required_str(&value, "log_digest")?;
        let log_digest =
            ContentHash::parse(log_digest_str).ok_or_else(|| RunDirError::ManifestParseError {
                detail: format!("\"log_digest\" is not a content hash: {log_digest_str}"),
            })?;

        Ok(Self {
            bound,
            digit_set: required_str(&value, "digit_set")?.to_string(),
            record_count: required_u64(&value, "record_count")?,
            candidates_evaluated: required_u64(&value, "candidates_evaluated")?,
            log_digest,
        })
    }

    /// Whether this manifest was produced for `params`.
    #[must_use]
    pub fn matches_params(&self, params: &EnumerationParamsV1) -> bool {
        self.bound == params.bound && self.digit_set == params.digits.to_string()
    }
}

fn required_u64(value: &serde_json::Value, field: &str) -> Result<u64, RunDirError> {
    value[field]
        .as_u64()
        .ok_or_else(|| RunDirError::ManifestParseError {
            detail: format!("missing or non-integer \"{field}\""),
        })
}

fn required_str<'v>(value: &'v serde_json::Value, field: &str) -> Result<&'v str, RunDirError> {
    value[field]
        .as_str()
        .ok_or_else(|| RunDirError::ManifestParseError {
            detail: format!("missing or non-string \"{field}\""),
        })
}

// ---------------------------------------------------------------------------
// RunDirectory: file-backed ResultStore
// ---------------------------------------------------------------------------

/// A run directory on disk.
#[derive(Debug, Clone)]
pub struct RunDirectory {
    root: PathBuf,
}

impl RunDirectory {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILENAME)
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }
}

impl LogProbe for RunDirectory {
    fn log_exists(&self) -> bool {
        self.log_path().is_file()
    }
}

impl ResultStore for RunDirectory {
    type Writer = ResultLogWriter<File>;
    type Records = ResultLogReader<std::io::BufReader<File>>;

    fn create_log(&mut self, flush_every_outer: u32) -> Result<Self::Writer, RunDirError> {
        std::fs::create_dir_all(&self.root).map_err(|e| RunDirError::Io {
            detail: format!("create_dir_all {}: {e}", self.root.display()),
        })?;
        // A manifest without its log belongs to an earlier, discarded run.
        remove_if_present(&self.manifest_path())?;
        Ok(ResultLogWriter::create(&self.log_path(), flush_every_outer)?)
    }

    fn commit(
        &mut self,
        writer: Self::Writer,
        params: &EnumerationParamsV1,
        stats: &EnumerationStatsV1,
    ) -> Result<(), RunDirError> {
        let file = writer.into_inner()?;
        file.sync_all().map_err(|e| RunDirError::Io {
            detail: format!("sync {}: {e}", self.log_path().display()),
        })?;
        drop(file);

        let manifest = RunManifestV1 {
            bound: params.bound,
            digit_set: params.digits.to_string(),
            record_count: stats.accepted,
            candidates_evaluated: stats.candidates_evaluated,
            log_digest: log_digest(&self.log_path())?,
        };
        write_atomic(&self.manifest_path(), &manifest.to_canonical_bytes())
    }

    fn open_log(&self) -> Result<Self::Records, LogReadError> {
        ResultLogReader::open(&self.log_path())
    }

    fn discard_log(&mut self) -> Result<(), RunDirError> {
        remove_if_present(&self.log_path())?;
        remove_if_present(&self.manifest_path())
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Digest of the log file as stored.
///
/// # Errors
///
/// Returns [`RunDirError::MissingLog`] or [`RunDirError::Io`].
pub fn log_digest(path: &Path) -> Result<ContentHash, RunDirError> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RunDirError::MissingLog,
        _ => RunDirError::Io {
            detail: format!("open {}: {e}", path.display()),
        },
    })?;

    let mut hasher = DomainHasher::new(HashDomain::ResultLog);
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).map_err(|e| RunDirError::Io {
            detail: format!("read {}: {e}", path.display()),
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finish())
}

/// Read and parse `run_manifest.json`.
///
/// # Errors
///
/// Returns [`RunDirError::MissingManifest`] if absent, or a parse error.
pub fn read_run_manifest(dir: &Path) -> Result<RunManifestV1, RunDirError> {
    RunManifestV1::from_bytes(&read_manifest_bytes(dir)?)
}

fn read_manifest_bytes(dir: &Path) -> Result<Vec<u8>, RunDirError> {
    std::fs::read(dir.join(MANIFEST_FILENAME)).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RunDirError::MissingManifest,
        _ => RunDirError::Io {
            detail: format!("read {MANIFEST_FILENAME}: {e}"),
        },
    })
}

/// Verify a run directory against its manifest.
///
/// Fail-closed:
/// - Missing log or manifest → error
/// - Manifest bytes not canonical → error
/// - Digest mismatch → error
/// - Corrupt or out-of-order record → error
/// - Record count mismatch → error
///
/// # Errors
///
/// Returns the first [`RunDirError`] found.
pub fn verify_run_dir(dir: &Path) -> Result<RunManifestV1, RunDirError> {
    let run = RunDirectory::new(dir);
    if !run.log_exists() {
        return Err(RunDirError::MissingLog);
    }
    let manifest_bytes = read_manifest_bytes(dir)?;
    let manifest = RunManifestV1::from_bytes(&manifest_bytes)?;
    if canonical_hash(HashDomain::RunManifest, &manifest_bytes) != manifest.digest() {
        return Err(RunDirError::ManifestNotCanonical);
    }

    let recomputed = log_digest(&run.log_path())?;
    if recomputed != manifest.log_digest {
        return Err(RunDirError::DigestMismatch {
            stored: manifest.log_digest.as_str().to_string(),
            recomputed: recomputed.as_str().to_string(),
        });
    }

    let mut count = 0u64;
    let mut previous = None;
    for record in run.open_log()? {
        let triple = record?;
        count += 1;
        if previous.is_some_and(|p| p >= triple) {
            return Err(RunDirError::OutOfOrder { line_number: count });
        }
        previous = Some(triple);
    }
    if count != manifest.record_count {
        return Err(RunDirError::RecordCountMismatch {
            stored: manifest.record_count,
            recomputed: count,
        });
    }

    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Write bytes to a path via temp file + rename (best-effort atomicity on Unix).
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), RunDirError> {
    let dir = path.parent().ok_or_else(|| RunDirError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    std::fs::write(&temp_path, content).map_err(|e| RunDirError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| RunDirError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })
}

fn remove_if_present(path: &Path) -> Result<(), RunDirError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RunDirError::Io {
            detail: format!("remove {}: {e}", path.display()),
        }),
    }
}
