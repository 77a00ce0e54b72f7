//! Database persistence.
//!
//! A database file is a sequence of segments, one per build run (writers
//! append). Each segment is a fixed header (magic, format version,
//! payload length, payload checksum) followed by a postcard payload
//! holding one serialized [`TypeGraph`]. Loading reads every segment and
//! merges them into a single store, so files produced by appending many
//! runs back-to-back load the same as a compacted one.

use std::io::Write;
use std::path::Path;
use std::{fs, io};

use crate::graph::TypeGraph;

const MAGIC: [u8; 4] = *b"kgdb";
const VERSION: u16 = 1;
/// magic + version + payload length + payload checksum.
const HEADER_LEN: usize = 4 + 2 + 4 + 4;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {reason}")]
    Format { path: String, reason: String },
}

fn format_err(path: &Path, reason: impl Into<String>) -> DbError {
    DbError::Format {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

fn encode_segment(graph: &TypeGraph) -> Vec<u8> {
    let payload = postcard::to_allocvec(graph).expect("serialization should not fail");
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    out.extend_from_slice(&payload);
    out
}

/// Append one segment to `path`, creating the file if needed.
pub fn append(path: &Path, graph: &TypeGraph) -> Result<(), DbError> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| DbError::Open {
            path: path.display().to_string(),
            source,
        })?;
    file.write_all(&encode_segment(graph))
        .map_err(|source| DbError::Write {
            path: path.display().to_string(),
            source,
        })
}

/// Rewrite `path` as a single consolidated segment.
pub fn write(path: &Path, graph: &TypeGraph) -> Result<(), DbError> {
    fs::write(path, encode_segment(graph)).map_err(|source| DbError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Load every segment of `path` into one merged store.
pub fn load(path: &Path) -> Result<TypeGraph, DbError> {
    let bytes = fs::read(path).map_err(|source| DbError::Open {
        path: path.display().to_string(),
        source,
    })?;
    decode(path, &bytes)
}

/// Like [`load`], but an absent file yields an empty store.
pub fn load_if_exists(path: &Path) -> Result<TypeGraph, DbError> {
    match fs::read(path) {
        Ok(bytes) => decode(path, &bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(TypeGraph::new()),
        Err(source) => Err(DbError::Open {
            path: path.display().to_string(),
            source,
        }),
    }
}

fn decode(path: &Path, bytes: &[u8]) -> Result<TypeGraph, DbError> {
    let mut graph = TypeGraph::new();
    let mut rest = bytes;

    while !rest.is_empty() {
        if rest.len() < HEADER_LEN {
            return Err(format_err(path, "truncated segment header"));
        }
        if rest[..4] != MAGIC {
            return Err(format_err(path, "bad segment magic"));
        }
        let version = u16::from_le_bytes(rest[4..6].try_into().expect("sized slice"));
        if version != VERSION {
            return Err(format_err(path, format!("unsupported format version {version}")));
        }
        let len = u32::from_le_bytes(rest[6..10].try_into().expect("sized slice")) as usize;
        let checksum = u32::from_le_bytes(rest[10..14].try_into().expect("sized slice"));

        let Some(payload) = rest[HEADER_LEN..].get(..len) else {
            return Err(format_err(path, "truncated segment payload"));
        };
        if crc32fast::hash(payload) != checksum {
            return Err(format_err(path, "segment checksum mismatch"));
        }

        let segment: TypeGraph = postcard::from_bytes(payload)
            .map_err(|e| format_err(path, format!("undecodable segment: {e}")))?;
        graph.merge(segment);

        rest = &rest[HEADER_LEN + len..];
    }

    Ok(graph)
}
