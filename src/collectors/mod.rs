pub mod diskstats;
pub mod process_io;

use std::io;

/// A whole accounting interface failed to read.
///
/// Per-entity failures (one unreadable pid, one malformed diskstats line)
/// never surface here — they are skipped at the collection site. This error
/// means the source itself is unusable, and the variant tells the operator
/// whether that is the wrong OS or missing privilege.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("{path} not found — this tool needs a Linux /proc filesystem")]
    NotFound { path: String },

    #[error("permission denied reading {path} — try again with elevated privileges")]
    PermissionDenied { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: io::Error,
    },
}

impl CollectError {
    pub(crate) fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => CollectError::NotFound { path: path.to_string() },
            io::ErrorKind::PermissionDenied => {
                CollectError::PermissionDenied { path: path.to_string() }
            }
            _ => CollectError::Io { path: path.to_string(), source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kind_maps_to_taxonomy() {
        let nf = CollectError::from_io("/proc/diskstats", io::ErrorKind::NotFound.into());
        assert!(matches!(nf, CollectError::NotFound { .. }));
        assert!(nf.to_string().contains("/proc filesystem"));

        let pd = CollectError::from_io("/proc", io::ErrorKind::PermissionDenied.into());
        assert!(matches!(pd, CollectError::PermissionDenied { .. }));
        assert!(pd.to_string().contains("elevated privileges"));
    }
}
