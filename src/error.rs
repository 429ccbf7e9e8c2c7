//=========================================================================
// Error Types
//=========================================================================
//
// Failure taxonomy for the runtime.
//
//   EngineError: fatal, reported before the frame loop starts
//   LoadError:   recoverable, reported to whoever asked for a resource
//
// Per-frame outcomes (actor death, screen close) are state transitions
// and never surface here.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformError;

//=== EngineError =========================================================

/// Fatal startup or platform failure.
///
/// Returned by [`crate::core::scheduler::FrameScheduler::initialize`] and
/// [`crate::Engine::run`]. When one of these is produced, every subsystem
/// that had already been brought up has been shut down again.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The renderer refused the requested surface.
    #[error("failed to initialize renderer ({width}x{height})")]
    RendererInit { width: u32, height: u32 },

    /// The audio device could not be opened.
    #[error("failed to initialize audio system")]
    AudioInit,

    /// The OS event loop or window could not be created or failed while running.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=== LoadError ===========================================================

/// Resource load failure.
///
/// Never memoised by the caches: a later request for the same key
/// retries the load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File missing or unreadable.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON (or does not match the expected serde shape).
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document parsed but has the wrong shape.
    #[error("malformed document {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

impl LoadError {
    /// Path of the resource that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::Malformed { path, .. } => path,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
