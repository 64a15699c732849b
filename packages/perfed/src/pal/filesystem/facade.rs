// Facade that dispatches to either the real filesystem or a mock in tests.

use std::io;
use std::path::Path;
#[cfg(test)]
use std::sync::Arc;

use crate::WriteMode;
#[cfg(test)]
use crate::pal::MockFilesystem;
use crate::pal::{BuildTargetFilesystem, Filesystem};

/// Facade over filesystem operations, dispatching to real or mock implementation.
///
/// In production, this always uses `BuildTargetFilesystem`. In tests, it can also wrap a
/// `MockFilesystem` for controlled test scenarios.
#[derive(Clone)]
pub(crate) enum FilesystemFacade {
    /// Real filesystem implementation.
    Target(&'static BuildTargetFilesystem),

    /// Mock filesystem for testing.
    #[cfg(test)]
    Mock(Arc<MockFilesystem>),
}

// Debug implementations have no API contract to test.
#[cfg_attr(test, mutants::skip)]
impl std::fmt::Debug for FilesystemFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Target(_) => f.debug_struct("FilesystemFacade::Target").finish(),
            #[cfg(test)]
            Self::Mock(_) => f.debug_struct("FilesystemFacade::Mock").finish(),
        }
    }
}

/// Static instance of the real filesystem for production use.
static BUILD_TARGET_FILESYSTEM: BuildTargetFilesystem = BuildTargetFilesystem;

impl FilesystemFacade {
    /// Creates a facade using the real filesystem.
    pub(crate) const fn target() -> Self {
        Self::Target(&BUILD_TARGET_FILESYSTEM)
    }

    /// Creates a facade wrapping a mock filesystem (test builds only).
    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockFilesystem) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Filesystem for FilesystemFacade {
    fn write(&self, path: &Path, mode: WriteMode, contents: &[u8]) -> io::Result<()> {
        match self {
            Self::Target(fs) => fs.write(path, mode, contents),
            #[cfg(test)]
            Self::Mock(mock) => mock.write(path, mode, contents),
        }
    }
}

impl Default for FilesystemFacade {
    fn default() -> Self {
        Self::target()
    }
}
