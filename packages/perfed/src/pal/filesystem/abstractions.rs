// Filesystem trait abstraction for mocking in tests.

use std::fmt::Debug;
use std::io;
use std::path::Path;

use crate::WriteMode;

/// Abstraction over filesystem operations used when persisting results.
///
/// This trait is automatically mocked by mockall in test builds, generating `MockFilesystem`.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Filesystem: Debug + Send + Sync + 'static {
    /// Opens `path` according to `mode` and writes `contents` to it in a single call.
    ///
    /// Returns an error if the file cannot be opened in the requested mode (for example
    /// because it already exists and `mode` is [`WriteMode::CreateExclusive`]) or cannot
    /// be written.
    fn write(&self, path: &Path, mode: WriteMode, contents: &[u8]) -> io::Result<()>;
}
