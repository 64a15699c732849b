// Real filesystem implementation that delegates to std::fs.
//
// This is a trivial forwarder to system APIs and is excluded from mutation testing.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::WriteMode;
use crate::pal::Filesystem;

/// Real filesystem implementation that uses the operating system's filesystem.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetFilesystem;

// Trivial forwarder to system APIs - covered by integration tests.
#[cfg_attr(test, mutants::skip)]
impl Filesystem for BuildTargetFilesystem {
    fn write(&self, path: &Path, mode: WriteMode, contents: &[u8]) -> io::Result<()> {
        let mut options = OpenOptions::new();

        match mode {
            WriteMode::Overwrite => options.write(true).create(true).truncate(true),
            WriteMode::CreateExclusive => options.write(true).create_new(true),
            WriteMode::Append => options.append(true).create(true),
        };

        let mut file = options.open(path)?;
        file.write_all(contents)?;
        file.flush()
    }
}
