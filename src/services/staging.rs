use bytes::Bytes;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// An uploaded audio file copied to local storage.
///
/// The file is removed when the guard is dropped, so every exit path from a
/// request (success, storage failure, provider failure) leaves nothing behind.
#[derive(Debug)]
pub struct StagedAudio {
    file: NamedTempFile,
    len: usize,
}

impl StagedAudio {
    /// Writes `data` in full to a uniquely named file `<dir>/<prefix>XXXXXX<extension>`.
    pub async fn stage(
        dir: &Path,
        prefix: &str,
        extension: &str,
        data: Bytes,
    ) -> io::Result<Self> {
        let dir = dir.to_path_buf();
        let prefix = prefix.to_string();
        let extension = extension.to_string();

        tokio::task::spawn_blocking(move || -> io::Result<Self> {
            let mut file = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(&extension)
                .tempfile_in(&dir)?;
            file.write_all(&data)?;
            file.as_file().sync_data()?;

            Ok(Self {
                file,
                len: data.len(),
            })
        })
        .await
        .map_err(io::Error::other)?
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Deletes the staged file now, reporting any failure instead of ignoring it.
    pub fn close(self) -> io::Result<PathBuf> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        Ok(path)
    }
}
