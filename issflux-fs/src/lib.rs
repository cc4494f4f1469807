//! Shared filesystem helpers built on `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read the whole file at `path` into a string.
pub fn read_utf8_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = open_utf8_file(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir")
    }

    #[rstest]
    fn reads_file_contents() {
        let dir = TempDir::new().expect("tempdir");
        let path = utf8_dir(&dir).join("token");
        std::fs::write(&path, "secret\n").expect("write token");

        let contents = read_utf8_to_string(&path).expect("file should be readable");

        assert_eq!(contents, "secret\n");
    }

    #[rstest]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let path = utf8_dir(&dir).join("absent");

        let err = read_utf8_to_string(&path).expect_err("missing file should error");

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
