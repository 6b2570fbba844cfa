//! Shared filesystem helpers built on `cap-std` and `camino`.
//!
//! Dataset adapters open and create files through these helpers. Output
//! files are created through a capability for their parent directory.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create (or truncate) a UTF-8 file path for writing.
///
/// The parent directory must already exist; it is never created here.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, name) = parent_dir_and_name(path)?;
    dir.create(name)
}

/// Open the parent directory of `path` and return it with the file name.
///
/// A bare file name resolves against the current directory.
fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        )
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 tempdir");
        (tmp, root)
    }

    #[rstest]
    fn create_then_open_round_trips_contents(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let path = root.join("hull.geojson");
        let mut file = create_utf8_file(&path).expect("create file");
        file.write_all(b"{}").expect("write file");
        drop(file);

        let mut contents = String::new();
        open_utf8_file(&path)
            .expect("open file")
            .read_to_string(&mut contents)
            .expect("read file");
        assert_eq!(contents, "{}");
    }

    #[rstest]
    fn create_fails_when_parent_is_missing(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let path = root.join("missing").join("hull.geojson");
        let err = create_utf8_file(&path).expect_err("missing parent should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn create_truncates_existing_files(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let path = root.join("hull.geojson");
        std::fs::write(&path, "previous contents").expect("seed file");
        drop(create_utf8_file(&path).expect("recreate file"));
        assert_eq!(std::fs::read_to_string(&path).expect("read file"), "");
    }

    #[test]
    fn paths_without_a_file_name_are_rejected() {
        let err = create_utf8_file(Utf8Path::new("/")).expect_err("root has no file name");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
