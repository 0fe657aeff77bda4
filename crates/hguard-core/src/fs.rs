use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Extensions of the files we consider to be headers.
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "h++", "inc", "inl", "ipp", "tcc"];

/// Make `path` absolute and remove `.` and `..` components, without touching
/// the file system. If this fails, `path` is returned unchanged.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match path.absolutize() {
        Ok(path) => path.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

pub fn has_header_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            HEADER_EXTENSIONS
                .iter()
                .any(|header| ext.eq_ignore_ascii_case(header))
        })
}
