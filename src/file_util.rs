use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// checks if a file exists
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// reads lines from a file, trimmed, blank lines dropped
///
/// # Example
/// ```rust
///     let urls: Vec<String> = file_util::read_from_file("./urls.txt")?;
///     for url in urls {
///         println!("{url}");
///     }
/// ```
/// Lines that are not valid UTF-8 are skipped with a warning.
pub fn read_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut lines = vec![];
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let Ok(line) = String::from_utf8(raw?) else {
            warn!("skipping line {} of {}: not valid UTF-8", idx + 1, path.display());
            continue;
        };
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

/// write lines to a file, truncating it. parent directories are created
pub fn write_to_file<P, S>(lines: &[S], path: P) -> io::Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{}", line.as_ref())?;
    }
    file.flush()
}

/// A file that only lives until it has been consumed. Removed on drop, so an
/// interrupted run does not leave it behind. A parent directory created for it
/// goes too if nothing else was put there meanwhile.
pub struct StagingFile {
    path: PathBuf,
    created_dir: Option<PathBuf>,
}

impl StagingFile {
    pub fn create<S: AsRef<str>>(path: PathBuf, lines: &[S]) -> io::Result<Self> {
        let created_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .map(Path::to_path_buf);
        write_to_file(lines, &path)?;
        Ok(Self { path, created_dir })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> io::Result<Vec<String>> {
        read_from_file(&self.path)
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if file_exists(&self.path) {
            let _ = fs::remove_file(&self.path);
        }
        // remove_dir refuses non-empty directories
        if let Some(dir) = &self.created_dir {
            let _ = fs::remove_dir(dir);
        }
    }
}
