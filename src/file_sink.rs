use crate::error::SinkError;
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_TAG: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_TAG: u64 = NEXT_THREAD_TAG.fetch_add(1, Ordering::Relaxed);
}

/// Small per-process number identifying the calling thread, assigned on the
/// thread's first log call. Part of every log file name.
pub fn thread_tag() -> u64 {
    THREAD_TAG.with(|tag| *tag)
}

/// `<root>/<username>/<yyyy-MM-dd>-<thread>.log`
///
/// The username is reduced to one path component: separators become `_`
/// and `.`/`..` become `_`, so a username cannot escape `root`.
pub fn destination_file(root: &Path, username: &str, day: NaiveDate, thread: u64) -> PathBuf {
    root.join(user_dir(username))
        .join(format!("{}-{}.log", day.format("%Y-%m-%d"), thread))
}

fn user_dir(username: &str) -> String {
    let cleaned: String = username
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// Appends text to log files.
///
/// Nothing is kept open between calls: each append creates missing
/// directories, opens the file in append mode, takes an exclusive lock,
/// writes, flushes and closes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileAppender;

impl FileAppender {
    pub fn append(&self, path: &Path, text: &str) -> Result<(), SinkError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        file.lock().map_err(|source| SinkError::Lock {
            path: path.to_path_buf(),
            source,
        })?;

        let written = file
            .write_all(text.as_bytes())
            .and_then(|()| file.flush());
        // Closing the handle releases the lock as well.
        let _ = file.unlock();

        written.map_err(|source| SinkError::Append {
            path: path.to_path_buf(),
            source,
        })
    }
}
