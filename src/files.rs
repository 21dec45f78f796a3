use crate::error::{Error, Result};
use crate::log_debug;

use ignore::WalkBuilder;
use std::path::Path;

/// Default ceiling on the number of files that may be auto-committed
pub const DEFAULT_MAX_FILES: usize = 100;

/// Counts the non-directory entries below `root`, giving up as soon as the
/// count exceeds `max_files`.
///
/// Every file is visited: hidden files count, ignore files are not
/// consulted, and the contents of `.git` count like any other file.
///
/// # Returns
///
/// The number of files when it is within the limit, or
/// `Error::FileCountLimitExceeded` carrying `max_files + 1` as the count.
pub fn count_files(root: &Path, max_files: usize) -> Result<usize> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut count = 0;
    for entry in walker {
        let entry = entry.map_err(|source| Error::WalkIo {
            path: root.to_path_buf(),
            source,
        })?;

        if matches!(entry.file_type(), Some(ft) if ft.is_dir()) {
            continue;
        }

        count += 1;
        if count > max_files {
            log_debug!("Stopped walking {} after {} files", root.display(), count);
            return Err(Error::FileCountLimitExceeded {
                count,
                limit: max_files,
            });
        }
    }

    log_debug!("Counted {} files under {}", count, root.display());
    Ok(count)
}
