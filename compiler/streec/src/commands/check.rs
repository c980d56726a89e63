//! The `check` command: parse many files in parallel and report errors.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use super::{read_source, render_error, stderr_colors};

/// What a successful check found in one file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FileSummary {
    pub nodes: usize,
    pub comments: usize,
}

/// Parse one source. On failure, the rendered error.
pub(crate) fn check_source(path: &Path, source: &str, colors: bool) -> Result<FileSummary, String> {
    let program = stree_parse::parse(source).map_err(|error| render_error(source, path, &error, colors))?;
    let mut nodes = 0;
    program.walk(&mut |_| nodes += 1);
    Ok(FileSummary {
        nodes,
        comments: program.comment_count(),
    })
}

/// Parse every file, each in its own pipeline, and report per file.
pub fn check_files(files: &[PathBuf]) -> bool {
    let colors = stderr_colors();
    let checked = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        let result = read_source(path).and_then(|source| check_source(path, &source, colors));
        match result {
            Ok(summary) => {
                println!(
                    "OK: {} ({} nodes, {} comments)",
                    path.display(),
                    summary.nodes,
                    summary.comments
                );
                checked.fetch_add(1, Ordering::Relaxed);
            }
            Err(report) => {
                eprint!("{report}");
                if !report.ends_with('\n') {
                    eprintln!();
                }
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    });

    let (checked, failed) = (checked.load(Ordering::Relaxed), failed.load(Ordering::Relaxed));
    debug!(checked, failed, "check finished");
    if failed > 0 {
        eprintln!("{failed} of {} files failed to parse", checked + failed);
    }
    failed == 0
}
