use std::collections::HashSet;
use std::io::Write;

use anyhow::{Context, Result};

use crate::markers;
use crate::options::ScanOptions;
use crate::paths;
use crate::preprocessor::Preprocessor;

/// Walks the include graph starting from the configured target files
/// and streams every discovered dependency to `out`, one path per line,
/// each at most once.
///
/// Compile mode emits every in-scope file the preprocessor reports.
/// Link mode swaps the configured suffix onto each reported path and,
/// when that sibling source exists, emits it and queues it so its own
/// includes are traced too.
pub fn scan<P: Preprocessor, W: Write>(opts: &ScanOptions, pp: &P, out: &mut W) -> Result<()> {
    let mut queue: Vec<String> = Vec::new();
    // Everything ever queued, so a fully processed file is never queued
    // again. Extraction order is unspecified.
    let mut enqueued: HashSet<String> = HashSet::new();
    let mut seen: HashSet<String> = HashSet::new();

    for file in &opts.files {
        if enqueued.insert(file.clone()) {
            queue.push(file.clone());
        }
    }

    while let Some(file) = queue.pop() {
        for line in pp.expand(&file) {
            let Some(path) = markers::accepted_path(&line, &opts.filter) else {
                continue;
            };

            // The unit's own marker is not a dependency of itself.
            if opts.compile && path != file && !seen.contains(&path) {
                emit(out, &path)?;
                seen.insert(path.clone());
            }

            if opts.link {
                let Some(suffix) = opts.suffix.as_deref() else {
                    continue;
                };
                let sibling = swap_suffix(&path, suffix);
                if !seen.contains(&sibling) && paths::exists(&sibling) {
                    emit(out, &sibling)?;
                    seen.insert(sibling.clone());
                    if sibling != file && enqueued.insert(sibling.clone()) {
                        queue.push(sibling);
                    }
                }
            }
        }
    }

    Ok(())
}

// Streaming: flushed per line so a consumer on the other end of a pipe
// can start reading before the walk finishes.
fn emit<W: Write>(out: &mut W, path: &str) -> Result<()> {
    writeln!(out, "{path}").context("writing dependency path")?;
    out.flush().context("flushing dependency path")
}

/// Replaces the extension of the final path segment with `suffix`; a
/// segment without an extension gets `.suffix` appended.
fn swap_suffix(path: &str, suffix: &str) -> String {
    match path.rfind('.') {
        Some(i) if i > 0 && !path[i..].contains('/') => format!("{}.{}", &path[..i], suffix),
        _ => format!("{path}.{suffix}"),
    }
}
