use std::path::Path;

use crate::paths::{PathFilter, compact};

pub const DEFAULT_PREPROCESSOR: &str = "cpp";

/// Settings resolvable outside the token stream: the cli crate fills
/// this from its own options and their environment fallbacks.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub debug: bool,
    pub preprocessor: Option<String>,
    pub suffix: Option<String>,
}

/// Immutable run configuration produced by [`interpret`]. Nothing in
/// here changes once the scan starts.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub compile: bool,
    pub link: bool,
    pub debug: bool,
    /// External preprocessor program name.
    pub preprocessor: String,
    /// Arguments handed to every preprocessor invocation, in token
    /// order: forwarded flags plus `-I<path>` entries.
    pub preprocessor_args: Vec<String>,
    /// Target files, compacted. The queue and the seen-set only ever
    /// hold compacted spellings.
    pub files: Vec<String>,
    pub filter: PathFilter,
    /// Source suffix for link-mode substitution. `None` only when no
    /// target file had an extension and no override was given.
    pub suffix: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum OptionsError {
    #[error("no mode selected: pass -compile, -link, or both")]
    NoModeSelected,

    #[error("-I expects a path argument")]
    MissingIncludePath,
}

/// Interprets the raw token stream: mode flags, include paths, forwarded
/// preprocessor flags, and target files. Each target file seeds the path
/// filter with its containing directory; each `-I` path seeds it too.
pub fn interpret(tokens: &[String], overrides: &Overrides) -> Result<ScanOptions, OptionsError> {
    let mut compile = false;
    let mut link = false;
    let mut preprocessor_args = Vec::new();
    let mut files = Vec::new();
    let mut filter = PathFilter::default();
    let mut suffix = overrides.suffix.clone();

    let mut it = tokens.iter();
    while let Some(token) = it.next() {
        match token.as_str() {
            "-compile" => compile = true,
            "-link" => link = true,
            "-I" => {
                let path = it.next().ok_or(OptionsError::MissingIncludePath)?;
                add_include(path, &mut preprocessor_args, &mut filter);
            }
            t if t.starts_with("-I") => {
                add_include(&t[2..], &mut preprocessor_args, &mut filter);
            }
            t if t.starts_with('-') => {
                // Opaque flag, forwarded verbatim.
                preprocessor_args.push(t.to_string());
            }
            file => {
                let file = compact(file);
                filter.add(containing_dir(&file));
                if suffix.is_none() {
                    suffix = extension_of(&file);
                }
                files.push(file);
            }
        }
    }

    if !compile && !link {
        return Err(OptionsError::NoModeSelected);
    }

    Ok(ScanOptions {
        compile,
        link,
        debug: overrides.debug,
        preprocessor: overrides
            .preprocessor
            .clone()
            .unwrap_or_else(|| DEFAULT_PREPROCESSOR.to_string()),
        preprocessor_args,
        files,
        filter,
        suffix,
    })
}

fn add_include(path: &str, preprocessor_args: &mut Vec<String>, filter: &mut PathFilter) {
    filter.add(path);
    preprocessor_args.push(format!("-I{path}"));
}

fn containing_dir(file: &str) -> &str {
    match file.rfind('/') {
        Some(0) => "/",
        Some(i) => &file[..i],
        None => ".",
    }
}

fn extension_of(file: &str) -> Option<String> {
    Path::new(file)
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
}
