use std::process::{Command, Stdio};

use crate::escape::escape_shell;
use crate::options::ScanOptions;

/// Expands one file and yields the raw stdout lines of the expansion.
/// Abstract so the graph walk can be driven by canned marker lines in
/// tests instead of a real subprocess.
pub trait Preprocessor {
    fn expand(&self, file: &str) -> Vec<String>;
}

/// Runs the configured external preprocessor as a blocking subprocess,
/// one invocation per file, stderr discarded.
pub struct CommandPreprocessor {
    program: String,
    args: Vec<String>,
    debug: bool,
}

impl CommandPreprocessor {
    pub fn new(program: String, args: Vec<String>, debug: bool) -> Self {
        CommandPreprocessor {
            program,
            args,
            debug,
        }
    }

    pub fn from_options(opts: &ScanOptions) -> Self {
        CommandPreprocessor::new(
            opts.preprocessor.clone(),
            opts.preprocessor_args.clone(),
            opts.debug,
        )
    }

    /// Shell-escaped rendering of one invocation, for debug output.
    /// The subprocess itself is spawned from an argv vector; no shell
    /// ever sees this string.
    fn command_line(&self, file: &str) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().map(|a| escape_shell(a)));
        parts.push(escape_shell(file));
        parts.join(" ")
    }
}

impl Preprocessor for CommandPreprocessor {
    fn expand(&self, file: &str) -> Vec<String> {
        if self.debug {
            eprintln!("incdeps: running {}", self.command_line(file));
        }
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(file)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();
        match output {
            // Exit status is ignored: cpp exits non-zero for all kinds
            // of complaints while still emitting usable line markers.
            Ok(out) => String::from_utf8_lossy(&out.stdout)
                .lines()
                .map(str::to_owned)
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
