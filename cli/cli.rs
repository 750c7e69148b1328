use anyhow::Result;
use clap::Parser;
use console::style;
use incdeps_core::{CommandPreprocessor, Overrides, interpret, scan};
use std::io;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[clap(
    name = "incdeps",
    version = "0.1.0",
    about = "Lists the files a C/C++ compilation unit transitively depends on",
    long_about = "Delegates include expansion to an external preprocessor and harvests the\n\
        file references it reports. Compile mode lists every transitively\n\
        included file; link mode resolves headers back to sibling source files\n\
        and traces those too."
)]
struct CliArgs {
    #[clap(
        long,
        env = "INCDEPS_DEBUG",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Print the assembled path filter and each preprocessor command line on stderr"
    )]
    debug: bool,

    #[clap(
        long,
        value_name = "CMD",
        env = "INCDEPS_CPP",
        help = "External preprocessor to invoke [default: cpp]"
    )]
    cpp: Option<String>,

    #[clap(
        long,
        value_name = "SUFFIX",
        env = "INCDEPS_SUFFIX",
        help = "Source suffix for link-mode substitution [default: first target file's extension]"
    )]
    suffix: Option<String>,

    #[clap(
        value_name = "TOKEN",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "-compile | -link | -I<dir> | -I <dir> | <file>; any other -flag is forwarded to the preprocessor"
    )]
    tokens: Vec<String>,
}

fn main() -> Result<ExitCode> {
    let cli = CliArgs::parse();
    let overrides = Overrides {
        debug: cli.debug,
        preprocessor: cli.cpp,
        suffix: cli.suffix,
    };

    let opts = match interpret(&cli.tokens, &overrides) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", style(format!("incdeps: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    if opts.debug {
        eprintln!(
            "incdeps: path filter {}",
            style(opts.filter.pattern()).dim()
        );
    }

    let preprocessor = CommandPreprocessor::from_options(&opts);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    scan(&opts, &preprocessor, &mut out)?;

    Ok(ExitCode::SUCCESS)
}
