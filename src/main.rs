use std::fs;

use anyhow::Context;
use clap::{App, Arg};
use log::debug;

use toyc::{lexer, parser};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = App::new("toyc")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("SOURCE")
                .help("source file to compile")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("write the result to FILE instead of stdout")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("emit")
                .long("emit")
                .value_name("STAGE")
                .help("what to print")
                .possible_values(&["tokens", "ast", "js"])
                .default_value("js"),
        )
        .get_matches();

    // required, so always present
    let path = matches.value_of("SOURCE").unwrap_or_default();
    let source = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    debug!("read {} byte(s) from {}", source.len(), path);

    let output = match matches.value_of("emit") {
        Some("tokens") => lexer::lex(&source)?
            .iter()
            .map(|token| format!("{}\n", token))
            .collect::<String>(),
        Some("ast") => format!("{:#?}\n", parser::parse(&lexer::lex(&source)?)?),
        _ => toyc::compile(&source)?,
    };

    match matches.value_of("output") {
        Some(out) => fs::write(out, &output).with_context(|| format!("failed to write {}", out))?,
        None => print!("{}", output),
    }

    Ok(())
}
