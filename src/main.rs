use clap::{Arg, Command};
use log::error;
use nicolisp::{repl, runner, Config, OverflowPolicy};
use std::io;
use std::process;

fn main() {
    env_logger::init();

    let matches = Command::new("nicolisp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A prefix-notation integer calculator")
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .help("Evaluate a single expression and exit")
                .value_name("EXPR"),
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .help("Print the syntax tree and its node count before each result")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("overflow")
                .long("overflow")
                .help("Integer overflow behaviour for + - * /")
                .value_name("POLICY")
                .value_parser(OverflowPolicy::NAMES)
                .default_value("wrapping"),
        )
        .get_matches();

    let overflow = matches
        .get_one::<String>("overflow")
        .and_then(|name| name.parse().ok())
        .unwrap_or_default();

    let config = Config {
        show_tree: matches.get_flag("tree"),
        overflow,
    };

    if let Some(source) = matches.get_one::<String>("eval") {
        let stdout = io::stdout();
        match runner::run(source, &config, &mut stdout.lock()) {
            Ok(true) => {}
            Ok(false) => process::exit(1),
            Err(e) => {
                error!("failed to write result: {}", e);
                process::exit(1);
            }
        }
    } else if let Err(e) = repl::start(&config) {
        eprintln!("Error reading input: {}", e);
        process::exit(1);
    }
}
