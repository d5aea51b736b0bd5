use crate::config::Config;
use crate::runner;
use log::info;
use std::io::{self, BufRead, Write};

pub const VERSION_BANNER: &str = "NicoLISP Version 0.0.1";
const PROMPT: &str = "nicolisp> ";

/// Interactive loop on stdin/stdout. Every line is parsed and evaluated from scratch.
pub fn start(config: &Config) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(stdin.lock(), &mut stdout.lock(), config)
}

pub fn session(mut input: impl BufRead, out: &mut impl Write, config: &Config) -> io::Result<()> {
    writeln!(out, "{}", VERSION_BANNER)?;
    writeln!(out, "Press Ctrl+c to Exit")?;
    writeln!(out)?;

    let mut lines = 0usize;
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF (Ctrl+D or piped input ended)
            writeln!(out)?;
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        lines += 1;
        runner::run(line, config, out)?;
    }

    info!("session ended after {} lines", lines);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(input: &str) -> String {
        let mut out = Vec::new();
        session(input.as_bytes(), &mut out, &Config::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn evaluates_each_line() {
        let printed = transcript("(+ 2 2)\n(* 2 (+ 3 4))\n");
        assert!(printed.starts_with(VERSION_BANNER));
        assert!(printed.contains("nicolisp> 4\n"));
        assert!(printed.contains("nicolisp> 14\n"));
    }

    #[test]
    fn continues_after_errors() {
        let printed = transcript("(/ 1 0)\n(^ 1 1)\n(- 5 7)\n");
        assert!(printed.contains("Error: Division By Zero\n"));
        assert!(printed.contains("-2\n"));
    }

    #[test]
    fn exit_stops_reading() {
        let printed = transcript("quit\n(+ 1 1)\n");
        assert!(!printed.contains('2'));
    }

    #[test]
    fn survives_runaway_nesting() {
        let deep = "(+ ".repeat(100_000) + "1" + &")".repeat(100_000);
        let printed = transcript(&format!("{}\n(+ 1 1)\n", deep));
        assert!(printed.contains("nicolisp> nicolisp> 2\n"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let printed = transcript("\n   \n+ 3 4\n");
        assert!(printed.contains("7\n"));
    }
}
