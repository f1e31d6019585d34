use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

/// Reads a number and two names, then prints parity, divisibility and
/// truthiness facts
#[derive(Parser)]
#[command(name = "number-drill")]
#[command(version = "0.1.0")]
struct Cli {}

fn main() -> Result<()> {
    Cli::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    drill(&mut stdin.lock(), &mut stdout.lock())
}

/// End of input stops the drill early without an error.
fn drill(input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let Some(number) = ask_int(input, out, "Enter a number: ")? else {
        return finish(out);
    };
    writeln!(out, "{}", parity(number))?;
    writeln!(out, "{}", divisibility(number))?;

    let Some(first) = ask(input, out, "Enter your first name: ")? else {
        return finish(out);
    };
    let Some(nickname) = ask(input, out, "Enter your nickname: ")? else {
        return finish(out);
    };

    writeln!(out, "{}", greeting(&first, &nickname))?;
    writeln!(out, "{}", first_non_empty(&first, &nickname))?;
    writeln!(out, "{}", first_non_empty(&nickname, &first))?;

    for literal in TRUTHINESS_TABLE {
        writeln!(out, "{}", literal.is_truthy())?;
    }
    finish(out)
}

fn finish(out: &mut impl Write) -> Result<()> {
    out.flush()?;
    Ok(())
}

/// `None` once the input is exhausted.
fn ask(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read input")? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Re-prompts until the answer is a whole number.
fn ask_int(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<Option<i64>> {
    while let Some(answer) = ask(input, out, prompt)? {
        match answer.trim().parse() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => writeln!(out, "Input valid number, please.")?,
        }
    }
    Ok(None)
}

fn parity(n: i64) -> String {
    if n % 2 == 0 {
        format!("{n} is even")
    } else {
        format!("{n} is odd")
    }
}

/// Divisibility by 3 wins over 4.
fn divisibility(n: i64) -> String {
    if n % 3 == 0 {
        format!("{n} is divisible by 3")
    } else if n % 4 == 0 {
        format!("{n} is divisible by 4")
    } else {
        format!("{n} is not divisible by 3 or 4")
    }
}

fn greeting(first: &str, nickname: &str) -> String {
    format!("hello {}", first_non_empty(first, nickname))
}

fn first_non_empty<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

/// Loosely typed literal, for the boolean-coercion part of the drill.
#[derive(Debug, Clone, Copy)]
enum Literal {
    Str(&'static str),
    Num(f64),
    Null,
    Undefined,
}

impl Literal {
    fn is_truthy(self) -> bool {
        match self {
            Literal::Str(s) => !s.is_empty(),
            Literal::Num(n) => n != 0.0 && !n.is_nan(),
            Literal::Null | Literal::Undefined => false,
        }
    }
}

const TRUTHINESS_TABLE: [Literal; 9] = [
    Literal::Str(""),
    Literal::Num(0.0),
    Literal::Null,
    Literal::Undefined,
    Literal::Num(f64::NAN),
    Literal::Str("false"),
    Literal::Str("Helo"),
    Literal::Str("True"),
    Literal::Str("1"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Result<String> {
        let mut out = Vec::new();
        drill(&mut input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn parity_and_divisibility() {
        assert_eq!(parity(4), "4 is even");
        assert_eq!(parity(-3), "-3 is odd");
        assert_eq!(divisibility(12), "12 is divisible by 3");
        assert_eq!(divisibility(8), "8 is divisible by 4");
        assert_eq!(divisibility(7), "7 is not divisible by 3 or 4");
        assert_eq!(divisibility(0), "0 is divisible by 3");
    }

    #[test]
    fn greeting_falls_back_to_nickname() {
        assert_eq!(greeting("Ann", "Annie"), "hello Ann");
        assert_eq!(greeting("", "Annie"), "hello Annie");
        assert_eq!(first_non_empty("", ""), "");
    }

    #[test]
    fn truthiness_matches_loose_coercion() {
        let values: Vec<bool> = TRUTHINESS_TABLE.iter().map(|l| l.is_truthy()).collect();
        assert_eq!(
            values,
            [false, false, false, false, false, true, true, true, true]
        );
    }

    #[test]
    fn reprompts_until_a_number_is_given() -> Result<()> {
        let out = run("abc\n\n8\nAnn\nAnnie\n")?;

        assert_eq!(out.matches("Enter a number: ").count(), 3);
        assert_eq!(out.matches("Input valid number, please.").count(), 2);
        assert!(out.contains("8 is even\n8 is divisible by 4\n"));
        assert!(out.contains("hello Ann\nAnn\nAnnie\n"));
        Ok(())
    }

    #[test]
    fn empty_first_name_uses_nickname_everywhere() -> Result<()> {
        let out = run("9\n\nNicky\n")?;
        assert!(out.contains("hello Nicky\nNicky\nNicky\n"));
        Ok(())
    }

    #[test]
    fn truncated_input_stops_quietly() -> Result<()> {
        let out = run("5\n")?;
        assert!(out.contains("5 is odd\n5 is not divisible by 3 or 4\n"));
        assert!(out.ends_with("Enter your first name: \n"));
        assert!(!out.contains("hello"));

        let out = run("abc\n")?;
        assert!(out.contains("Input valid number, please."));
        assert!(!out.contains(" is odd"));
        Ok(())
    }
}
