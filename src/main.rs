//! CLI tool to scan AquaLang source files and inspect the token
//! stream.

use std::collections::HashMap;
use std::fs;
use std::process::ExitCode;

use colored::Colorize;

use aqualang_lex::{LexConfig, ScanOutput, Token, scan};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: aqualex <command> [options] [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens    Scan file(s) and print the token table");
        eprintln!("  check     Scan file(s) and report lexical errors");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --no-color   Disable ANSI colors");
        eprintln!("  --summary    Append per-kind token counts (tokens only)");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  aqualex tokens main.aq");
        eprintln!("  aqualex check --no-color src/*.aq");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let mut summary = false;
    let mut files = Vec::new();

    for arg in &args[2..] {
        match arg.as_str() {
            "--no-color" => colored::control::set_override(false),
            "--summary" => summary = true,
            _ => files.push(arg.clone()),
        }
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let config = LexConfig::default();
    let mut had_error = false;

    for path in &files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let output = scan(&content, &config);

        match command {
            "tokens" => {
                println!("{}", format!("--- {path} ---").bold());
                print_table(&output.tokens);
                if summary {
                    print_summary(&output.tokens);
                }
                report_errors(path, &output, &mut had_error);
            }
            "check" => {
                if output.is_clean() {
                    println!("{path}: {} token(s), no errors", output.tokens.len());
                } else {
                    report_errors(path, &output, &mut had_error);
                }
            }
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn report_errors(path: &str, output: &ScanOutput, had_error: &mut bool) {
    for err in &output.errors {
        eprintln!("{}", err.render(path).red());
    }
    if !output.is_clean() {
        *had_error = true;
    }
}

/// Lexeme with control characters escaped and long values clipped,
/// so the table stays aligned.
fn display_lexeme(lexeme: &str) -> String {
    let shown: String = lexeme.chars().flat_map(char::escape_debug).collect();
    if shown.chars().count() > 40 {
        let clipped: String = shown.chars().take(37).collect();
        format!("{clipped}...")
    } else {
        shown
    }
}

fn print_table(tokens: &[Token]) {
    let sep = format!("+{}+{}+{}+{}+{}+", "-".repeat(5), "-".repeat(17), "-".repeat(42), "-".repeat(6), "-".repeat(6));
    println!("{}", sep.dimmed());
    println!(
        "| {:<3} | {:<15} | {:<40} | {:>4} | {:>4} |",
        "#", "Kind", "Lexeme", "Ln", "Col"
    );
    println!("{}", sep.dimmed());

    for (idx, token) in tokens.iter().enumerate() {
        println!(
            "| {} | {} | {} | {} | {} |",
            format!("{:>3}", idx + 1).dimmed(),
            format!("{:<15}", token.kind.describe()).cyan(),
            format!("{:<40}", display_lexeme(&token.lexeme)).green(),
            format!("{:>4}", token.span.line).yellow(),
            format!("{:>4}", token.span.column).yellow(),
        );
    }

    println!("{}", sep.dimmed());
}

fn print_summary(tokens: &[Token]) {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.kind.describe()).or_insert(0) += 1;
    }

    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!();
    println!("Token summary:");
    for (name, count) in entries {
        println!("  {name:<20} {count}");
    }
}
