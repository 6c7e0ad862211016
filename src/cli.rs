//! Command-line interface
//!
//! Subcommands:
//! - `lines`: print the line index of a file
//! - `tokens`: tokenize a file line by line
//! - `match`: find the bracket matching the one before a caret offset

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::DialectConfig;
use crate::lexer::TokenKind;
use crate::model::Document;

/// Inspect how pgedit sees a PostgreSQL script
#[derive(Parser, Debug)]
#[command(name = "pgedit", version, about = "Inspect the line and token structure of SQL scripts")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/pgedit/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the char range of every line
    Lines {
        file: PathBuf,
    },
    /// Print the tokens of every line
    Tokens {
        file: PathBuf,

        /// One JSON object per token
        #[arg(long)]
        json: bool,

        /// Leave comments out
        #[arg(long)]
        skip_comments: bool,
    },
    /// Print the range of the bracket matching the one before OFFSET
    Match {
        file: PathBuf,

        /// Caret position as a char offset
        offset: usize,
    },
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    line: usize,
    start: usize,
    end: usize,
    token: &'a TokenKind,
}

impl CliArgs {
    /// Resolve the dialect config: an explicit file must load, the default one may not
    pub fn dialect_config(&self) -> Result<DialectConfig> {
        match &self.config {
            Some(path) => DialectConfig::load_from(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(DialectConfig::load()),
        }
    }
}

/// Run the parsed command, writing its output to `out`
pub fn run(args: CliArgs, out: &mut impl Write) -> Result<()> {
    let mut config = args.dialect_config()?;

    match args.command {
        Command::Lines { file } => {
            let document = open(&file, &config)?;
            for (number, line) in document.line_index().lines().enumerate() {
                writeln!(out, "{:>5} {}..{}", number + 1, line.start(), line.end())?;
            }
        }
        Command::Tokens {
            file,
            json,
            skip_comments,
        } => {
            if skip_comments {
                config.emit_comments = false;
            }
            let document = open(&file, &config)?;
            for (number, line) in document.line_index().lines().enumerate() {
                let Some(tokens) = &line.info else {
                    writeln!(out, "{:>5} <unrecognized input>", number + 1)?;
                    continue;
                };
                for token in tokens {
                    let start = line.start() + token.range.start;
                    let end = line.start() + token.range.end;
                    if json {
                        let record = TokenRecord {
                            line: number + 1,
                            start,
                            end,
                            token: &token.kind,
                        };
                        writeln!(out, "{}", serde_json::to_string(&record)?)?;
                    } else {
                        writeln!(out, "{:>5} {}..{} {}", number + 1, start, end, token.kind)?;
                    }
                }
            }
        }
        Command::Match { file, offset } => {
            let document = open(&file, &config)?;
            anyhow::ensure!(
                offset <= document.len_chars(),
                "offset {} is past the end of {} ({} chars)",
                offset,
                file.display(),
                document.len_chars()
            );
            match document.matching_bracket_near(offset) {
                Some(range) => writeln!(out, "{}..{}", range.start, range.end)?,
                None => writeln!(out, "no match")?,
            }
        }
    }

    Ok(())
}

fn open(path: &Path, config: &DialectConfig) -> Result<Document> {
    let document = Document::from_file(path, config)
        .with_context(|| format!("reading {}", path.display()))?;
    let failed = document
        .line_index()
        .lines()
        .filter(|line| line.info.is_none())
        .count();
    if failed > 0 {
        tracing::warn!("{} line(s) of {} failed to tokenize", failed, path.display());
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens_command() {
        let args = CliArgs::parse_from(["pgedit", "tokens", "query.sql", "--json"]);
        match args.command {
            Command::Tokens {
                file,
                json,
                skip_comments,
            } => {
                assert_eq!(file, PathBuf::from("query.sql"));
                assert!(json);
                assert!(!skip_comments);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_match_command() {
        let args = CliArgs::parse_from(["pgedit", "match", "query.sql", "12"]);
        assert!(matches!(args.command, Command::Match { offset: 12, .. }));
    }

    #[test]
    fn test_match_requires_offset() {
        assert!(CliArgs::try_parse_from(["pgedit", "match", "query.sql"]).is_err());
    }
}
