//! Input selection.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// Which payload shape the input holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// A `chat.completion` response body.
    Completion,
    /// A `chat.completion.chunk` stream event.
    Chunk,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completion => f.write_str("completion"),
            Self::Chunk => f.write_str("chunk"),
        }
    }
}

/// Where documents are read from and how they are split.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct InputConfig {
    /// Payload kind of every document in the input.
    #[arg(long, value_enum, env = "FLEXJSON_KIND", default_value_t = PayloadKind::Completion)]
    pub kind: PayloadKind,

    /// Treat each non-blank line as a separate document. A leading `data:`
    /// is stripped and `[DONE]` lines are skipped.
    #[arg(long, env = "FLEXJSON_LINES")]
    #[serde(default)]
    pub lines: bool,

    /// Input file. Reads stdin when absent or `-`.
    #[arg(value_name = "INPUT")]
    pub path: Option<PathBuf>,
}

impl InputConfig {
    /// Returns `true` when input comes from stdin.
    pub fn is_stdin(&self) -> bool {
        self.path
            .as_ref()
            .is_none_or(|path| path.as_os_str() == "-")
    }

    /// Human-readable input name for logs.
    pub fn display_name(&self) -> String {
        match &self.path {
            Some(path) if !self.is_stdin() => path.display().to_string(),
            _ => "<stdin>".to_string(),
        }
    }

    /// Opens the input for buffered reading.
    pub fn open(&self) -> anyhow::Result<Box<dyn BufRead>> {
        match &self.path {
            Some(path) if !self.is_stdin() => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open input {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            _ => Ok(Box::new(BufReader::new(io::stdin()))),
        }
    }
}
