use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::PathBuf,
};

/// Where the bulletin text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl Source {
    pub fn from_args(text: Vec<String>, file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => Source::File(path),
            None if text.is_empty() => Source::Stdin,
            None => Source::Inline(text.join(" ")),
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            Source::Inline(text) => Ok(text.clone()),
            Source::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read bulletin file: {}", path.display())),
            Source::Stdin if io::stdin().is_terminal() => {
                inquire::Text::new("Paste the TAF bulletin:")
                    .prompt()
                    .context("Failed to read bulletin from prompt")
            }
            Source::Stdin => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read bulletin from stdin")?;
                Ok(text)
            }
        }
    }
}
