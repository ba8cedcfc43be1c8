use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::error::{GenError, GenErrorKind};

pub const EXTENSION: &str = ".lox";

const SEPARATOR: &str = ": ";

#[derive(Debug, PartialEq, Clone)]
pub struct Fixture {
    pub name: String,
    /// Every line of the file, each terminated by `\n`.
    pub source: String,
    pub expected_values: Vec<String>,
    pub expected_error: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum Expectation<'a> {
    Values(&'a [String]),
    Error(&'a str),
    Nothing,
}

impl Fixture {
    /// Printed values take precedence over an expected error.
    pub fn expectation(&self) -> Expectation<'_> {
        if !self.expected_values.is_empty() {
            Expectation::Values(&self.expected_values)
        } else if let Some(error) = &self.expected_error {
            Expectation::Error(error)
        } else {
            Expectation::Nothing
        }
    }
}

pub struct Parser {
    error_re: Regex,
    expect_re: Regex,
}

impl Parser {
    pub fn new() -> Result<Parser> {
        Ok(Parser {
            error_re: Regex::new(r"(?i)error")?,
            expect_re: Regex::new(&regex::escape("// expect: "))?,
        })
    }

    pub fn parse_file(&self, path: &Path) -> Result<Fixture> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let name = match file_name.strip_suffix(EXTENSION) {
            Some(name) => name,
            None => {
                return Err(GenError::new(
                    GenErrorKind::InvalidExtension,
                    &format!(
                        "only {} files should be present in the input directory, found {}",
                        EXTENSION,
                        path.display()
                    ),
                )
                .into())
            }
        };

        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            lines.push(line.with_context(|| format!("reading {}", path.display()))?);
        }

        Ok(self.parse_lines(name, lines.iter().map(String::as_str)))
    }

    pub fn parse_lines<'a, I>(&self, name: &str, lines: I) -> Fixture
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fixture = Fixture {
            name: name.to_string(),
            source: String::new(),
            expected_values: Vec::new(),
            expected_error: None,
        };

        for line in lines {
            fixture.source.push_str(line);
            fixture.source.push('\n');

            // Some fixtures carry a second error comment meant for another
            // implementation, so only the first one counts.
            if fixture.expected_error.is_none() && self.error_re.is_match(line) {
                fixture.expected_error =
                    after_separator(line).filter(|error| !error.is_empty());
            }
            if self.expect_re.is_match(line) {
                if let Some(value) = after_separator(line) {
                    fixture.expected_values.push(value);
                }
            }
        }

        fixture
    }
}

fn after_separator(line: &str) -> Option<String> {
    line.split_once(SEPARATOR).map(|(_, rest)| rest.to_string())
}
