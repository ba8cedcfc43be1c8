use std::fmt::Formatter;

#[derive(Debug, PartialEq)]
pub enum GenErrorKind {
    InvalidExtension,
    InvalidFileName,
    DuplicateTest,
}

#[derive(Debug, PartialEq)]
pub struct GenError {
    pub kind: GenErrorKind,
    pub message: String,
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GenError {}

impl GenError {
    pub fn new(kind: GenErrorKind, message: &str) -> GenError {
        GenError {
            kind,
            message: message.to_string(),
        }
    }
}
