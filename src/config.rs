use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_FIXTURES_DIR: &str = "./test/";
pub const DEFAULT_OUTPUT_FILE: &str = "./tests.rs";

// Directories generated by default; everything else in the fixture root is skipped.
const DEFAULT_INCLUDED_DIRS: [&str; 6] = ["assignment", "block", "bool", "comments", "print", "string"];

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Inclusion {
    Include,
    Exclude,
}

/// Maps fixture subdirectory names to whether they get a generated module.
/// Names missing from the table fall back to `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryTable {
    rules: BTreeMap<String, Inclusion>,
    default: Inclusion,
}

impl DirectoryTable {
    pub fn allow_list<I, S>(names: I) -> DirectoryTable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DirectoryTable::with_rule(names, Inclusion::Include, Inclusion::Exclude)
    }

    pub fn deny_list<I, S>(names: I) -> DirectoryTable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DirectoryTable::with_rule(names, Inclusion::Exclude, Inclusion::Include)
    }

    fn with_rule<I, S>(names: I, rule: Inclusion, default: Inclusion) -> DirectoryTable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DirectoryTable {
            rules: names.into_iter().map(|name| (name.into(), rule)).collect(),
            default,
        }
    }

    pub fn inclusion(&self, name: &str) -> Inclusion {
        self.rules.get(name).copied().unwrap_or(self.default)
    }

    pub fn is_included(&self, name: &str) -> bool {
        self.inclusion(name) == Inclusion::Include
    }
}

impl Default for DirectoryTable {
    fn default() -> DirectoryTable {
        DirectoryTable::allow_list(DEFAULT_INCLUDED_DIRS)
    }
}

/// The surface of the interpreter that generated tests call into.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetApi {
    pub imports: Vec<String>,
    pub result_type: String,
    pub constructor: String,
    pub printed_values: String,
    pub latest_error: String,
}

impl Default for TargetApi {
    fn default() -> TargetApi {
        TargetApi {
            imports: vec!["super::*".to_string(), "crate::value::Value".to_string()],
            result_type: "VMResult".to_string(),
            constructor: "VM::init()".to_string(),
            printed_values: "printed_values".to_string(),
            latest_error: "latest_error_message".to_string(),
        }
    }
}

pub struct Options {
    pub fixtures_dir: PathBuf,
    pub output_file: PathBuf,
    pub directories: DirectoryTable,
    pub target: TargetApi,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            directories: DirectoryTable::default(),
            target: TargetApi::default(),
        }
    }
}
