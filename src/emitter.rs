use std::io::{self, Write};

use crate::config::TargetApi;
use crate::fixture::{Expectation, Fixture};

const INDENT: &str = "    ";

/// Writes the generated test file piece by piece into `out`.
pub struct Emitter<'a, W: Write> {
    out: &'a mut W,
    target: &'a TargetApi,
}

impl<'a, W: Write> Emitter<'a, W> {
    pub fn new(out: &'a mut W, target: &'a TargetApi) -> Emitter<'a, W> {
        Emitter { out, target }
    }

    fn write_line(&mut self, text: &str, indentation: usize) -> io::Result<()> {
        writeln!(self.out, "{}{}", INDENT.repeat(indentation), text)
    }

    pub fn write_preamble(&mut self) -> io::Result<()> {
        self.write_line("#[cfg(test)]", 0)?;
        self.write_line("mod tests {", 0)?;
        let target = self.target;
        for import in &target.imports {
            self.write_line(&format!("use {};", import), 1)?;
        }
        Ok(())
    }

    pub fn begin_module(&mut self, ident: &str, indentation: usize) -> io::Result<()> {
        writeln!(self.out)?;
        self.write_line(&format!("mod {} {{", ident), indentation)?;
        self.write_line("use super::*;", indentation + 1)
    }

    pub fn end_module(&mut self, indentation: usize) -> io::Result<()> {
        self.write_line("}", indentation)
    }

    pub fn write_closing(&mut self) -> io::Result<()> {
        self.end_module(0)
    }

    pub fn write_test(
        &mut self,
        ident: &str,
        fixture: &Fixture,
        indentation: usize,
    ) -> io::Result<()> {
        let body = indentation + 1;

        writeln!(self.out)?;
        self.write_line("#[test]", indentation)?;
        self.write_line(
            &format!("fn {}() -> {} {{", ident, self.target.result_type),
            indentation,
        )?;

        let hashes = "#".repeat(raw_hashes(&fixture.source));
        self.write_line(&format!("let source = r{}\"", hashes), body)?;
        write!(self.out, "{}", fixture.source)?;
        self.write_line(&format!("\"{}", hashes), 0)?;
        self.write_line(".to_string();", body)?;
        self.write_line(&format!("let mut vm = {};", self.target.constructor), body)?;

        match fixture.expectation() {
            Expectation::Values(values) => {
                self.write_line("vm.interpret(source)?;", body)?;
                // Printed values are popped off the end, so assert the last one first.
                for value in values.iter().rev() {
                    self.write_line("assert_eq!(", body)?;
                    self.write_line(&format!("{:?}.to_string(),", value), body + 1)?;
                    self.write_line(
                        &format!("vm.{}.pop().unwrap().to_string()", self.target.printed_values),
                        body + 1,
                    )?;
                    self.write_line(");", body)?;
                }
            }
            Expectation::Error(error) => {
                self.write_line("let _ = vm.interpret(source);", body)?;
                self.write_line("assert_eq!(", body)?;
                self.write_line(&format!("{:?},", error), body + 1)?;
                self.write_line(&format!("vm.{}", self.target.latest_error), body + 1)?;
                self.write_line(");", body)?;
            }
            Expectation::Nothing => {}
        }

        self.write_line("Ok(())", body)?;
        self.write_line("}", indentation)
    }
}

/// Number of `#` needed so the raw string literal can hold `source`.
fn raw_hashes(source: &str) -> usize {
    let mut hashes = 1;
    while source.contains(&format!("\"{}", "#".repeat(hashes))) {
        hashes += 1;
    }
    hashes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(source: &str, values: &[&str], error: Option<&str>) -> Fixture {
        Fixture {
            name: "sample".to_string(),
            source: source.to_string(),
            expected_values: values.iter().map(|v| v.to_string()).collect(),
            expected_error: error.map(str::to_string),
        }
    }

    fn emit(fixture: &Fixture) -> String {
        let target = TargetApi::default();
        let mut out = Vec::new();
        Emitter::new(&mut out, &target)
            .write_test("sample", fixture, 1)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn values_are_asserted_in_reverse() {
        let out = emit(&fixture(
            "print 1; // expect: 1\nprint 2; // expect: 2\n",
            &["1", "2"],
            None,
        ));
        assert_eq!(
            out,
            r##"
    #[test]
    fn sample() -> VMResult {
        let source = r#"
print 1; // expect: 1
print 2; // expect: 2
"#
        .to_string();
        let mut vm = VM::init();
        vm.interpret(source)?;
        assert_eq!(
            "2".to_string(),
            vm.printed_values.pop().unwrap().to_string()
        );
        assert_eq!(
            "1".to_string(),
            vm.printed_values.pop().unwrap().to_string()
        );
        Ok(())
    }
"##
        );
    }

    #[test]
    fn error_is_asserted() {
        let out = emit(&fixture(
            "// Error: Unexpected character.\n",
            &[],
            Some("Unexpected character."),
        ));
        assert!(out.contains(
            "        let _ = vm.interpret(source);\n        assert_eq!(\n            \"Unexpected character.\",\n            vm.latest_error_message\n        );\n"
        ));
        assert!(!out.contains("?;"));
    }

    #[test]
    fn no_expectation_only_constructs() {
        let out = emit(&fixture("var a;\n", &[], None));
        assert!(out.contains("        let mut vm = VM::init();\n        Ok(())\n    }\n"));
        assert!(!out.contains("interpret"));
        assert!(!out.contains("assert_eq!"));
    }

    #[test]
    fn strings_are_escaped() {
        let out = emit(&fixture("", &["a \"quoted\" \\ value"], None));
        assert!(out.contains(r#""a \"quoted\" \\ value".to_string(),"#));
    }

    #[test]
    fn raw_string_delimiter_grows() {
        assert_eq!(raw_hashes("print \"a\";"), 1);
        assert_eq!(raw_hashes("print \"#\";"), 2);
        assert_eq!(raw_hashes("\"## and \"#"), 3);

        let out = emit(&fixture("print \"#\";\n", &[], None));
        assert!(out.contains("let source = r##\"\nprint \"#\";\n\"##\n"));
    }

    #[test]
    fn preamble_and_modules() {
        let target = TargetApi::default();
        let mut out = Vec::new();
        let mut emitter = Emitter::new(&mut out, &target);
        emitter.write_preamble().unwrap();
        emitter.begin_module("print", 1).unwrap();
        emitter.end_module(1).unwrap();
        emitter.write_closing().unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#[cfg(test)]\nmod tests {\n    use super::*;\n    use crate::value::Value;\n\n    mod print {\n        use super::*;\n    }\n}\n"
        );
    }
}
