use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

use crate::config::{Options, TargetApi};
use crate::emitter::Emitter;
use crate::error::{GenError, GenErrorKind};
use crate::fixture::{Expectation, Parser};
use crate::ident::to_ident;
use crate::scanner::{self, Entry, Scan};

#[derive(Debug, PartialEq, Default)]
pub struct Summary {
    pub modules: usize,
    pub tests: usize,
    pub skipped: usize,
}

/// Scans the fixture root and regenerates the whole output file.
pub fn run(options: &Options) -> Result<Summary> {
    log::info!(
        "generating {} from {}",
        options.output_file.display(),
        options.fixtures_dir.display()
    );

    let scan = scanner::scan(&options.fixtures_dir, &options.directories)?;

    let file = File::create(&options.output_file)
        .with_context(|| format!("creating {}", options.output_file.display()))?;
    let mut out = BufWriter::new(file);
    let summary = generate(&scan, &options.target, &mut out)
        .with_context(|| format!("writing {}", options.output_file.display()))?;
    out.flush()
        .with_context(|| format!("writing {}", options.output_file.display()))?;

    Ok(summary)
}

pub fn generate<W: Write>(scan: &Scan, target: &TargetApi, out: &mut W) -> Result<Summary> {
    let parser = Parser::new()?;
    let mut emitter = Emitter::new(out, target);
    let mut summary = Summary {
        skipped: scan.skipped.len(),
        ..Summary::default()
    };

    emitter.write_preamble()?;

    summary.tests += write_tests(&parser, &mut emitter, &scan.loose_files, 1)?;

    let mut module_idents = HashSet::new();
    for module in &scan.modules {
        let ident = to_ident(&module.name);
        if !module_idents.insert(ident.clone()) {
            return Err(duplicate(&ident, &module.name));
        }

        log::info!("writing module {} ({} fixtures)", ident, module.files.len());
        emitter.begin_module(&ident, 1)?;
        summary.tests += write_tests(&parser, &mut emitter, &module.files, 2)?;
        emitter.end_module(1)?;
        summary.modules += 1;
    }

    emitter.write_closing()?;
    Ok(summary)
}

fn write_tests<W: Write>(
    parser: &Parser,
    emitter: &mut Emitter<'_, W>,
    files: &[Entry],
    indentation: usize,
) -> Result<usize> {
    let mut idents = HashSet::new();
    for entry in files {
        let fixture = parser.parse_file(&entry.path)?;
        let ident = to_ident(&fixture.name);
        if !idents.insert(ident.clone()) {
            return Err(duplicate(&ident, &entry.path.display().to_string()));
        }

        match fixture.expectation() {
            Expectation::Values(values) => {
                log::debug!("creating {} ({} expected values)", ident, values.len())
            }
            Expectation::Error(_) => log::debug!("creating {} (expected error)", ident),
            Expectation::Nothing => log::debug!("creating {} (no assertions)", ident),
        }
        emitter.write_test(&ident, &fixture, indentation)?;
    }
    Ok(files.len())
}

fn duplicate(ident: &str, source: &str) -> anyhow::Error {
    GenError::new(
        GenErrorKind::DuplicateTest,
        &format!("{} maps to `{}`, which is already taken", source, ident),
    )
    .into()
}
