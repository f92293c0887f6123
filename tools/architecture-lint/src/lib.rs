//! Repo-local architecture lint for the school portal backend.
//!
//! The backend is a hexagonal monolith. `domain` owns the use cases and the
//! port traits, `inbound::http` drives them, and `outbound` holds three
//! adapter families implementing the driven ports:
//!
//! - `outbound::persistence`: Diesel repositories and migrations;
//! - `outbound::memory`: the database-free repositories;
//! - `outbound::security`: Argon2 hashing and the session token codec.
//!
//! Every file under those layers is parsed with `syn`. Each path it mentions
//! is resolved against the file's own module (`super` and `self` included),
//! then checked against the boundary table in `rules.rs`. Adapter families
//! are siblings: none may import another, and each keeps its own
//! infrastructure crates to itself.
//!
//! Run it with `cargo run -p architecture-lint`, optionally passing the
//! backend directory.

mod paths;
mod rules;

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

use paths::{Reference, ReferenceCollector, module_path};
use rules::{BoundaryRule, rules_for, starts_with};

/// Directories under `backend/src` the lint walks.
const LINTED_LAYERS: [&str; 3] = ["domain", "inbound", "outbound"];

/// What a file reached for across its boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Crossing {
    /// A backend module, as a `::`-joined path from the crate root.
    Module(String),
    /// An external crate or crate path, such as `tokio::task`.
    External(String),
}

impl fmt::Display for Crossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(path) => write!(f, "crate::{path}"),
            Self::External(path) => write!(f, "external `{path}`"),
        }
    }
}

/// A file depending on something its module scope forbids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Offending file, relative to `backend/src`.
    pub file: PathBuf,
    /// Scope of the broken rule, such as `outbound::memory`.
    pub scope: String,
    /// The forbidden module or crate it reached.
    pub crossed: Crossing,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: `{}` must not depend on {}",
            self.file.display(),
            self.scope,
            self.crossed
        )
    }
}

/// Reasons the lint could not pass a backend tree.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// The sources could not be listed or read.
    Io(io::Error),
    /// A file is not valid Rust.
    Parse { file: PathBuf, source: syn::Error },
    /// A file sits outside every boundary rule.
    UncoveredFile(PathBuf),
    /// Every boundary violation found, in file order.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "architecture lint could not read sources: {err}"),
            Self::Parse { file, source } => {
                write!(f, "{} is not valid Rust: {source}", file.display())
            }
            Self::UncoveredFile(file) => write!(
                f,
                "{} is outside the domain, inbound and outbound layers",
                file.display()
            ),
            Self::Violations(found) => {
                writeln!(f, "{} boundary violation(s):", found.len())?;
                found
                    .iter()
                    .try_for_each(|violation| writeln!(f, "  {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { source, .. } => Some(source),
            Self::UncoveredFile(_) | Self::Violations(_) => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// One backend file, by path and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Location under `backend/src`, which decides the rules applied.
    pub file: PathBuf,
    /// Full source text.
    pub contents: String,
}

/// Lint the backend crate rooted at `backend_dir`.
///
/// Returns the number of files checked.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<usize, ArchitectureLintError> {
    let sources = collect_lint_sources(&backend_dir.join("src"))?;
    lint_sources(&sources)?;
    Ok(sources.len())
}

/// Lint in-memory sources, reporting every violation across all of them.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut found = Vec::new();
    for source in sources {
        found.extend(check_source(source)?);
    }
    if found.is_empty() {
        return Ok(());
    }
    Err(ArchitectureLintError::Violations(found))
}

fn check_source(source: &LintSource) -> Result<Vec<Violation>, ArchitectureLintError> {
    let module = module_path(&source.file);
    let rules = rules_for(&module);
    if rules.is_empty() {
        return Err(ArchitectureLintError::UncoveredFile(source.file.clone()));
    }

    let syntax = syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
        file: source.file.clone(),
        source: err,
    })?;
    let mut collector = ReferenceCollector::new(module);
    collector.visit_file(&syntax);

    let breaches: BTreeSet<(String, Crossing)> = collector
        .into_references()
        .iter()
        .flat_map(|reference| rules.iter().filter_map(move |rule| breach(rule, reference)))
        .collect();
    Ok(breaches
        .into_iter()
        .map(|(scope, crossed)| Violation {
            file: source.file.clone(),
            scope,
            crossed,
        })
        .collect())
}

/// The scope and crossing if `reference` breaks `rule`.
fn breach(rule: &BoundaryRule, reference: &Reference) -> Option<(String, Crossing)> {
    let crossed = match reference {
        Reference::Internal(path) => rule
            .forbidden_modules
            .iter()
            .find(|prefix| starts_with(path, prefix))
            .map(|prefix| Crossing::Module(prefix.join("::"))),
        Reference::External(path) => rule
            .forbidden_externals
            .iter()
            .find(|prefix| starts_with(path, prefix))
            .map(|prefix| Crossing::External(prefix.join("::"))),
    }?;
    Some((rule.scope_name(), crossed))
}

fn collect_lint_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    // A missing `src` means the wrong directory, not a clean tree.
    fs::metadata(src_dir)?;
    let mut sources = Vec::new();
    for layer in LINTED_LAYERS {
        let dir = src_dir.join(layer);
        if dir.is_dir() {
            walk_rust_files(src_dir, &dir, &mut sources)?;
        }
    }
    sources.sort_by(|left, right| left.file.cmp(&right.file));
    Ok(sources)
}

fn walk_rust_files(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_rust_files(src_root, &path, sources)?;
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        let Ok(file) = path.strip_prefix(src_root).map(Path::to_path_buf) else {
            return Err(ArchitectureLintError::UncoveredFile(path));
        };
        sources.push(LintSource {
            contents: fs::read_to_string(&path)?,
            file,
        });
    }
    Ok(())
}
