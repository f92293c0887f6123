//! Behaviour tests running the lint over a small portal backend on disk.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use architecture_lint::{ArchitectureLintError, Violation};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

/// One file per layer and adapter family, each importing only what its
/// boundary allows.
const PORTAL_FILES: [(&str, &str); 6] = [
    (
        "domain/school.rs",
        "use crate::domain::ports::SchoolRepository;\n\
         pub struct ReferCode(String);\n\
         impl ReferCode { pub fn as_str(&self) -> &str { &self.0 } }\n",
    ),
    (
        "domain/ports/school_repository.rs",
        "use async_trait::async_trait;\n\
         use super::super::school::ReferCode;\n\
         #[async_trait]\n\
         pub trait SchoolRepository { async fn exists(&self, code: &ReferCode) -> bool; }\n",
    ),
    (
        "inbound/http/schools.rs",
        "use actix_web::{HttpResponse, web};\n\
         use crate::domain::ports::SchoolRepository;\n\
         pub async fn dashboard() -> HttpResponse { HttpResponse::Ok().finish() }\n",
    ),
    (
        "outbound/persistence/diesel_school_repository.rs",
        "use diesel::prelude::*;\n\
         use diesel_async::RunQueryDsl;\n\
         use super::pool::DbPool;\n\
         use crate::domain::ports::SchoolRepository;\n",
    ),
    (
        "outbound/memory/school_repository.rs",
        "use tokio::sync::RwLock;\n\
         use crate::domain::ports::SchoolRepository;\n\
         pub struct InMemorySchoolRepository { rows: RwLock<Vec<String>> }\n",
    ),
    (
        "outbound/security/token_codec.rs",
        "use hmac::{Hmac, Mac};\n\
         use sha2::Sha256;\n\
         use crate::domain::SessionClaims;\n\
         type HmacSha256 = Hmac<Sha256>;\n",
    ),
];

struct GuardrailWorld {
    backend: TempDir,
    outcome: RefCell<Option<Result<usize, ArchitectureLintError>>>,
}

impl GuardrailWorld {
    fn new() -> Self {
        Self {
            backend: TempDir::new().expect("temporary backend"),
            outcome: RefCell::new(None),
        }
    }

    fn src(&self) -> PathBuf {
        self.backend.path().join("src")
    }

    fn write(&self, file: &str, contents: &str) {
        let path = self.src().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create module directories");
        }
        fs::write(path, contents).expect("write module");
    }

    fn import_into(&self, file: &str, import: &str) {
        let existing = fs::read_to_string(self.src().join(file)).unwrap_or_default();
        self.write(file, &format!("use {import};\n{existing}"));
    }

    fn run(&self) {
        let result = architecture_lint::lint_backend_sources(self.backend.path());
        self.outcome.replace(Some(result));
    }

    fn violations(&self) -> Vec<Violation> {
        match self.outcome.borrow().as_ref().expect("lint must have run") {
            Err(ArchitectureLintError::Violations(violations)) => violations.clone(),
            other => panic!("expected boundary violations, got {other:?}"),
        }
    }
}

#[fixture]
fn world() -> GuardrailWorld {
    GuardrailWorld::new()
}

#[given("a well-layered portal backend")]
fn a_well_layered_portal_backend(world: &GuardrailWorld) {
    for (file, contents) in PORTAL_FILES {
        world.write(file, contents);
    }
}

#[given("{file} also imports {import}")]
fn file_also_imports(world: &GuardrailWorld, file: String, import: String) {
    world.import_into(&file, &import);
}

#[given("the backend sources are missing")]
fn the_backend_sources_are_missing(world: &GuardrailWorld) {
    fs::remove_dir_all(world.src()).expect("remove sources");
}

#[when("the architecture lint runs")]
fn the_architecture_lint_runs(world: &GuardrailWorld) {
    world.run();
}

#[then("the lint passes having checked {count} files")]
fn the_lint_passes(world: &GuardrailWorld, count: usize) {
    let outcome = world.outcome.borrow();
    match outcome.as_ref().expect("lint must have run") {
        Ok(checked) => assert_eq!(*checked, count),
        Err(err) => panic!("expected a clean tree, got: {err}"),
    }
}

#[then("{file} breaches {boundary}")]
fn file_breaches(world: &GuardrailWorld, file: String, boundary: String) {
    let violations = world.violations();
    let expected_file = PathBuf::from(&file);
    assert!(
        violations
            .iter()
            .any(|violation| violation.file == expected_file
                && violation.crossed.to_string().ends_with(boundary.as_str())),
        "expected {file} to breach {boundary}, got: {violations:?}"
    );
}

#[then("{count} violations are reported")]
fn violations_are_reported(world: &GuardrailWorld, count: usize) {
    assert_eq!(world.violations().len(), count);
}

#[then("the lint cannot read the sources")]
fn the_lint_cannot_read_the_sources(world: &GuardrailWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref().expect("lint must have run"),
        Err(ArchitectureLintError::Io(_))
    ));
}

#[scenario(path = "tests/features/architecture_guardrails.feature")]
fn portal_boundary_guardrails(world: GuardrailWorld) {
    let _ = world;
}
