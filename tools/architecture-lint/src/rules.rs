//! Boundary rules for the school portal backend.
//!
//! Each rule is scoped to a module path prefix under `backend/src`. A file is
//! checked against every rule whose scope prefixes its module path, so
//! `outbound/memory/school_repository.rs` answers to both the `outbound` and
//! the `outbound::memory` rules.

/// A dependency restriction applied to every module under `scope`.
#[derive(Debug)]
pub(crate) struct BoundaryRule {
    pub(crate) scope: &'static [&'static str],
    /// Internal module path prefixes, relative to the crate root.
    pub(crate) forbidden_modules: &'static [&'static [&'static str]],
    /// External path prefixes; a single segment bans the whole crate.
    pub(crate) forbidden_externals: &'static [&'static [&'static str]],
}

impl BoundaryRule {
    pub(crate) fn applies_to(&self, module_path: &[String]) -> bool {
        starts_with(module_path, self.scope)
    }

    pub(crate) fn scope_name(&self) -> String {
        self.scope.join("::")
    }
}

const DIESEL: [&[&str]; 4] = [
    &["diesel"],
    &["diesel_async"],
    &["diesel_migrations"],
    &["bb8"],
];

pub(crate) const RULES: &[BoundaryRule] = &[
    BoundaryRule {
        scope: &["domain"],
        forbidden_modules: &[&["inbound"], &["outbound"], &["server"], &["middleware"]],
        forbidden_externals: &[
            &["actix_http"],
            &["actix_service"],
            &["actix_web"],
            &["actix_web_prom"],
            &["utoipa"],
            &["utoipa_swagger_ui"],
            DIESEL[0],
            DIESEL[1],
            DIESEL[2],
            DIESEL[3],
            &["argon2"],
            &["hmac"],
            &["sha2"],
            &["base64"],
            &["rand"],
            &["tokio", "task"],
        ],
    },
    BoundaryRule {
        scope: &["inbound"],
        forbidden_modules: &[&["outbound"], &["server"]],
        forbidden_externals: &[
            DIESEL[0],
            DIESEL[1],
            DIESEL[2],
            DIESEL[3],
            &["argon2"],
            &["hmac"],
        ],
    },
    BoundaryRule {
        scope: &["outbound"],
        forbidden_modules: &[&["inbound"], &["server"], &["middleware"]],
        forbidden_externals: &[
            &["actix_http"],
            &["actix_service"],
            &["actix_web"],
            &["utoipa"],
        ],
    },
    BoundaryRule {
        scope: &["outbound", "memory"],
        forbidden_modules: &[&["outbound", "persistence"], &["outbound", "security"]],
        forbidden_externals: &[
            DIESEL[0],
            DIESEL[1],
            DIESEL[2],
            DIESEL[3],
            &["argon2"],
            &["hmac"],
        ],
    },
    BoundaryRule {
        scope: &["outbound", "persistence"],
        forbidden_modules: &[&["outbound", "memory"], &["outbound", "security"]],
        forbidden_externals: &[&["argon2"], &["hmac"], &["sha2"]],
    },
    BoundaryRule {
        scope: &["outbound", "security"],
        forbidden_modules: &[&["outbound", "memory"], &["outbound", "persistence"]],
        forbidden_externals: &DIESEL,
    },
];

/// Rules covering the given module path, outermost scope first.
pub(crate) fn rules_for(module_path: &[String]) -> Vec<&'static BoundaryRule> {
    RULES
        .iter()
        .filter(|rule| rule.applies_to(module_path))
        .collect()
}

pub(crate) fn starts_with(path: &[String], prefix: &[&str]) -> bool {
    path.len() >= prefix.len()
        && path
            .iter()
            .zip(prefix)
            .all(|(segment, expected)| segment == expected)
}
