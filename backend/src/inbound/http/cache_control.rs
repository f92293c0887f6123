//! Shared cache-control policies for HTTP handlers.

/// School-scoped responses must never be stored by shared or private caches.
pub const PRIVATE_NO_STORE: &str = "private, no-store";

/// Probe responses are always fresh.
pub const NO_STORE: &str = "no-store";

/// Build the cache-control header tuple for school-scoped responses.
pub const fn private_no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_STORE)
}
