//! Caller identity used to stamp `created_by` / `modified_by`.

/// Resolves the principal on whose behalf the store is mutated.
pub trait PrincipalProvider: Send + Sync {
    fn current_principal(&self) -> String;
}

/// Fixed principal, taken from configuration.
#[derive(Clone, Debug)]
pub struct StaticPrincipal(String);

impl StaticPrincipal {
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }
}

impl Default for StaticPrincipal {
    fn default() -> Self { Self::new("DUMMY_USER") }
}

impl PrincipalProvider for StaticPrincipal {
    fn current_principal(&self) -> String { self.0.clone() }
}
