//! Boundary representation of the host's lexical scope chain.
//!
//! A [`ScopeChain`] is a flat arena of scopes with upward links, mirroring
//! the shape scope managers expose: each scope carries the names bound
//! directly in it plus a link to its enclosing scope (absent at the
//! global root).

/// Index of a scope within a [`ScopeChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// The kind of a lexical scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The outermost (global) scope.
    Global,

    /// The module ("Program") scope nested directly inside the global
    /// scope for module files.
    Module,

    /// A function body scope.
    Function,

    /// A block scope.
    Block,
}

#[derive(Debug, Clone)]
struct ScopeData {
    kind: ScopeKind,
    parent: Option<ScopeId>,
    bindings: Vec<String>,
}

/// A lexical scope chain: global scope at the root, nested scopes below.
#[derive(Debug, Clone)]
pub struct ScopeChain {
    scopes: Vec<ScopeData>,
}

impl ScopeChain {
    /// Create a chain containing only the global scope.
    pub fn new() -> Self {
        ScopeChain {
            scopes: vec![ScopeData {
                kind: ScopeKind::Global,
                parent: None,
                bindings: Vec::new(),
            }],
        }
    }

    /// The global scope.
    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Append a scope under `parent`.
    pub fn push(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(ScopeData {
            kind,
            parent: Some(parent),
            bindings: Vec::new(),
        });
        id
    }

    /// Bind a name directly in `scope`.
    pub fn bind(&mut self, scope: ScopeId, name: impl Into<String>) {
        self.scopes[scope.0].bindings.push(name.into());
    }

    /// The kind of a scope.
    pub fn kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.0].kind
    }

    /// The enclosing scope, absent at the global root.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }

    /// The names bound directly in `scope`.
    pub fn bindings(&self, scope: ScopeId) -> &[String] {
        &self.scopes[scope.0].bindings
    }

    /// The module scope, if the chain has one directly under the global
    /// scope. Present for module files (CJS and ESM alike).
    pub fn module_scope(&self) -> Option<ScopeId> {
        (1..self.scopes.len())
            .map(ScopeId)
            .find(|id| self.parent(*id) == Some(self.global()) && self.kind(*id) == ScopeKind::Module)
    }

    /// Names visible from `scope` by walking the chain upward, innermost
    /// first.
    pub fn names_from(&self, scope: ScopeId) -> impl Iterator<Item = &str> {
        let mut current = Some(scope);
        std::iter::from_fn(move || {
            let id = current?;
            current = self.parent(id);
            Some(self.bindings(id).iter().map(String::as_str))
        })
        .flatten()
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}
