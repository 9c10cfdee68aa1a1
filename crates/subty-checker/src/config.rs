//! Settings shared by every judgment of one checker instance.

/// How literal expressions are typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiteralPolicy {
    /// `1` synthesizes the singleton type `1`.
    #[default]
    Singleton,
    /// `1` synthesizes `number`.
    Primitive,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub literals: LiteralPolicy,
    /// Maximum nesting of `synth`/`check` calls.
    pub max_depth: usize,
    /// Maximum number of branch combinations a single union-distributed evaluation may visit.
    pub max_branches: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            literals: LiteralPolicy::default(),
            max_depth: 128,
            max_branches: 4096,
        }
    }
}

impl Config {
    pub fn with_literals(mut self, literals: LiteralPolicy) -> Self {
        self.literals = literals;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_branches(mut self, max_branches: usize) -> Self {
        self.max_branches = max_branches;
        self
    }
}
