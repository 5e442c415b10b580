//! Token resolution for dispatchable actions.
//!
//! An action answers to its declared alias when one is present, otherwise to
//! its own name. Tokens are used verbatim: no case folding, no trimming.

use std::collections::HashMap;

use crate::descriptor::MethodDescriptor;
use crate::error::CompileError;

/// Returns the token a method answers to.
///
/// # Example
///
/// ```
/// use textdispatch_core::{MethodDescriptor, resolve_token};
///
/// struct Stack;
///
/// let plus = MethodDescriptor::<Stack>::action("plus", |_| {}).alias("+");
/// let dup = MethodDescriptor::<Stack>::action("dup", |_| {});
/// assert_eq!(resolve_token(&plus), "+");
/// assert_eq!(resolve_token(&dup), "dup");
/// ```
#[must_use]
pub fn resolve_token<H>(method: &MethodDescriptor<H>) -> &str {
    method.declared_alias().unwrap_or_else(|| method.name())
}

/// Tracks the tokens claimed so far during one compilation.
#[derive(Debug, Default)]
pub struct TokenResolver {
    claimed: HashMap<String, String>,
}

impl TokenResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves and claims the token for `method`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::DuplicateToken`] when another method already
    /// claimed the same token.
    pub fn claim<'m, H>(
        &mut self,
        method: &'m MethodDescriptor<H>,
    ) -> Result<&'m str, CompileError> {
        let token = resolve_token(method);
        if let Some(first) = self.claimed.get(token) {
            return Err(CompileError::duplicate_token(token, first, method.name()));
        }
        self.claimed.insert(token.to_owned(), method.name().to_owned());
        Ok(token)
    }

    /// Returns the number of claimed tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Returns `true` when no token has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
