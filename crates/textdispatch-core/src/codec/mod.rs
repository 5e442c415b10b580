//! Compact token catalog.
//!
//! A [`TokenCatalog`] assigns every action token of a handler a small
//! integer identifier, in declaration order, so command streams can be stored
//! or transmitted as ids and decoded back to tokens. Sinks have no fixed token
//! and therefore no id.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::compile::partition;
use crate::descriptor::MethodDescriptor;
use crate::error::{CodecError, CompileError};

/// Largest number of tokens one catalog can hold: one per [`CatalogId`].
pub const MAX_CATALOG_ENTRIES: usize = 1 << u16::BITS;

/// Identifier issued by a [`TokenCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CatalogId(u16);

impl CatalogId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the identifier as a catalog position.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Catalog identifier.
    pub id: CatalogId,
    /// Declared method name.
    pub method: String,
    /// Token the method answers to.
    pub token: String,
}

/// Bidirectional mapping between action tokens and [`CatalogId`]s.
///
/// # Example
///
/// ```
/// use textdispatch_core::{MethodDescriptor, TokenCatalog};
///
/// struct Machine;
///
/// let methods = vec![
///     MethodDescriptor::<Machine>::action("left", |_| {}).alias("<"),
///     MethodDescriptor::<Machine>::action("right", |_| {}).alias(">"),
/// ];
/// let catalog = TokenCatalog::compile(&methods)?;
/// let id = catalog.encode(">")?;
/// assert_eq!(id.get(), 1);
/// assert_eq!(catalog.decode(id)?, ">");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, CatalogId>,
}

impl TokenCatalog {
    /// Compiles a catalog from a handler's method set.
    ///
    /// Validation is shared with
    /// [`DispatchTable::compile`](crate::DispatchTable::compile), so a method
    /// set either yields both artefacts or neither.
    ///
    /// # Errors
    ///
    /// Returns the same [`CompileError`] the dispatch table would, including
    /// [`CompileError::CatalogOverflow`] when the actions outnumber the ids.
    pub fn compile<H>(methods: &[MethodDescriptor<H>]) -> Result<Self, CompileError> {
        let partition = partition(methods)?;
        Ok(Self::from_entries(partition.actions.into_iter().map(
            |action| CatalogEntry {
                id: action.id,
                method: action.method,
                token: action.token,
            },
        )))
    }

    /// Builds a catalog from entries whose ids were assigned during
    /// partitioning.
    pub(crate) fn from_entries(rows: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let entries: Vec<CatalogEntry> = rows.into_iter().collect();
        let index = entries
            .iter()
            .map(|entry| (entry.token.clone(), entry.id))
            .collect();
        Self { entries, index }
    }

    /// Encodes an action token.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownToken`] when `token` is not an action
    /// token of this catalog. Tokens a sink would accept are not encodable.
    pub fn encode(&self, token: &str) -> Result<CatalogId, CodecError> {
        self.index
            .get(token)
            .copied()
            .ok_or_else(|| CodecError::unknown_token(token))
    }

    /// Decodes an identifier back to its token.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownId`] when `id` was not issued by this
    /// catalog.
    pub fn decode(&self, id: CatalogId) -> Result<&str, CodecError> {
        self.entries
            .get(id.index())
            .map(|entry| entry.token.as_str())
            .ok_or(CodecError::UnknownId { id })
    }

    /// Returns the identifier at catalog position `position`.
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<CatalogId> {
        self.entries.get(position).map(|entry| entry.id)
    }

    /// Returns the catalog rows in identifier order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Returns the number of encodable tokens.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no token is encodable.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
