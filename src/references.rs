//! References
//!
//! Relations between catalog documents are either populated with the related document or hold
//! only its identifier. Stores hand out one or the other depending on how deep they load.

use serde::{Deserialize, Serialize};

/// A relation to another document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T, Id> {
    /// The related document was loaded.
    Populated(T),

    /// Only the identifier of the related document is known.
    Unresolved(Id),
}

impl<T, Id> Reference<T, Id> {
    /// The populated document, if loaded.
    pub fn populated(&self) -> Option<&T> {
        match self {
            Self::Populated(document) => Some(document),
            Self::Unresolved(_) => None,
        }
    }

    /// Take the populated document, if loaded.
    pub fn into_populated(self) -> Option<T> {
        match self {
            Self::Populated(document) => Some(document),
            Self::Unresolved(_) => None,
        }
    }

    /// Whether the related document was loaded.
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated(_))
    }

    /// Resolve an identifier into its document with `load`, keeping populated documents.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `load`.
    pub fn normalize<E, F>(self, load: F) -> Result<Option<T>, E>
    where
        F: FnOnce(Id) -> Result<Option<T>, E>,
    {
        match self {
            Self::Populated(document) => Ok(Some(document)),
            Self::Unresolved(id) => load(id),
        }
    }
}

impl<T, Id> From<T> for Reference<T, Id> {
    fn from(document: T) -> Self {
        Self::Populated(document)
    }
}
