use std::error::Error;
use std::fmt;

use super::breaker::ComponentKind;

/// Errors surfaced by engine operations.
///
/// All failures are local validation: the operation is aborted and the engine
/// state is left unchanged. Nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// An index into loads, sources, or the fault set was out of bounds.
    InvalidIndex {
        /// What the index was selecting into (e.g. `"loads"`).
        collection: &'static str,
        /// The offending index.
        index: usize,
        /// Current length of the collection.
        len: usize,
    },
    /// A fault-injection selector that names neither a load nor a source.
    MalformedSelector(String),
    /// A component name already registered under the same kind.
    DuplicateRegistration {
        /// Kind of the colliding component.
        kind: ComponentKind,
        /// Name of the colliding component.
        name: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidIndex {
                collection,
                index,
                len,
            } => write!(
                f,
                "invalid index {index} into {collection} (len {len})"
            ),
            GridError::MalformedSelector(s) => {
                write!(f, "malformed selector \"{s}\", expected L<i> or S<i>")
            }
            GridError::DuplicateRegistration { kind, name } => {
                write!(f, "{kind} \"{name}\" is already registered")
            }
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_for_invalid_index() {
        let e = GridError::InvalidIndex {
            collection: "loads",
            index: 5,
            len: 3,
        };
        assert_eq!(format!("{e}"), "invalid index 5 into loads (len 3)");
    }

    #[test]
    fn display_for_malformed_selector() {
        let e = GridError::MalformedSelector("X9".into());
        assert!(format!("{e}").contains("X9"));
    }

    #[test]
    fn display_for_duplicate_registration() {
        let e = GridError::DuplicateRegistration {
            kind: ComponentKind::Load,
            name: "Factory-A".into(),
        };
        assert_eq!(format!("{e}"), "load \"Factory-A\" is already registered");
    }
}
