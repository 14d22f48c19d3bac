use std::str::FromStr;

use super::error::GridError;

/// Pre-validated target of a manual fault injection.
///
/// Indices refer to registration order within the respective collection.
/// The textual form accepted by [`FromStr`] is `L<i>` for loads and `S<i>`
/// for sources (case-insensitive prefix), e.g. `"L0"` or `"s2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultTarget {
    /// The `i`-th registered load.
    Load(usize),
    /// The `i`-th registered source.
    Source(usize),
}

impl FromStr for FaultTarget {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GridError::MalformedSelector(s.to_string());
        let mut chars = s.chars();
        let prefix = chars.next().ok_or_else(malformed)?;
        let index: usize = chars.as_str().parse().map_err(|_| malformed())?;
        match prefix.to_ascii_uppercase() {
            'L' => Ok(FaultTarget::Load(index)),
            'S' => Ok(FaultTarget::Source(index)),
            _ => Err(malformed()),
        }
    }
}
