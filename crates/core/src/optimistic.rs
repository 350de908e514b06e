//! Tentative / confirmed state for optimistic updates.
//!
//! A record starts `Confirmed`. Applying a local change moves it to
//! `Tentative`, remembering the last known-good value. When the write
//! settles, success confirms the server's value and failure restores the
//! known-good one.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Optimistic<T> {
    Confirmed(T),
    Tentative { tentative: T, last_good: T },
}

impl<T: Clone> Optimistic<T> {
    pub fn confirmed(value: T) -> Self {
        Self::Confirmed(value)
    }

    /// Apply a local change. Repeated changes stack on the tentative value
    /// and keep the original known-good snapshot.
    pub fn apply(self, change: impl FnOnce(&mut T)) -> Self {
        match self {
            Self::Confirmed(value) => {
                let mut tentative = value.clone();
                change(&mut tentative);
                Self::Tentative {
                    tentative,
                    last_good: value,
                }
            }
            Self::Tentative {
                mut tentative,
                last_good,
            } => {
                change(&mut tentative);
                Self::Tentative {
                    tentative,
                    last_good,
                }
            }
        }
    }

    /// The value to show right now.
    pub fn current(&self) -> &T {
        match self {
            Self::Confirmed(value) => value,
            Self::Tentative { tentative, .. } => tentative,
        }
    }

    pub fn is_tentative(&self) -> bool {
        matches!(self, Self::Tentative { .. })
    }

    /// Discard the tentative value.
    pub fn rollback(self) -> Self {
        match self {
            Self::Confirmed(value) => Self::Confirmed(value),
            Self::Tentative { last_good, .. } => Self::Confirmed(last_good),
        }
    }

    /// Resolve with the outcome of the write. On success the stored value
    /// becomes confirmed; on failure the known-good value is returned with
    /// the error.
    pub fn settle<E>(self, outcome: Result<T, E>) -> Result<T, (T, E)> {
        match outcome {
            Ok(stored) => Ok(stored),
            Err(err) => {
                let restored = match self {
                    Self::Confirmed(value) => value,
                    Self::Tentative { last_good, .. } => last_good,
                };
                Err((restored, err))
            }
        }
    }
}
