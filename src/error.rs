use crate::generation::Generation;
use thiserror::Error;

/// Rejection reasons of [`GenerationHolder::try_assign_generation`](crate::GenerationHolder::try_assign_generation).
///
/// The unchecked [`assign_generation`](crate::GenerationHolder::assign_generation)
/// treats the same conditions as fatal.
///
/// [`GenerationHolder::try_assign_generation`](crate::GenerationHolder::try_assign_generation) 的拒绝原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GenerationError {
    /// The sentinel generation cannot be used as a stamp.
    #[error("generation 0 is reserved for unstamped objects")]
    Sentinel,

    /// The requested generation is older than one already used for stamping.
    #[error("generation {requested} is older than previously stamped generation {last}")]
    Regressed {
        /// Most recent generation used for stamping.
        last: Generation,
        /// Generation that was passed in.
        requested: Generation,
    },
}
