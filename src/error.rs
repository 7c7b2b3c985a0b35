/// Puzzle construction error.
///
/// Interaction never fails; only building a grid (or handing over a raw
/// buffer) can be rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// Divisions, image dimensions or pixel buffer are unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The canvas size is not known yet. Retry once the host has measured it.
    #[error("canvas size is not known yet")]
    NotReady,
}
