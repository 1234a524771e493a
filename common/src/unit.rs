//! Marker types.

/// Marker type describing a movie being watched.
#[derive(Clone, Copy, Debug)]
pub struct Watching;
