/// Marker for values a reducer consumes: a user action starting, or a remote
/// call finishing.
pub trait Intent: Send + 'static {}
