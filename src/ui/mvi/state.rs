/// Marker for snapshot-able view state.
///
/// `Default` lets a dispatcher `std::mem::take` the current value into the
/// reducer; `Clone` hands snapshots to observers.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
