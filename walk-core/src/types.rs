use glam::DVec3;

/// Identifier for a walker in a [`crate::system::WalkingSystem`].
///
/// This is an index into the system's walker list, and is only meaningful
/// within the lifetime of a given system (or its saved record).
pub type WalkerId = usize;

/// Positions of every walker at one point in simulated time, in walker order.
pub type State = Vec<DVec3>;

/// One sequence of scalars per axis (x, y, z).
pub type AxisSeries = [Vec<f64>; 3];

/// A walker's coordinate history across all iterations.
pub type Curve = AxisSeries;

/// Closed polygon through every walker at one iteration. Each axis holds
/// `walker_count + 1` values, the last repeating the first.
pub type Ring = AxisSeries;
