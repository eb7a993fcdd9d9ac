//! Bureau of Public Roads congestion cost model.
//!
//! ```text
//! cost(x)       = t0 * (1 + 0.15 * (x/c)^4)
//! derivative(x) = 0.6 * t0 * (x/c)^3 / c
//! integral(x)   = t0 * x * (1 + 0.03 * (x/c)^4)
//! ```
//!
//! `t0` is the free-flow cost and `c` the capacity.  The functional form is
//! fixed; only the per-arc parameters vary.

/// Substitute for a free-flow cost of exactly zero.  A zero `t0` makes every
/// cost and derivative on the arc vanish, which stalls the Newton step.
pub const FREE_FLOW_EPSILON: f64 = 1e-4;

#[inline]
pub fn cost(free_flow: f64, capacity: f64, flow: f64) -> f64 {
    let ratio = flow / capacity;
    let fourth = ratio * ratio * ratio * ratio;
    free_flow * (1.0 + 0.15 * fourth)
}

#[inline]
pub fn derivative(free_flow: f64, capacity: f64, flow: f64) -> f64 {
    let ratio = flow / capacity;
    let cube = ratio * ratio * ratio;
    0.6 * free_flow * cube / capacity
}

#[inline]
pub fn integral(free_flow: f64, capacity: f64, flow: f64) -> f64 {
    let ratio = flow / capacity;
    let fourth = ratio * ratio * ratio * ratio;
    free_flow * flow * (1.0 + 0.03 * fourth)
}
