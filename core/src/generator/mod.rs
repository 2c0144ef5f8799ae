use crate::*;
pub use random::*;

mod random;

/// Uniform random integers, supplied by whatever the host has for entropy.
pub trait PositionSource {
    /// Returns a value in `0..bound`. `bound` is never zero.
    fn next_position(&mut self, bound: CellCount) -> CellCount;
}

impl<S: PositionSource + ?Sized> PositionSource for &mut S {
    fn next_position(&mut self, bound: CellCount) -> CellCount {
        (**self).next_position(bound)
    }
}
