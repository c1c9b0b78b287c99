use crate::core::BlockCoordinate;
use crate::error::OracleUnavailable;

/// Synchronous "is there solid matter here?" query surface.
///
/// Sits on the scan hot path, so implementations should not allocate per call.
pub trait BlockOracle {
    fn block_exists_at(&self, at: BlockCoordinate) -> Result<bool, OracleUnavailable>;

    /// `false` while the world cannot answer anything at all (e.g. a generation stall).
    fn is_ready(&self) -> bool {
        true
    }
}

impl<T: BlockOracle + ?Sized> BlockOracle for &T {
    fn block_exists_at(&self, at: BlockCoordinate) -> Result<bool, OracleUnavailable> {
        (**self).block_exists_at(at)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Adapts any closure into an oracle. Handy for heightmaps and tests.
pub struct FnOracle<F>(F);

impl<F> FnOracle<F>
where
    F: Fn(i32, i32, i32) -> bool,
{
    pub fn new(solid_at: F) -> Self {
        Self(solid_at)
    }
}

impl<F> BlockOracle for FnOracle<F>
where
    F: Fn(i32, i32, i32) -> bool,
{
    fn block_exists_at(&self, at: BlockCoordinate) -> Result<bool, OracleUnavailable> {
        Ok((self.0)(at.x, at.y, at.z))
    }
}
