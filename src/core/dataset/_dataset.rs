use crate::error::{DatasetError, Result};

/// A `Dataset` is a fixed collection of records that can be read by index.
///
/// Records are built eagerly, so `get` never mutates the dataset and is safe
/// to call from several readers at once.
pub trait Dataset<I>: Send + Sync {
    /// Returns the name of the `Dataset` as a String.
    fn name(&self) -> String;

    /// Returns the number of records in the `Dataset`.
    fn cardinality(&self) -> usize;

    /// Returns the record at `index`, or `IndexOutOfRange`.
    fn get(&self, index: usize) -> Result<I>;

    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let cardinality = self.cardinality();
        if index < cardinality {
            Ok(())
        } else {
            Err(DatasetError::IndexOutOfRange { index, cardinality })
        }
    }
}
