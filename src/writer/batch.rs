use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{Row, RowId};

/// A row waiting in a batch
#[derive(Debug, Clone)]
pub struct PendingRow {
    pub position: usize,
    pub row_id: RowId,
    pub row: Row,
}

/// Bounded buffer of pending writes for one table pass
#[derive(Debug)]
pub struct Batch {
    pub buffer: Vec<PendingRow>,
    pub batch_size: usize,
}

impl Batch {
    pub fn new(batch_size: usize) -> Self {
        Batch {
            buffer: Vec::with_capacity(batch_size),
            batch_size,
        }
    }

    /// Buffer a row. Every field needs a name to be addressable in results.
    pub fn index(&mut self, position: usize, row_id: RowId, row: Row) -> Result<()> {
        if let Some(index) = row.fields.iter().position(|(name, _)| name.is_empty()) {
            return Err(Error::new(
                ErrorKind::FieldIndexFailed,
                format!(
                    "could not create search index for row {} (overall row {}): field {} has no name",
                    position, row_id, index
                ),
            ));
        }

        self.buffer.push(PendingRow { position, row_id, row });
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.batch_size
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Hand the pending rows over and leave the batch empty.
    pub fn take(&mut self) -> Vec<PendingRow> {
        std::mem::replace(&mut self.buffer, Vec::with_capacity(self.batch_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_up_to_batch_size() {
        let mut batch = Batch::new(2);
        batch.index(0, RowId(1), Row::new().with_field("a", "1")).unwrap();
        assert!(!batch.is_full());
        batch.index(1, RowId(2), Row::new().with_field("a", "2")).unwrap();
        assert!(batch.is_full());

        let pending = batch.take();
        assert_eq!(pending.len(), 2);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_unnamed_field_is_rejected() {
        let mut batch = Batch::new(10);
        let row = Row::new().with_field("key", "SIDE-1").with_field("", "orphan");
        let err = batch.index(4, RowId(12), row).unwrap_err();
        assert_eq!(err.kind, ErrorKind::FieldIndexFailed);
        assert!(err.context.contains("row 4 (overall row 12)"));
        assert!(batch.is_empty());
    }
}
