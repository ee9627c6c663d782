use roaring::RoaringTreemap;
use crate::core::types::RowId;

#[derive(Debug, Clone)]
pub struct Posting {
    pub row_id: RowId,
    pub positions: Vec<u32>,  // Sorted token positions for phrase queries
}

impl Posting {
    pub fn has_position(&self, position: u32) -> bool {
        self.positions.binary_search(&position).is_ok()
    }
}

/// Posting list for a term
/// Note: Sorted by row_id; rows arrive in ascending id order so inserts are appends
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    pub postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    pub fn add_posting(&mut self, posting: Posting) {
        match self.postings.binary_search_by_key(&posting.row_id, |p| p.row_id) {
            Ok(pos) => {
                self.postings[pos] = posting;
            }
            Err(pos) => {
                self.postings.insert(pos, posting);
            }
        }
    }

    pub fn get(&self, row_id: RowId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&row_id, |p| p.row_id)
            .ok()
            .map(|pos| &self.postings[pos])
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Row ids as a bitmap, for intersecting several terms at once.
    pub fn row_ids(&self) -> RoaringTreemap {
        self.postings.iter().map(|p| p.row_id.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(id: u64, positions: Vec<u32>) -> Posting {
        Posting { row_id: RowId(id), positions }
    }

    #[test]
    fn test_postings_stay_sorted() {
        let mut list = PostingList::new();
        list.add_posting(posting(3, vec![0]));
        list.add_posting(posting(1, vec![4]));
        list.add_posting(posting(2, vec![1, 7]));

        let ids: Vec<u64> = list.postings.iter().map(|p| p.row_id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(list.get(RowId(2)).is_some_and(|p| p.has_position(7)));
        assert!(list.get(RowId(9)).is_none());
    }

    #[test]
    fn test_row_id_bitmap() {
        let mut list = PostingList::new();
        list.add_posting(posting(5, vec![0]));
        list.add_posting(posting(8, vec![0]));
        let ids = list.row_ids();
        assert!(ids.contains(5));
        assert!(ids.contains(8));
        assert_eq!(ids.len(), 2);
    }
}
