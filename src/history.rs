use crate::record::DrawRecord;

/// Committed records, oldest first. Undo pops from the end.
///
/// No redo stack is kept: a popped record is handed back to the caller and
/// forgotten.
#[derive(Clone, Debug, Default)]
pub struct History {
    stack: Vec<DrawRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DrawRecord) {
        self.stack.push(record);
    }

    /// Most recent record, or `None` when there is nothing to undo.
    pub fn pop(&mut self) -> Option<DrawRecord> {
        self.stack.pop()
    }

    pub fn peek(&self) -> Option<&DrawRecord> {
        self.stack.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut DrawRecord> {
        self.stack.last_mut()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawRecord> {
        self.stack.iter()
    }

    pub fn as_slice(&self) -> &[DrawRecord] {
        &self.stack
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a DrawRecord;
    type IntoIter = std::slice::Iter<'a, DrawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::geometry::Point;
    use crate::record::{DrawRecord, ToolStyle};

    fn record(x: f32) -> DrawRecord {
        let mut record = DrawRecord::new(&ToolStyle::default(), Point::new(x, 0.0));
        record.end = Point::new(x + 10.0, 10.0);
        record
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut history = History::new();
        history.push(record(1.0));
        history.push(record(2.0));
        history.push(record(3.0));

        assert_eq!(history.peek().map(|r| r.start.x), Some(3.0));
        assert_eq!(history.pop().map(|r| r.start.x), Some(3.0));
        assert_eq!(history.pop().map(|r| r.start.x), Some(2.0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop().map(|r| r.start.x), Some(1.0));
        assert_eq!(history.pop(), None);
        assert!(!history.can_undo());
    }

    #[test]
    fn iterates_oldest_first() {
        let mut history = History::new();
        for x in [5.0, 6.0, 7.0] {
            history.push(record(x));
        }
        let order: Vec<f32> = history.iter().map(|r| r.start.x).collect();
        assert_eq!(order, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn clear_empties() {
        let mut history = History::new();
        history.push(record(1.0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.peek(), None);
    }
}
