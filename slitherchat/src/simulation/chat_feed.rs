use std::collections::VecDeque;

/// One line of the chat feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub name: String,
    pub message: String,
    /// Index into the configured snake palette, same as the author's snake.
    pub color: usize,
}

/// Most recent chat lines, oldest first. Pushing past capacity evicts the oldest.
#[derive(Debug)]
pub struct ChatFeed {
    lines: VecDeque<ChatLine>,
    capacity: usize,
}

impl ChatFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: ChatLine) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatLine> {
        self.lines.iter()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(i: usize) -> ChatLine {
        ChatLine {
            name: format!("User {i}"),
            message: format!("message {i}"),
            color: i % 3,
        }
    }

    #[test]
    fn test_feed_stays_within_capacity() {
        let mut feed = ChatFeed::new(4);
        for i in 0..10 {
            feed.push(line(i));
            assert!(feed.iter().count() <= 4);
        }
        let kept: Vec<_> = feed.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(kept, ["message 6", "message 7", "message 8", "message 9"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut feed = ChatFeed::new(0);
        feed.push(line(1));
        assert_eq!(feed.iter().count(), 0);
    }
}
