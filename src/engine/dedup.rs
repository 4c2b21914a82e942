// * Page-scoped record of image URLs that already went through inspection.
// * First occurrence wins; later slides sharing the URL are skipped entirely.

use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct ProcessedUrlSet {
    urls: HashSet<String>,
}

impl ProcessedUrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as processed. Returns false if it was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_first_occurrence() {
        let mut set = ProcessedUrlSet::new();
        assert!(set.is_empty());
        assert!(set.insert("https://cdn.example/a.png"));
        assert!(!set.insert("https://cdn.example/a.png"));
        assert!(set.insert("https://cdn.example/b.png"));
        assert_eq!(set.len(), 2);
    }
}
