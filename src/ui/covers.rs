//! Decoded cover art shared by every view.
//!
//! Entries survive page changes, so a restored page finds its covers
//! without touching the image manager again.

use std::collections::{HashMap, HashSet, VecDeque};

use iced::widget::image;

/// Thumbnails kept before the oldest are evicted
pub const MAX_THUMBNAILS: usize = 1000;

#[derive(Debug, Default)]
pub struct CoverCache {
    thumbnails: HashMap<String, image::Handle>,
    order: VecDeque<String>,
    full: HashMap<String, image::Handle>,
    /// Requested, including failed ones, so they are not retried
    requested: HashSet<String>,
}

impl CoverCache {
    pub fn thumbnail(&self, cover_id: &str) -> Option<&image::Handle> {
        self.thumbnails.get(cover_id)
    }

    pub fn full(&self, cover_id: &str) -> Option<&image::Handle> {
        self.full.get(cover_id)
    }

    /// Mark thumbnails as requested and return those not seen before.
    pub fn request<I>(&mut self, cover_ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        cover_ids
            .into_iter()
            .filter(|id| self.requested.insert(id.clone()))
            .collect()
    }

    pub fn insert_thumbnail(&mut self, cover_id: String, bytes: Vec<u8>) {
        if self.order.len() >= MAX_THUMBNAILS
            && let Some(oldest) = self.order.pop_front()
        {
            self.thumbnails.remove(&oldest);
            self.requested.remove(&oldest);
        }
        self.order.push_back(cover_id.clone());
        self.thumbnails
            .insert(cover_id, image::Handle::from_bytes(bytes));
    }

    pub fn insert_full(&mut self, cover_id: String, bytes: Vec<u8>) {
        self.full.insert(cover_id, image::Handle::from_bytes(bytes));
    }

    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    /// Drop everything, e.g. after switching servers.
    pub fn clear(&mut self) {
        self.thumbnails.clear();
        self.order.clear();
        self.full.clear();
        self.requested.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_only_returns_new_ids() {
        let mut cache = CoverCache::default();
        let first = cache.request(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(first, vec!["a", "b"]);

        let second = cache.request(vec!["b".to_string(), "c".to_string()]);
        assert_eq!(second, vec!["c"]);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut cache = CoverCache::default();
        cache.insert_thumbnail("a".to_string(), vec![1, 2, 3]);
        assert!(cache.thumbnail("a").is_some());
        assert!(cache.full("a").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_eviction_allows_rerequest() {
        let mut cache = CoverCache::default();
        for i in 0..=MAX_THUMBNAILS {
            let id = format!("c{}", i);
            cache.request(vec![id.clone()]);
            cache.insert_thumbnail(id, vec![0]);
        }
        assert_eq!(cache.len(), MAX_THUMBNAILS);
        assert!(cache.thumbnail("c0").is_none());
        assert_eq!(cache.request(vec!["c0".to_string()]), vec!["c0"]);
    }

    #[test]
    fn test_clear() {
        let mut cache = CoverCache::default();
        cache.request(vec!["a".to_string()]);
        cache.insert_thumbnail("a".to_string(), vec![0]);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.request(vec!["a".to_string()]), vec!["a"]);
    }
}
