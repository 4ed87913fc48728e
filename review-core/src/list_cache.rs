//! Client-side cache of the review lists
//!
//! Holds the last fetched pending/standby/archived rows and the stats
//! summary, and filters them locally for the search box.

use shared::{OrderSummary, ReviewList, ReviewStats};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ListCache {
    lists: HashMap<ReviewList, Vec<OrderSummary>>,
    stats: Option<ReviewStats>,
}

fn matches_query(row: &OrderSummary, needle: &str) -> bool {
    let text_fields = [
        Some(row.order_number.as_str()),
        row.company_name.as_deref(),
        row.machine_name.as_deref(),
        row.technician_name.as_deref(),
        row.reason.as_deref(),
    ];

    row.id.to_string() == needle
        || text_fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in freshly fetched rows for one list
    pub fn replace(&mut self, list: ReviewList, rows: Vec<OrderSummary>) {
        tracing::debug!(list = list.path(), count = rows.len(), "List cache updated");
        self.lists.insert(list, rows);
    }

    pub fn rows(&self, list: ReviewList) -> &[OrderSummary] {
        self.lists.get(&list).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the list has been fetched at least once
    pub fn is_loaded(&self, list: ReviewList) -> bool {
        self.lists.contains_key(&list)
    }

    /// Case-insensitive filter over order number, company, machine,
    /// technician and reason. A blank query returns every row.
    pub fn search(&self, list: ReviewList, query: &str) -> Vec<&OrderSummary> {
        let needle = query.trim().to_lowercase();
        let rows = self.rows(list);
        if needle.is_empty() {
            return rows.iter().collect();
        }
        rows.iter().filter(|row| matches_query(row, &needle)).collect()
    }

    pub fn find(&self, order_id: i64) -> Option<(ReviewList, &OrderSummary)> {
        ReviewList::ALL.into_iter().find_map(|list| {
            self.rows(list)
                .iter()
                .find(|row| row.id == order_id)
                .map(|row| (list, row))
        })
    }

    /// Drop an order from every list, returning whether it was present
    pub fn remove(&mut self, order_id: i64) -> bool {
        let mut removed = false;
        for rows in self.lists.values_mut() {
            let before = rows.len();
            rows.retain(|row| row.id != order_id);
            removed |= rows.len() != before;
        }
        removed
    }

    pub fn set_stats(&mut self, stats: ReviewStats) {
        self.stats = Some(stats);
    }

    pub fn stats(&self) -> Option<ReviewStats> {
        self.stats
    }

    pub fn clear(&mut self) {
        self.lists.clear();
        self.stats = None;
    }
}
