// Co-occurrence ranking.
// Counts the hashtags that appear alongside a queried hashtag and picks the top three.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CotagError, Result};
use crate::twitter::SearchResponse;

/// The three hashtags that co-occur most often, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopThree(pub [String; 3]);

impl TopThree {
    pub fn as_array(&self) -> &[String; 3] {
        &self.0
    }
}

impl fmt::Display for TopThree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Whether a hashtag's text (no `#`) names the queried hashtag (with `#`).
///
/// Case-insensitive; counting itself is not.
fn is_queried(text: &str, queried: &str) -> bool {
    format!("#{}", text.to_lowercase()) == queried.to_lowercase()
}

/// Count hashtags in `response`, skipping the queried one.
///
/// Counts are keyed by the exact text received, so case variants stay
/// separate. The table is in first-seen order.
pub fn hashtag_frequencies(response: &Value, queried: &str) -> Result<Vec<(String, usize)>> {
    let response = SearchResponse::deserialize(response)
        .map_err(|e| CotagError::MalformedResponse(e.to_string()))?;

    let mut table: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for text in response.hashtags().filter(|text| !is_queried(text, queried)) {
        match index.get(text) {
            Some(&i) => table[i].1 += 1,
            None => {
                index.insert(text.to_string(), table.len());
                table.push((text.to_string(), 1));
            }
        }
    }

    Ok(table)
}

/// Find the three hashtags that co-occur most often with `queried`.
///
/// Ties keep first-seen order. Fewer than three distinct co-occurring
/// hashtags is an `InsufficientData` error.
pub fn find_top_three(response: &Value, queried: &str) -> Result<TopThree> {
    let mut table = hashtag_frequencies(response, queried)?;
    // Stable, so equal counts stay in first-seen order
    table.sort_by(|a, b| b.1.cmp(&a.1));

    match table.as_slice() {
        [first, second, third, ..] => Ok(TopThree([
            format!("#{}", first.0),
            format!("#{}", second.0),
            format!("#{}", third.0),
        ])),
        _ => Err(CotagError::InsufficientData { found: table.len() }),
    }
}
