// Locally derived productivity insights
//
// The one piece of "intelligence" computed without the AI endpoint: aggregate
// task pressure plus keyword frequency over analyzed documents.

use crate::models::{Document, Task};
use crate::tasks::views;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of categories reported in `busiest_categories`
const TOP_CATEGORIES: usize = 5;

/// Number of keywords reported in `top_keywords`
const TOP_KEYWORDS: usize = 10;

/// Minimum token length counted as a keyword
const MIN_KEYWORD_LEN: usize = 3;

/// Words too common to say anything about the user's documents
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "has", "have",
    "her", "his", "its", "our", "out", "she", "they", "this", "that", "was", "were", "will",
    "with", "would", "your", "from", "into", "been", "being", "about", "after", "before", "than",
    "then", "them", "there", "these", "those", "what", "when", "where", "which", "while", "who",
    "how", "why", "also", "because", "between", "both", "does", "each", "just", "like", "more",
    "most", "only", "other", "over", "same", "some", "such", "very",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Derived productivity report; computed on demand, never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityInsights {
    pub total_tasks: usize,
    pub open_tasks: usize,
    pub completed_tasks: usize,
    /// Completed over total; 0.0 for an empty collection
    pub completion_rate: f32,
    pub overdue_tasks: usize,
    pub busiest_categories: Vec<CategoryCount>,
    /// Frequency-ranked content keywords across analyzed documents
    pub top_keywords: Vec<KeywordCount>,
}

/// Build the full report over the current collections
pub fn productivity_insights(
    tasks: &[Task],
    documents: &[Document],
    now: DateTime<Utc>,
) -> ProductivityInsights {
    let stats = views::compute_stats(tasks, now);

    let open_tasks = tasks
        .iter()
        .filter(|task| !task.status.is_terminal())
        .count();

    let completion_rate = if stats.total == 0 {
        0.0
    } else {
        stats.completed as f32 / stats.total as f32
    };

    let mut categories: Vec<CategoryCount> = stats
        .by_category
        .iter()
        .map(|(category, count)| CategoryCount {
            category: category.clone(),
            count: *count,
        })
        .collect();
    // BTreeMap iteration is already name-ordered, so ties stay alphabetical
    categories.sort_by(|a, b| b.count.cmp(&a.count));
    categories.truncate(TOP_CATEGORIES);

    ProductivityInsights {
        total_tasks: stats.total,
        open_tasks,
        completed_tasks: stats.completed,
        completion_rate,
        overdue_tasks: stats.overdue,
        busiest_categories: categories,
        top_keywords: top_keywords(documents),
    }
}

/// Frequency-ranked keywords over the content of analyzed documents.
/// Documents still awaiting analysis are skipped.
pub fn top_keywords(documents: &[Document]) -> Vec<KeywordCount> {
    let word = match Regex::new(r"[a-z][a-z0-9']*") {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for document in documents {
        if !document.analysis_complete || !document.has_text_content() {
            continue;
        }
        let lowered = document.content.to_lowercase();
        for token in word.find_iter(&lowered) {
            let token = token.as_str();
            if token.len() < MIN_KEYWORD_LEN || STOP_WORDS.contains(&token) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    let mut keywords: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect();
    // Ties resolve alphabetically so the report is deterministic
    keywords.sort_by(|a, b| b.count.cmp(&a.count).then(a.keyword.cmp(&b.keyword)));
    keywords.truncate(TOP_KEYWORDS);
    keywords
}
