use crate::board::types::{Idea, IdeaCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many ideas the popularity ranking keeps.
const TOP_IDEAS_LIMIT: usize = 5;

/// Aggregate view of the collection for the dashboard. Derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    /// Non-zero categories in the fixed enum order.
    pub category_counts: Vec<CategoryCount>,
    pub top_category: Option<IdeaCategory>,
    /// Sum of all likes and dislikes across the collection.
    pub total_engagement: u64,
    /// Up to five ideas ranked by likes descending.
    pub top_ideas: Vec<Idea>,
    /// Ideas created per calendar day, chronologically ascending.
    pub timeline: Vec<DailyCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: IdeaCategory,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    /// Calendar day as YYYY-MM-DD.
    pub date: String,
    pub count: usize,
}

/// Compute dashboard statistics as a pure function of the collection.
pub fn compute_statistics(ideas: &[Idea]) -> BoardStats {
    let mut by_category: HashMap<IdeaCategory, usize> = HashMap::new();
    for idea in ideas {
        *by_category.entry(idea.category).or_insert(0) += 1;
    }

    let category_counts: Vec<CategoryCount> = IdeaCategory::ALL
        .iter()
        .filter_map(|cat| {
            by_category.get(cat).map(|&count| CategoryCount {
                category: *cat,
                count,
            })
        })
        .collect();

    // Strict comparison walks the fixed enum order, so ties go to the
    // first-encountered category
    let mut top_category = None;
    let mut top_count = 0usize;
    for cat in IdeaCategory::ALL {
        let count = by_category.get(&cat).copied().unwrap_or(0);
        if count > top_count {
            top_count = count;
            top_category = Some(cat);
        }
    }

    let total_engagement = ideas
        .iter()
        .map(|i| i.likes as u64 + i.dislikes as u64)
        .sum();

    let mut top_ideas: Vec<Idea> = ideas.to_vec();
    top_ideas.sort_by(|a, b| b.likes.cmp(&a.likes));
    top_ideas.truncate(TOP_IDEAS_LIMIT);

    let mut per_day: HashMap<String, usize> = HashMap::new();
    for idea in ideas {
        let day = idea.created_at.format("%Y-%m-%d").to_string();
        *per_day.entry(day).or_insert(0) += 1;
    }
    let mut timeline: Vec<DailyCount> = per_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();
    timeline.sort_by(|a, b| a.date.cmp(&b.date));

    BoardStats {
        total: ideas.len(),
        category_counts,
        top_category,
        total_engagement,
        top_ideas,
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn make_idea(title: &str, category: IdeaCategory, likes: u32, dislikes: u32) -> Idea {
        Idea {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: "d".to_string(),
            category,
            likes,
            dislikes,
            created_at: Utc::now(),
            author: "tester".to_string(),
            admin_response: None,
        }
    }

    #[test]
    fn test_category_counts_and_top_category() {
        let ideas = vec![
            make_idea("a", IdeaCategory::Sustainability, 0, 0),
            make_idea("b", IdeaCategory::Sustainability, 0, 0),
            make_idea("c", IdeaCategory::Health, 0, 0),
        ];

        let stats = compute_statistics(&ideas);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.top_category, Some(IdeaCategory::Sustainability));
        assert_eq!(
            stats.category_counts,
            vec![
                CategoryCount {
                    category: IdeaCategory::Sustainability,
                    count: 2
                },
                CategoryCount {
                    category: IdeaCategory::Health,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_top_category_tie_breaks_on_enum_order() {
        // Health comes after Community in the fixed order
        let ideas = vec![
            make_idea("a", IdeaCategory::Health, 0, 0),
            make_idea("b", IdeaCategory::Community, 0, 0),
        ];
        let stats = compute_statistics(&ideas);
        assert_eq!(stats.top_category, Some(IdeaCategory::Community));
    }

    #[test]
    fn test_empty_collection() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.top_category, None);
        assert_eq!(stats.total_engagement, 0);
        assert!(stats.category_counts.is_empty());
        assert!(stats.top_ideas.is_empty());
        assert!(stats.timeline.is_empty());
    }

    #[test]
    fn test_engagement_and_top_ideas() {
        let ideas = vec![
            make_idea("low", IdeaCategory::Art, 1, 3),
            make_idea("high", IdeaCategory::Art, 9, 0),
            make_idea("mid", IdeaCategory::Art, 5, 2),
            make_idea("d", IdeaCategory::Art, 4, 0),
            make_idea("e", IdeaCategory::Art, 3, 0),
            make_idea("f", IdeaCategory::Art, 2, 0),
        ];

        let stats = compute_statistics(&ideas);
        assert_eq!(stats.total_engagement, 1 + 3 + 9 + 5 + 2 + 4 + 3 + 2);
        assert_eq!(stats.top_ideas.len(), 5);
        let likes: Vec<_> = stats.top_ideas.iter().map(|i| i.likes).collect();
        assert_eq!(likes, [9, 5, 4, 3, 2]);
    }

    #[test]
    fn test_timeline_groups_by_day_ascending() {
        let today = Utc::now();
        let mut early = make_idea("old", IdeaCategory::Education, 0, 0);
        early.created_at = today - Duration::days(2);
        let mut also_early = make_idea("old2", IdeaCategory::Education, 0, 0);
        also_early.created_at = today - Duration::days(2);
        let recent = make_idea("new", IdeaCategory::Education, 0, 0);

        let stats = compute_statistics(&[recent, early, also_early]);
        assert_eq!(stats.timeline.len(), 2);
        assert!(stats.timeline[0].date < stats.timeline[1].date);
        assert_eq!(stats.timeline[0].count, 2);
        assert_eq!(stats.timeline[1].count, 1);
    }
}
