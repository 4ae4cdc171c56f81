//! Static topic catalog
//!
//! The fixed syllabus a student can practise, defined at process start.
//! Mirrors the NCEA Level 1 coverage: English (Of Mice and Men, unfamiliar
//! texts) and Mathematics (algebra, trigonometry).

use crate::types::{Subject, Topic};
use once_cell::sync::Lazy;

static ENGLISH_TOPICS: Lazy<Vec<Topic>> = Lazy::new(|| {
    vec![
        Topic {
            id: "of-mice-and-men-themes".to_string(),
            name: "Of Mice and Men: Themes".to_string(),
            description: "Explore key themes like friendship, dreams, and loneliness.".to_string(),
        },
        Topic {
            id: "of-mice-and-men-characters".to_string(),
            name: "Of Mice and Men: Characters".to_string(),
            description: "Analyze the main characters like George and Lennie.".to_string(),
        },
        Topic {
            id: "unfamiliar-text".to_string(),
            name: "Unfamiliar Text".to_string(),
            description: "Practice analyzing unseen texts for language and purpose.".to_string(),
        },
    ]
});

static MATHEMATICS_TOPICS: Lazy<Vec<Topic>> = Lazy::new(|| {
    vec![
        Topic {
            id: "algebra".to_string(),
            name: "Algebra".to_string(),
            description: "Practice algebraic equations and expressions (AS91027).".to_string(),
        },
        Topic {
            id: "trigonometry".to_string(),
            name: "Trigonometry".to_string(),
            description: "Solve problems using sine, cosine, and tangent.".to_string(),
        },
    ]
});

/// All topics for a subject
pub fn topics_for(subject: Subject) -> &'static [Topic] {
    match subject {
        Subject::English => &ENGLISH_TOPICS,
        Subject::Mathematics => &MATHEMATICS_TOPICS,
    }
}

/// Look up a topic by id within a subject
pub fn find_topic(subject: Subject, topic_id: &str) -> Option<&'static Topic> {
    topics_for(subject).iter().find(|t| t.id == topic_id)
}

/// Look up a topic by id across all subjects
pub fn find_topic_anywhere(topic_id: &str) -> Option<(Subject, &'static Topic)> {
    Subject::all()
        .iter()
        .find_map(|&s| find_topic(s, topic_id).map(|t| (s, t)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        assert_eq!(topics_for(Subject::English).len(), 3);
        assert_eq!(topics_for(Subject::Mathematics).len(), 2);
    }

    #[test]
    fn test_find_topic() {
        let topic = find_topic(Subject::Mathematics, "algebra").unwrap();
        assert_eq!(topic.name, "Algebra");
        assert!(find_topic(Subject::English, "algebra").is_none());

        let (subject, topic) = find_topic_anywhere("unfamiliar-text").unwrap();
        assert_eq!(subject, Subject::English);
        assert_eq!(topic.name, "Unfamiliar Text");
    }

    #[test]
    fn test_topic_ids_unique() {
        let mut ids: Vec<&str> = Subject::all()
            .iter()
            .flat_map(|&s| topics_for(s).iter().map(|t| t.id.as_str()))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "duplicate topic ids in catalog");
    }
}
