use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Fallback thumbnails per category when the submitter does not provide one.
const CATEGORY_THUMBNAILS: &[(&str, &str)] = &[
    (
        "Web Development",
        "https://images.unsplash.com/photo-1498050108023-c5249f4df085",
    ),
    (
        "Machine Learning",
        "https://images.unsplash.com/photo-1515879218367-8466d910aaa4",
    ),
    (
        "Data Science",
        "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5",
    ),
    (
        "Cloud",
        "https://images.unsplash.com/photo-1451187580459-43490279c0fa",
    ),
    (
        "Design",
        "https://images.unsplash.com/photo-1561070791-2526d30994b5",
    ),
    (
        "Marketing",
        "https://images.unsplash.com/photo-1460925895917-afdab827c52f",
    ),
    (
        "Business",
        "https://images.unsplash.com/photo-1556742049-0cfed4f6a45d",
    ),
];

const DEFAULT_THUMBNAIL: &str = "https://images.unsplash.com/photo-1516321318423-f06f85e504b3";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub provider: String,
    pub price: f64,
    pub currency: String,
    pub duration: String,
    pub level: CourseLevel,
    pub language: String,
    pub tags: Vec<String>,
    pub category: String,
    pub skills: Vec<String>,
    pub syllabus: Vec<SyllabusSection>,
    pub thumbnail: String,
    pub url: Option<String>,
    pub submitted_by: Uuid,
    pub status: CourseStatus,
    pub rejection_reason: Option<String>,
    pub ratings: RatingSummary,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Course {
    /// Picks a thumbnail from the first tag or the category when none was
    /// submitted. Keyword match is case-insensitive, first hit wins.
    pub fn assign_thumbnail(thumbnail: Option<String>, tags: &[String], category: &str) -> String {
        if let Some(t) = thumbnail {
            if !t.trim().is_empty() {
                return t;
            }
        }

        let main = tags.first().map(String::as_str).unwrap_or(category);
        let base = CATEGORY_THUMBNAILS
            .iter()
            .find(|(name, _)| {
                let name = name.to_lowercase();
                main.to_lowercase().contains(&name)
                    || tags.iter().any(|tag| tag.to_lowercase().contains(&name))
            })
            .map(|(_, url)| *url)
            .unwrap_or(DEFAULT_THUMBNAIL);

        format!("{base}?w=400")
    }

    /// Copies a recomputed summary onto the document. Only the rating fields
    /// and the update stamp change; status and the rest of the document stay
    /// as read.
    pub fn apply_ratings(&mut self, ratings: RatingSummary) {
        self.last_updated = ratings.last_updated;
        self.ratings = ratings;
    }
}

/// Course submission payload, validated at the API boundary before a
/// `Course` document is built from it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub provider: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub duration: String,
    pub level: CourseLevel,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub syllabus: Vec<SyllabusSection>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

fn default_currency() -> String {
    "USD".into()
}

fn default_language() -> String {
    "English".into()
}

impl NewCourse {
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("instructor", &self.instructor),
            ("provider", &self.provider),
            ("duration", &self.duration),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
        }
        Ok(())
    }

    /// Negative or non-finite submitted prices collapse to free.
    pub fn normalized_price(&self) -> f64 {
        if self.price.is_finite() && self.price >= 0.0 {
            self.price
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusSection {
    pub title: String,
    pub topics: Vec<String>,
}

/// Denormalized rating summary kept on the course document. Always a pure
/// function of the course's current review set; `ratings::recompute_ratings`
/// is the only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average_rating: f64,
    pub total_reviews: u64,
    pub average_content_quality: f64,
    pub average_instructor_quality: f64,
    pub average_value_for_money: f64,
    pub rating_distribution: RatingDistribution,
    pub last_updated: DateTime<Utc>,
}

impl RatingSummary {
    pub fn empty() -> Self {
        Self {
            average_rating: 0.0,
            total_reviews: 0,
            average_content_quality: 0.0,
            average_instructor_quality: 0.0,
            average_value_for_money: 0.0,
            rating_distribution: RatingDistribution::default(),
            last_updated: Utc::now(),
        }
    }
}

/// Raw per-star counts of rounded overall ratings. Counts, not percentages:
/// the five buckets always sum to `total_reviews`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RatingDistribution {
    #[serde(rename = "1")]
    pub one: u64,
    #[serde(rename = "2")]
    pub two: u64,
    #[serde(rename = "3")]
    pub three: u64,
    #[serde(rename = "4")]
    pub four: u64,
    #[serde(rename = "5")]
    pub five: u64,
}

impl RatingDistribution {
    pub fn add(&mut self, star: u8) {
        match star {
            1 => self.one += 1,
            2 => self.two += 1,
            3 => self.three += 1,
            4 => self.four += 1,
            5 => self.five += 1,
            _ => unreachable!("star buckets are clamped into 1..=5 before tallying"),
        }
    }

    pub fn count(&self, star: u8) -> u64 {
        match star {
            1 => self.one,
            2 => self.two,
            3 => self.three,
            4 => self.four,
            5 => self.five,
            _ => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.one + self.two + self.three + self.four + self.five
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_falls_back_by_tag_keyword() {
        let tags = vec!["Machine Learning".to_string(), "Python".to_string()];
        let url = Course::assign_thumbnail(None, &tags, "AI");
        assert!(url.contains("1515879218367"));
        assert!(url.ends_with("?w=400"));
    }

    #[test]
    fn thumbnail_keeps_submitted_value() {
        let url = Course::assign_thumbnail(Some("https://cdn.example/x.png".into()), &[], "Cloud");
        assert_eq!(url, "https://cdn.example/x.png");
    }

    #[test]
    fn thumbnail_default_when_nothing_matches() {
        let url = Course::assign_thumbnail(None, &[], "Knitting");
        assert!(url.starts_with(DEFAULT_THUMBNAIL));
    }

    #[test]
    fn distribution_serializes_with_star_keys() {
        let mut dist = RatingDistribution::default();
        dist.add(5);
        dist.add(5);
        dist.add(3);
        let json = serde_json::to_value(dist).unwrap();
        assert_eq!(json["5"], 2);
        assert_eq!(json["3"], 1);
        assert_eq!(json["1"], 0);
        assert_eq!(dist.total(), 3);
    }

    #[test]
    fn new_course_requires_core_fields() {
        let payload: NewCourse = serde_json::from_value(serde_json::json!({
            "title": "Rust 101",
            "description": "Intro",
            "instructor": "Ferris",
            "provider": "Udemy",
            "duration": "5 hours",
            "level": "Beginner",
            "category": "Programming"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.currency, "USD");
        assert_eq!(payload.language, "English");

        let mut blank = payload.clone();
        blank.title = "   ".into();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn negative_price_normalizes_to_free() {
        let payload: NewCourse = serde_json::from_value(serde_json::json!({
            "title": "T", "description": "D", "instructor": "I",
            "provider": "P", "duration": "1h", "level": "Advanced",
            "category": "C", "price": -20.0
        }))
        .unwrap();
        assert_eq!(payload.normalized_price(), 0.0);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CourseStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
