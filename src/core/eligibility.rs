use crate::domain::model::{CourseRecord, OnlineCourseRecord};

pub const PROFESSIONAL_CORE: &str = "pc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// Offered online but a Professional Core course for the student's cohort.
    NotEligible,
    /// No exact catalog entry; these catalog titles contain the query.
    Suggestions(Vec<String>),
    NotFound,
}

pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Decide whether `course_title` can be substituted by an online course.
///
/// Exact catalog match first, then the first curriculum row with the same
/// title decides between eligible and Professional Core. Without an exact
/// match the catalog is searched by substring.
pub fn check_eligibility(
    catalog: &[OnlineCourseRecord],
    curriculum: &[CourseRecord],
    course_title: &str,
) -> Eligibility {
    let wanted = normalize_title(course_title);

    if catalog.iter().any(|c| normalize_title(&c.title) == wanted) {
        // Only the first matching curriculum row is consulted.
        let department_match = curriculum
            .iter()
            .find(|c| normalize_title(&c.title) == wanted);

        return match department_match {
            Some(course) if normalize_title(&course.category) == PROFESSIONAL_CORE => {
                Eligibility::NotEligible
            }
            _ => Eligibility::Eligible,
        };
    }

    let relevant = partial_matches(catalog, course_title);
    if relevant.is_empty() {
        Eligibility::NotFound
    } else {
        Eligibility::Suggestions(relevant)
    }
}

/// Catalog titles containing `query`, case-insensitively, in catalog order.
pub fn partial_matches(catalog: &[OnlineCourseRecord], query: &str) -> Vec<String> {
    let needle = normalize_title(query);
    catalog
        .iter()
        .filter(|c| c.title.to_lowercase().contains(&needle))
        .map(|c| c.title.clone())
        .collect()
}

/// Like [`partial_matches`], keeping only the first occurrence of each title.
pub fn unique_partial_matches(catalog: &[OnlineCourseRecord], query: &str) -> Vec<String> {
    let mut titles = partial_matches(catalog, query);
    let mut seen = std::collections::HashSet::new();
    titles.retain(|t| seen.insert(t.clone()));
    titles
}
