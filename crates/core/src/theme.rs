//! Keyword-based theme detection for illustrated slides.

use crate::Theme;

/// Keywords per theme, in tie-break order.
const THEME_KEYWORDS: &[(Theme, &[&str])] = &[
    (
        Theme::Missing,
        &["missing", "mcar", "mar", "mnar", "imputation", "null"],
    ),
    (
        Theme::Correlation,
        &["correlation", "heatmap", "pair plot", "anscombe", "multivariate"],
    ),
    (
        Theme::Distribution,
        &["distribution", "histogram", "kde", "skew", "univariate"],
    ),
    (Theme::Outlier, &["outlier", "iqr", "z-score", "percentile"]),
    (
        Theme::Comparison,
        &["categorical", "group", "comparison", "box plot", "violin", "scatter"],
    ),
    (
        Theme::Workflow,
        &["workflow", "lifecycle", "process", "checklist", "template", "pipeline"],
    ),
    (
        Theme::Exercise,
        &["exercise", "your task", "deliverable", "time:"],
    ),
    (
        Theme::Code,
        &["python", "code", "import", "def ", "pd.", "sns.", "plt."],
    ),
    (
        Theme::Summary,
        &["summary", "takeaways", "best practices", "mistakes", "tips", "final thoughts"],
    ),
    (
        Theme::Assignment,
        &["assignment", "due", "grading", "rubric", "next class", "resources"],
    ),
];

/// Themes that win outright once they reach this score.
const STRONG_THEMES: &[Theme] = &[Theme::Exercise, Theme::Code, Theme::Assignment, Theme::Summary];

const STRONG_THRESHOLD: u32 = 2;

/// Score every theme against a slide's text.
///
/// A keyword found anywhere scores 1, and 2 more when it is in the title.
pub fn theme_scores(title: &str, points: &[String], text: &str) -> Vec<(Theme, u32)> {
    let mut all_text = String::with_capacity(title.len() + text.len() + 64);
    all_text.push_str(title);
    for point in points {
        all_text.push(' ');
        all_text.push_str(point);
    }
    all_text.push(' ');
    all_text.push_str(text);
    let all_text = all_text.to_lowercase();
    let title_text = title.to_lowercase();

    THEME_KEYWORDS
        .iter()
        .map(|(theme, keywords)| {
            let score = keywords
                .iter()
                .map(|kw| {
                    let mut s = 0;
                    if all_text.contains(kw) {
                        s += 1;
                    }
                    if title_text.contains(kw) {
                        s += 2;
                    }
                    s
                })
                .sum();
            (*theme, score)
        })
        .collect()
}

/// Classify a slide into the theme that picks its illustration.
pub fn detect_theme(title: &str, points: &[String], text: &str) -> Theme {
    let scores = theme_scores(title, points, text);
    let score_of = |theme: Theme| {
        scores
            .iter()
            .find(|(t, _)| *t == theme)
            .map(|(_, s)| *s)
            .unwrap_or(0)
    };

    for strong in STRONG_THEMES {
        if score_of(*strong) >= STRONG_THRESHOLD {
            return *strong;
        }
    }

    let mut best = (Theme::General, 0);
    for (theme, score) in &scores {
        if *score > best.1 {
            best = (*theme, *score);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_missing() {
        let theme = detect_theme(
            "Handling Missing Values",
            &points(&["MCAR vs MNAR", "Imputation strategies"]),
            "",
        );
        assert_eq!(theme, Theme::Missing);
    }

    #[test]
    fn test_detect_correlation() {
        let theme = detect_theme("Correlation Heatmaps", &[], "");
        assert_eq!(theme, Theme::Correlation);
    }

    #[test]
    fn test_strong_theme_in_title_wins() {
        // "distribution" appears in the body, but the title names an exercise.
        let theme = detect_theme(
            "Exercise 1",
            &points(&["Plot the distribution", "histogram of scores"]),
            "distribution histogram skew",
        );
        assert_eq!(theme, Theme::Exercise);
    }

    #[test]
    fn test_strong_theme_from_body_keywords() {
        // Two code keywords in the body reach the threshold without a title hit.
        let theme = detect_theme("Making Charts", &[], "import seaborn as sns\nsns.histplot(df)");
        assert_eq!(theme, Theme::Code);
    }

    #[test]
    fn test_general_when_nothing_matches() {
        assert_eq!(detect_theme("Welcome", &[], "hello everyone"), Theme::General);
    }

    #[test]
    fn test_tie_goes_to_earlier_theme() {
        // One body hit each for distribution and outlier.
        let theme = detect_theme("Looking Closer", &[], "a histogram and an outlier");
        assert_eq!(theme, Theme::Distribution);
    }

    #[test]
    fn test_scores_count_title_bonus() {
        let scores = theme_scores("Outlier Detection", &[], "");
        let outlier = scores.iter().find(|(t, _)| *t == Theme::Outlier).unwrap().1;
        assert_eq!(outlier, 3);
    }
}
