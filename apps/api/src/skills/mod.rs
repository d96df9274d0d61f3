//! Skill Extractor — matches a fixed reference vocabulary of technical terms
//! against resume text.
//!
//! The vocabulary is configuration data, hand-curated, never derived from the
//! input. Matching is case-insensitive substring containment with word
//! boundaries, so multi-word terms ("machine learning") match without any
//! n-gram reconstruction and "java" does not fire inside "javascript".

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Skills found in a resume: a deduplicated, order-irrelevant subset of the
/// vocabulary.
pub type SkillSet = BTreeSet<String>;

/// Compiled-in default vocabulary: language, framework, platform, and
/// methodology terms.
const DEFAULT_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "sql",
    "html",
    "css",
    "javascript",
    "typescript",
    "rust",
    "c++",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "flask",
    "django",
    "react",
    "scikit-learn",
    "xgboost",
    "spring",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "git",
    "docker",
    "kubernetes",
    "linux",
    "aws",
    "azure",
    "gcp",
    "machine learning",
    "deep learning",
    "data analysis",
    "web development",
    "rest api",
    "ci/cd",
    "agile",
    "nlp",
];

/// Fixed reference vocabulary of recognized skill terms.
///
/// Entries are case-normalized and deduplicated at load time, so every
/// extracted skill is a verbatim vocabulary member.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: BTreeSet<String>,
}

impl SkillVocabulary {
    /// The compiled-in default list.
    pub fn builtin() -> Self {
        Self::from_terms(DEFAULT_VOCABULARY.iter().copied())
    }

    /// Loads a curated vocabulary file: one term per line, blank lines and
    /// `#` comments skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read vocabulary file {}", path.display()))?;
        let terms = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        Ok(Self::from_terms(terms))
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

/// Returns the subset of the vocabulary present in `text`.
///
/// Empty text yields an empty set; this is the recoverable "no skills found"
/// path, not an error.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    if text.trim().is_empty() {
        return SkillSet::new();
    }

    let haystack = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|term| contains_word(&haystack, term))
        .map(str::to_string)
        .collect()
}

/// Word-boundary substring search: the characters adjacent to a match must
/// not be alphanumeric. Both sides are expected lowercase.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let boundary_before = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if boundary_before && boundary_after {
            return true;
        }

        // Advance one full character to stay on a char boundary
        match haystack[start..].chars().next() {
            Some(c) => from = start + c.len_utf8(),
            None => break,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extracted_skills_are_subset_of_vocabulary() {
        let vocabulary = SkillVocabulary::builtin();
        let skills = extract_skills(
            "Senior Python engineer: Docker, Kubernetes, burrito assembly",
            &vocabulary,
        );
        for skill in &skills {
            assert!(vocabulary.iter().any(|term| term == skill));
        }
        assert!(!skills.contains("burrito assembly"));
    }

    #[test]
    fn test_extraction_is_deduplicated() {
        let vocabulary = SkillVocabulary::from_terms(["python"]);
        let skills = extract_skills("Python, python and more PYTHON", &vocabulary);
        assert_eq!(skills.len(), 1);
        assert!(skills.contains("python"));
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let vocabulary = SkillVocabulary::builtin();
        assert!(extract_skills("", &vocabulary).is_empty());
        assert!(extract_skills("   \n\t", &vocabulary).is_empty());
    }

    #[test]
    fn test_python_docker_aws_scenario() {
        let vocabulary = SkillVocabulary::from_terms(["python", "docker", "aws", "java"]);
        let skills = extract_skills(
            "Experienced Python developer with Docker and AWS skills",
            &vocabulary,
        );
        let expected: SkillSet = ["python", "docker", "aws"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(skills, expected);
    }

    #[test]
    fn test_word_boundary_java_vs_javascript() {
        let vocabulary = SkillVocabulary::from_terms(["java", "javascript"]);
        let skills = extract_skills("JavaScript developer", &vocabulary);
        assert!(skills.contains("javascript"));
        assert!(!skills.contains("java"));

        let skills = extract_skills("Java developer", &vocabulary);
        assert!(skills.contains("java"));
        assert!(!skills.contains("javascript"));
    }

    #[test]
    fn test_multiword_term_matches_as_whole_word_substring() {
        let vocabulary = SkillVocabulary::from_terms(["machine learning"]);
        let skills = extract_skills("3 years of machine learning in production", &vocabulary);
        assert!(skills.contains("machine learning"));
    }

    #[test]
    fn test_hyphenated_term_matches() {
        let vocabulary = SkillVocabulary::from_terms(["scikit-learn"]);
        let skills = extract_skills("Modeling with scikit-learn and friends", &vocabulary);
        assert!(skills.contains("scikit-learn"));
    }

    #[test]
    fn test_vocabulary_normalizes_and_dedupes_entries() {
        let vocabulary = SkillVocabulary::from_terms(["Python", "  python  ", "PYTHON", ""]);
        assert_eq!(vocabulary.len(), 1);
    }

    #[test]
    fn test_vocabulary_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# curated list").unwrap();
        writeln!(file, "Python").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "terraform").unwrap();

        let vocabulary = SkillVocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert!(vocabulary.iter().any(|t| t == "terraform"));
    }

    #[test]
    fn test_missing_vocabulary_file_is_an_error() {
        assert!(SkillVocabulary::from_file("/nonexistent/skills.txt").is_err());
    }
}
