//! Bilingual (English + German) keyword vocabularies.
//!
//! Both tables are single case-insensitive alternations wrapped in word
//! boundaries. Alternation order matters: the leftmost alternative that
//! completes a match wins, so longer phrases sharing a prefix with a shorter
//! term must stay ahead of it.

use std::sync::LazyLock;

use regex::Regex;

// Patterns that suggest higher complexity
static COMPLEX_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(",
        // English
        r"analy[sz]e|compare|contrast|explain\s+in\s+detail|step[- ]by[- ]step|",
        r"implement|architect|design|refactor|optimize|debug|",
        r"write\s+(a\s+)?(complete|full|entire)|",
        r"multi[- ]step|comprehensive|thorough|in[- ]depth|",
        r"trade[- ]?offs?|pros?\s+and\s+cons?|advantages?\s+and\s+disadvantages?|",
        // German
        r"analysiere|vergleiche|erkl[äa]r[e ].*im\s+detail|Schritt\s+f[üu]r\s+Schritt|",
        r"implementiere|entwirf|entwerfe|optimiere|debugge|",
        r"schreib[e ].*(?:komplett|vollst[äa]ndig|ganz)|",
        r"umfassend|gr[üu]ndlich|ausf[üu]hrlich|detailliert|tiefgehend|",
        r"Vor-?\s*und\s+Nachteile|Abw[äa]gung|Pro\s+und\s+Contra|",
        r"mehrschrittig|mehrstufig|Architektur|Konzept\s+erstell",
        r")\b",
    ))
    .expect("complex keyword pattern must compile")
});

// Patterns that suggest simple tasks
static SIMPLE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(",
        // English
        r"translate|summarize|summarise|tldr|tl;dr|",
        r"yes\s+or\s+no|true\s+or\s+false|",
        r"what\s+is|who\s+is|when\s+did|where\s+is|",
        r"define|list|name|count|",
        r"fix\s+(this|the)\s+(typo|spelling|grammar)|",
        r"convert|format|reformat|",
        // German
        r"[üu]bersetz[e ]|zusammenfass|fass[e ].*zusammen|",
        r"ja\s+oder\s+nein|richtig\s+oder\s+falsch|",
        r"was\s+ist|wer\s+ist|wann\s+war|wo\s+ist|wie\s+hei[ßs]t|",
        r"definiere|z[äa]hl[e ]|nenne|auflisten|",
        r"korrigiere\s+(?:den|die|das)\s+(?:Tippfehler|Rechtschreibung|Grammatik)|",
        r"konvertiere|formatiere|umwandeln",
        r")\b",
    ))
    .expect("simple keyword pattern must compile")
});

/// Keyword hits in one piece of text, in the order they occur.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMatches<'a> {
    terms: Vec<&'a str>,
}

impl<'a> KeywordMatches<'a> {
    fn find(re: &Regex, text: &'a str) -> Self {
        Self {
            terms: re.find_iter(text).map(|m| m.as_str()).collect(),
        }
    }

    /// Total number of non-overlapping hits, duplicates included.
    pub fn count(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every matched term as written in the text.
    pub fn terms(&self) -> &[&'a str] {
        &self.terms
    }

    /// Distinct terms among the first `limit` hits, first-seen order.
    pub fn sample(&self, limit: usize) -> Vec<&'a str> {
        let mut sample: Vec<&'a str> = Vec::with_capacity(limit);
        for &term in self.terms.iter().take(limit) {
            if !sample.contains(&term) {
                sample.push(term);
            }
        }
        sample
    }
}

/// Complexity-signaling terms in `text`.
pub fn complex_keywords(text: &str) -> KeywordMatches<'_> {
    KeywordMatches::find(&COMPLEX_KEYWORDS, text)
}

/// Low-effort intent terms in `text`.
pub fn simple_keywords(text: &str) -> KeywordMatches<'_> {
    KeywordMatches::find(&SIMPLE_KEYWORDS, text)
}
