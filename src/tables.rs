//! Keyword, pattern and credibility tables used by the scorers and the
//! quality gate.
//!
//! All lists are written in their display form; they are normalized with
//! [`crate::text::normalize`] at match time, so casing and punctuation here
//! do not matter. Multi-word entries are matched as contiguous phrases.

/// Words dropped by the text normalizer.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were",
];

/// Core political and economic terms (relevance, cap 3.0).
pub const PRIMARY_KEYWORDS: &[&str] = &[
    "Trump", "US", "trade", "tariff", "economy", "tax", "Biden", "China",
];

/// Business, finance and policy terms (relevance, cap 2.0).
pub const SECONDARY_KEYWORDS: &[&str] = &[
    "business",
    "market",
    "finance",
    "investment",
    "policy",
    "politics",
    "ecommerce",
    "technology",
];

/// Regional terms (relevance, cap 2.0).
pub const GEOGRAPHIC_KEYWORDS: &[&str] = &["Vietnam", "Asia", "ASEAN", "Southeast Asia", "Pacific"];

/// Macro-economic impact terms (relevance, cap 2.0).
pub const ECONOMIC_IMPACT_KEYWORDS: &[&str] = &[
    "growth",
    "inflation",
    "GDP",
    "employment",
    "recession",
    "stimulus",
    "interest rate",
];

/// Controversy and interest terms (appeal, cap 2.0).
pub const CONTROVERSY_KEYWORDS: &[&str] = &[
    "scandal",
    "crisis",
    "breakthrough",
    "unprecedented",
    "shocking",
    "major",
    "historic",
];

/// Headline power words; any one of them earns the headline bonus once.
pub const POWER_WORDS: &[&str] = &[
    "breaking",
    "exclusive",
    "urgent",
    "major",
    "critical",
    "shocking",
    "unprecedented",
];

/// Words that suggest a story invites discussion (appeal, +0.2 each).
pub const ENGAGEMENT_KEYWORDS: &[&str] =
    &["debate", "opinion", "analysis", "impact", "future", "prediction"];

/// Reporting-language words accepted by the quality gate.
pub const NEWS_PATTERNS: &[&str] = &[
    "said",
    "announced",
    "reported",
    "according",
    "revealed",
    "confirmed",
    "stated",
    "declared",
    "warned",
    "predicted",
    "expects",
    "plans",
    "will",
    "could",
    "should",
    "may",
    "might",
    "likely",
    "potential",
];

/// Broad topical vocabulary accepted by the quality gate, on top of every
/// scoring list above.
pub const GATE_KEYWORDS: &[&str] = &[
    // leaders
    "trump", "biden", "xi jinping", "putin", "zelensky",
    // countries and blocs
    "us", "usa", "america", "china", "europe", "nato", "g7", "g20", "un",
    // economics and trade
    "economy", "economic", "business", "trade", "tariffs", "sanctions", "inflation",
    "recession", "gdp", "growth", "market", "stock", "investment", "finance", "currency",
    "dollar", "euro", "yuan", "interest rates", "central bank", "fed", "ecb", "supply chain",
    // politics
    "government", "policy", "politics", "international", "global", "world", "diplomatic",
    "foreign policy", "election", "congress", "parliament", "legislation", "regulation",
    "summit", "agreement", "negotiations",
    // corporate
    "corporate", "company", "merger", "acquisition", "earnings", "ipo", "stocks", "bonds",
    "commodities", "oil prices", "crypto", "blockchain",
    // urgency
    "breaking", "major", "crisis", "urgent", "historic", "unprecedented",
];

/// Credibility score given to sources missing from [`SOURCE_CREDIBILITY`].
pub const DEFAULT_CREDIBILITY: f64 = 1.0;

/// Publisher credibility, matched case-insensitively on the trimmed source label.
pub const SOURCE_CREDIBILITY: &[(&str, f64)] = &[
    ("Reuters", 2.0),
    ("Associated Press", 2.0),
    ("AP", 2.0),
    ("AP News", 2.0),
    ("The Guardian", 1.8),
    ("Guardian", 1.8),
    ("BBC", 1.8),
    ("BBC News", 1.8),
    ("Bloomberg", 1.8),
    ("Financial Times", 1.8),
    ("Wall Street Journal", 1.9),
    ("WSJ", 1.9),
    ("NPR", 1.7),
    ("CNN", 1.5),
];

/// Look up a source label in [`SOURCE_CREDIBILITY`].
pub fn source_credibility(source: &str) -> f64 {
    let source = source.trim();
    SOURCE_CREDIBILITY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(source))
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_CREDIBILITY)
}
