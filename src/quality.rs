//! Permissive quality gate applied before scoring.
//!
//! A title shorter than [`MIN_TITLE_CHARS`] is always rejected. Otherwise an
//! article passes when any one of these holds:
//!
//! - it mentions a topical keyword (gate vocabulary or any scoring list)
//! - it uses reporting language ("said", "announced", ...)
//! - its title is well formed: at least [`WELL_FORMED_TITLE_CHARS`] chars,
//!   with an uppercase letter and an alphabetic character
//! - its body is longer than [`SUBSTANTIAL_BODY_CHARS`]
//!
//! Dropping a real story is worse than letting a weak one through.

use crate::models::ArticleRecord;
use crate::tables::{
    CONTROVERSY_KEYWORDS, ECONOMIC_IMPACT_KEYWORDS, ENGAGEMENT_KEYWORDS, GATE_KEYWORDS,
    GEOGRAPHIC_KEYWORDS, NEWS_PATTERNS, POWER_WORDS, PRIMARY_KEYWORDS, SECONDARY_KEYWORDS,
};
use crate::text::TokenIndex;

pub const MIN_TITLE_CHARS: usize = 5;
pub const WELL_FORMED_TITLE_CHARS: usize = 15;
pub const SUBSTANTIAL_BODY_CHARS: usize = 100;

/// Why an article passed or failed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Rejected(RejectReason),
    Accepted(AcceptReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TitleTooShort,
    NoSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptReason {
    Keyword,
    NewsPattern,
    WellFormedTitle,
    SubstantialBody,
}

fn keyword_tables() -> impl Iterator<Item = &'static str> {
    [
        GATE_KEYWORDS,
        PRIMARY_KEYWORDS,
        SECONDARY_KEYWORDS,
        GEOGRAPHIC_KEYWORDS,
        ECONOMIC_IMPACT_KEYWORDS,
        CONTROVERSY_KEYWORDS,
        POWER_WORDS,
        ENGAGEMENT_KEYWORDS,
    ]
    .into_iter()
    .flatten()
    .copied()
}

fn is_well_formed_title(title: &str) -> bool {
    title.chars().count() >= WELL_FORMED_TITLE_CHARS
        && title.chars().any(char::is_uppercase)
        && title.chars().any(char::is_alphabetic)
}

/// Run the gate on one article.
pub fn evaluate(article: &ArticleRecord) -> GateVerdict {
    let title = article.title.trim();
    if title.chars().count() < MIN_TITLE_CHARS {
        return GateVerdict::Rejected(RejectReason::TitleTooShort);
    }

    let index = TokenIndex::new(&article.full_text());
    if keyword_tables().any(|kw| index.contains(kw)) {
        return GateVerdict::Accepted(AcceptReason::Keyword);
    }
    if NEWS_PATTERNS.iter().any(|p| index.contains(p)) {
        return GateVerdict::Accepted(AcceptReason::NewsPattern);
    }
    if is_well_formed_title(title) {
        return GateVerdict::Accepted(AcceptReason::WellFormedTitle);
    }
    if article.body.chars().count() > SUBSTANTIAL_BODY_CHARS {
        return GateVerdict::Accepted(AcceptReason::SubstantialBody);
    }
    GateVerdict::Rejected(RejectReason::NoSignal)
}
