// News derived fields: URL slug from the title, reading time from the
// content word count.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::hooks::{WriteContext, WriteHook};
use crate::entities::{Document, News};
use crate::error::DomainResult;
use crate::storage::EntityStore;

/// Average adult reading speed used for the estimate.
pub const WORDS_PER_MINUTE: u32 = 200;

static NON_ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Lower-cases, collapses runs of non-alphanumerics into a single `-`,
/// and trims leading/trailing separators.
pub fn slugify(title: &str) -> String {
    NON_ALNUM_RUN
        .replace_all(&title.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Non-empty whitespace-separated tokens.
pub fn word_count(content: &str) -> u32 {
    content.split_whitespace().count() as u32
}

/// Minutes to read `content`, rounded up. Zero words reads in zero minutes.
pub fn reading_time(content: &str) -> u32 {
    word_count(content).div_ceil(WORDS_PER_MINUTE)
}

/// Fills in the derived fields of a news article before persistence.
pub struct NewsDerivation;

impl NewsDerivation {
    /// Pure and idempotent: deriving twice from unchanged inputs yields
    /// the same article. The slug is only derived when it is still empty;
    /// an existing slug is never rewritten.
    pub fn derive(article: &News, title_changed: bool, content_changed: bool) -> News {
        let mut derived = article.clone();
        if derived.slug.is_empty() && title_changed {
            derived.slug = slugify(&derived.title);
        }
        if content_changed {
            derived.reading_time = reading_time(&derived.content);
        }
        derived
    }
}

#[async_trait]
impl WriteHook for NewsDerivation {
    fn name(&self) -> &'static str {
        "news_derivation"
    }

    async fn run(
        &self,
        doc: &mut Document,
        ctx: &WriteContext,
        _store: &dyn EntityStore,
    ) -> DomainResult<()> {
        if let Document::News(article) = doc {
            *article = Self::derive(article, ctx.modified("title"), ctx.modified("content"));
        }
        Ok(())
    }
}
