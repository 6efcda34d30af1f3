//! # Formatting
//!
//! Renders a finished element sequence back into article HTML
//! ([`format_body`]) or a length-bounded plain-text summary
//! ([`format_summary`]).
//!
//! Both formatters run the caller's [`ElementFilter`]s for their
//! [`FilterScope`] on each element's text before rendering it. Filters run
//! in order and the first non-[`FilterOutcome::Pass`] result wins.

pub mod body;
pub mod links;
pub mod summary;

pub use body::format_body;
pub use summary::format_summary;

use regex::Regex;

use crate::error::EngineError;

/// Which formatter a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    Body,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    Pass,
    /// Omit this element only.
    Skip,
    /// Abandon the rest of the formatting loop.
    Stop,
}

/// A per-element check run at formatting time.
///
/// `apply` may rewrite the text (e.g. truncate it) before passing it on.
pub trait ElementFilter {
    fn scope(&self) -> FilterScope;

    fn apply(&self, text: &mut String) -> FilterOutcome;
}

/// Runs the filters of `scope` in order over `text`.
pub fn run_filters(
    filters: &[Box<dyn ElementFilter>],
    scope: FilterScope,
    text: &mut String,
) -> FilterOutcome {
    filters
        .iter()
        .filter(|filter| filter.scope() == scope)
        .map(|filter| filter.apply(text))
        .find(|outcome| *outcome != FilterOutcome::Pass)
        .unwrap_or(FilterOutcome::Pass)
}

/// What a [`PatternFilter`] does when its pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternAction {
    Skip,
    Stop,
    /// Cut the text at the start of the match; skip if nothing is left.
    Truncate,
}

/// A regex-driven filter.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    scope: FilterScope,
    pattern: Regex,
    action: PatternAction,
}

impl PatternFilter {
    pub fn new(
        scope: FilterScope,
        pattern: &str,
        action: PatternAction,
    ) -> Result<Self, EngineError> {
        let compiled = Regex::new(pattern).map_err(|source| EngineError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            scope,
            pattern: compiled,
            action,
        })
    }
}

impl ElementFilter for PatternFilter {
    fn scope(&self) -> FilterScope {
        self.scope
    }

    fn apply(&self, text: &mut String) -> FilterOutcome {
        let Some(found) = self.pattern.find(text) else {
            return FilterOutcome::Pass;
        };
        match self.action {
            PatternAction::Skip => FilterOutcome::Skip,
            PatternAction::Stop => FilterOutcome::Stop,
            PatternAction::Truncate => {
                let kept = text[..found.start()].trim_end().len();
                text.truncate(kept);
                if text.is_empty() {
                    FilterOutcome::Skip
                } else {
                    FilterOutcome::Pass
                }
            }
        }
    }
}

/// A filter backed by a closure.
pub struct FnFilter<F> {
    scope: FilterScope,
    check: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&mut String) -> FilterOutcome,
{
    pub fn new(scope: FilterScope, check: F) -> Self {
        Self { scope, check }
    }
}

impl<F> ElementFilter for FnFilter<F>
where
    F: Fn(&mut String) -> FilterOutcome,
{
    fn scope(&self) -> FilterScope {
        self.scope
    }

    fn apply(&self, text: &mut String) -> FilterOutcome {
        (self.check)(text)
    }
}
