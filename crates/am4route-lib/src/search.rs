//! Query parsing, exact lookup and fuzzy suggestions for reference entities.
//!
//! Queries look like `IATA:HKG`, `name:hong kong`, `id:3500` or a bare
//! `HKG`. A bare query (or one with an unrecognised prefix) is matched
//! against every key type in turn. A miss is not an error: [`Resolver::search`]
//! returns [`SearchOutcome::NotFound`] carrying up to [`MAX_SUGGESTIONS`]
//! near matches.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::DataSource;

/// Upper bound on the number of suggestions returned for a miss.
pub const MAX_SUGGESTIONS: usize = 5;

/// Key types an entity can be searched by.
pub trait SearchType: Copy + Eq + fmt::Debug + fmt::Display + 'static {
    /// Try every key type.
    const ALL: Self;
    /// Numeric primary key.
    const ID: Self;

    /// Map an upper-cased query prefix (without the colon) to a key type.
    fn from_prefix(prefix: &str) -> Option<Self>;

    /// Text key types in the order `ALL` probes and pools them.
    fn string_keys() -> &'static [Self];
}

/// A reference entity the [`Resolver`] can look up.
pub trait Searchable: Clone + fmt::Display + Sized {
    type SearchType: SearchType;

    /// Entity name used in error messages.
    const KIND: &'static str;

    fn entity_id(&self) -> u16;

    /// Short human-readable identification, used in suggestion lists.
    fn label(&self) -> String;

    fn by_id(source: &dyn DataSource, id: u16) -> Result<Option<Self>>;

    fn by_key(
        source: &dyn DataSource,
        search_type: Self::SearchType,
        key: &str,
    ) -> Result<Option<Self>>;

    /// Fuzzy matches for `query` on a single text key, best first.
    fn suggest_by(
        source: &dyn DataSource,
        search_type: Self::SearchType,
        query: &str,
    ) -> Result<Vec<Suggestion<Self>>>;
}

/// A fuzzy match and its similarity score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<E> {
    pub item: E,
    pub score: f64,
}

impl<E: fmt::Display> fmt::Display for Suggestion<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Suggestion item={} score={:.3}>", self.item, self.score)
    }
}

/// A query split into its key type and normalised key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult<S> {
    pub search_type: S,
    pub search_str: String,
}

impl<S: fmt::Display> fmt::Display for ParseResult<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ParseResult search_type={} search_str='{}'>",
            self.search_type, self.search_str
        )
    }
}

/// An exact hit together with the query that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<E: Searchable> {
    pub entity: E,
    pub parse_result: ParseResult<E::SearchType>,
}

/// Outcome of a lookup: a hit, or a miss with suggestions.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<E: Searchable> {
    Found(SearchResult<E>),
    NotFound {
        parse_result: ParseResult<E::SearchType>,
        suggestions: Vec<Suggestion<E>>,
    },
}

impl<E: Searchable> SearchOutcome<E> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn found(&self) -> Option<&E> {
        match self {
            SearchOutcome::Found(result) => Some(&result.entity),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    pub fn parse_result(&self) -> &ParseResult<E::SearchType> {
        match self {
            SearchOutcome::Found(result) => &result.parse_result,
            SearchOutcome::NotFound { parse_result, .. } => parse_result,
        }
    }

    /// Entity on a hit, [`Error::NotFound`] listing the suggestions on a miss.
    pub fn into_result(self) -> Result<E> {
        match self {
            SearchOutcome::Found(result) => Ok(result.entity),
            SearchOutcome::NotFound {
                parse_result,
                suggestions,
            } => Err(Error::NotFound {
                kind: E::KIND,
                search_type: parse_result.search_type.to_string(),
                search_str: parse_result.search_str,
                suggestions: suggestions.iter().map(|s| s.item.label()).collect(),
            }),
        }
    }
}

impl<E: Searchable> fmt::Display for SearchOutcome<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(result) => write!(
                f,
                "<SearchResult entity={} parse_result={}>",
                result.entity, result.parse_result
            ),
            SearchOutcome::NotFound {
                parse_result,
                suggestions,
            } => write!(
                f,
                "<NotFound parse_result={} suggestions={}>",
                parse_result,
                suggestions.len()
            ),
        }
    }
}

/// Classification of an ID key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKey {
    Numeric(u16),
    NonNumeric,
    OutOfRange,
}

impl IdKey {
    pub fn classify(key: &str) -> Self {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return IdKey::NonNumeric;
        }
        match key.parse::<u16>() {
            Ok(id) => IdKey::Numeric(id),
            Err(_) => IdKey::OutOfRange,
        }
    }

    pub fn numeric(self) -> Option<u16> {
        match self {
            IdKey::Numeric(id) => Some(id),
            IdKey::NonNumeric | IdKey::OutOfRange => None,
        }
    }
}

/// Resolves free-text queries against a [`DataSource`].
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    source: &'a dyn DataSource,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a dyn DataSource) -> Self {
        Self { source }
    }

    /// Split a query into key type and key. Never fails.
    pub fn parse<E: Searchable>(&self, query: &str) -> ParseResult<E::SearchType> {
        let query = query.trim_start();
        let (search_type, rest) = query
            .split_once(':')
            .and_then(|(prefix, rest)| {
                <E::SearchType as SearchType>::from_prefix(&prefix.trim().to_uppercase())
                    .map(|search_type| (search_type, rest))
            })
            .unwrap_or((<E::SearchType as SearchType>::ALL, query));

        let search_str = if search_type == <E::SearchType as SearchType>::ID {
            rest.trim().to_string()
        } else {
            rest.trim().to_uppercase()
        };

        ParseResult {
            search_type,
            search_str,
        }
    }

    /// Look up an entity, falling back to suggestions on a miss.
    pub fn search<E: Searchable>(&self, query: &str) -> Result<SearchOutcome<E>> {
        let parse_result = self.parse::<E>(query);
        if let Some(entity) = self.lookup::<E>(&parse_result)? {
            return Ok(SearchOutcome::Found(SearchResult {
                entity,
                parse_result,
            }));
        }

        let suggestions = self.suggest::<E>(&parse_result)?;
        debug!(
            kind = E::KIND,
            search_type = %parse_result.search_type,
            search_str = %parse_result.search_str,
            suggestions = suggestions.len(),
            "lookup missed"
        );
        Ok(SearchOutcome::NotFound {
            parse_result,
            suggestions,
        })
    }

    fn lookup<E: Searchable>(
        &self,
        parse_result: &ParseResult<E::SearchType>,
    ) -> Result<Option<E>> {
        let key = parse_result.search_str.as_str();
        let search_type = parse_result.search_type;

        if search_type == <E::SearchType as SearchType>::ID {
            return match IdKey::classify(key).numeric() {
                Some(id) => E::by_id(self.source, id),
                None => Ok(None),
            };
        }
        if search_type != <E::SearchType as SearchType>::ALL {
            return E::by_key(self.source, search_type, key);
        }

        if let Some(id) = IdKey::classify(key).numeric() {
            if let Some(entity) = E::by_id(self.source, id)? {
                return Ok(Some(entity));
            }
        }
        for &key_type in <E::SearchType as SearchType>::string_keys() {
            if let Some(entity) = E::by_key(self.source, key_type, key)? {
                return Ok(Some(entity));
            }
        }
        Ok(None)
    }

    /// Up to [`MAX_SUGGESTIONS`] near matches, best first.
    pub fn suggest<E: Searchable>(
        &self,
        parse_result: &ParseResult<E::SearchType>,
    ) -> Result<Vec<Suggestion<E>>> {
        let key = parse_result.search_str.as_str();
        let search_type = parse_result.search_type;

        if search_type == <E::SearchType as SearchType>::ID {
            return Ok(Vec::new());
        }
        if search_type != <E::SearchType as SearchType>::ALL {
            let mut suggestions = E::suggest_by(self.source, search_type, key)?;
            suggestions.truncate(MAX_SUGGESTIONS);
            return Ok(suggestions);
        }

        let mut pooled = Vec::new();
        for &key_type in <E::SearchType as SearchType>::string_keys() {
            pooled.extend(E::suggest_by(self.source, key_type, key)?);
        }
        // stable: equal scores keep key-type order
        pooled.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut seen = HashSet::new();
        pooled.retain(|suggestion| seen.insert(suggestion.item.entity_id()));
        pooled.truncate(MAX_SUGGESTIONS);
        Ok(pooled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_keys_are_classified() {
        assert_eq!(IdKey::classify("3500"), IdKey::Numeric(3500));
        assert_eq!(IdKey::classify("0"), IdKey::Numeric(0));
        assert_eq!(IdKey::classify("65536"), IdKey::OutOfRange);
        assert_eq!(IdKey::classify("99999999999999999999"), IdKey::OutOfRange);
        assert_eq!(IdKey::classify("12a"), IdKey::NonNumeric);
        assert_eq!(IdKey::classify("-5"), IdKey::NonNumeric);
        assert_eq!(IdKey::classify(""), IdKey::NonNumeric);
    }
}
