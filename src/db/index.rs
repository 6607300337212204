//! In-memory inverted index over record names.
//!
//! Three fields are indexed per record: the literal lowercased name tokens, and the
//! Hebrew and English phonetic codes of those tokens. Lookups are conjunctive: every
//! query term must be present in the record's field.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::IndexError;
use crate::matching::helpers::tokenize;
use crate::matching::phonetic::{PhoneticCode, encode};
use crate::models::{Language, Record};

/// Lookup capability the search strategies need from an index.
pub trait RecordIndex {
    /// Records whose name contains every token (tokens are expected lowercased).
    fn lookup_text(&self, tokens: &[String]) -> Result<Vec<Record>, IndexError>;

    /// Records whose name carries every code in the given language's phonetic field.
    fn lookup_code(&self, lang: Language, codes: &[PhoneticCode])
    -> Result<Vec<Record>, IndexError>;
}

type Postings<K> = HashMap<K, Vec<usize>>;

#[derive(Debug, Default)]
pub struct InvertedIndex {
    docs: Vec<Record>,
    names: Postings<String>,
    heb_codes: Postings<PhoneticCode>,
    eng_codes: Postings<PhoneticCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub documents: usize,
    pub name_terms: usize,
    pub heb_codes: usize,
    pub eng_codes: usize,
}

impl InvertedIndex {
    /// Build the index from a record snapshot. Records are copied in; the index is
    /// read-only afterwards.
    pub fn build(records: &[Record]) -> Self {
        let mut index = Self {
            docs: records.to_vec(),
            ..Self::default()
        };
        for (doc, record) in records.iter().enumerate() {
            let tokens = tokenize(&record.name);
            add_terms(&mut index.names, doc, tokens.iter().cloned());
            add_terms(
                &mut index.heb_codes,
                doc,
                phonetic_terms(&tokens, Language::Heb),
            );
            add_terms(
                &mut index.eng_codes,
                doc,
                phonetic_terms(&tokens, Language::Eng),
            );
        }
        let stats = index.stats();
        log::info!(
            "Built inverted index: {} records, {} name terms, {} heb codes, {} eng codes",
            stats.documents,
            stats.name_terms,
            stats.heb_codes,
            stats.eng_codes
        );
        index
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.docs.len(),
            name_terms: self.names.len(),
            heb_codes: self.heb_codes.len(),
            eng_codes: self.eng_codes.len(),
        }
    }

    fn code_field(&self, lang: Language) -> &Postings<PhoneticCode> {
        match lang {
            Language::Heb => &self.heb_codes,
            Language::Eng => &self.eng_codes,
        }
    }

    fn resolve(&self, docs: Vec<usize>) -> Vec<Record> {
        docs.into_iter().map(|d| self.docs[d].clone()).collect()
    }
}

impl RecordIndex for InvertedIndex {
    fn lookup_text(&self, tokens: &[String]) -> Result<Vec<Record>, IndexError> {
        Ok(self.resolve(intersect(&self.names, tokens)))
    }

    fn lookup_code(
        &self,
        lang: Language,
        codes: &[PhoneticCode],
    ) -> Result<Vec<Record>, IndexError> {
        Ok(self.resolve(intersect(self.code_field(lang), codes)))
    }
}

fn phonetic_terms(tokens: &[String], lang: Language) -> impl Iterator<Item = PhoneticCode> + '_ {
    tokens
        .iter()
        .map(move |t| encode(t, lang))
        .filter(|c| !c.is_unencodable())
}

fn add_terms<K, I>(postings: &mut Postings<K>, doc: usize, terms: I)
where
    K: Eq + Hash + Clone,
    I: Iterator<Item = K>,
{
    let mut seen = HashSet::new();
    for term in terms {
        if seen.insert(term.clone()) {
            postings.entry(term).or_default().push(doc);
        }
    }
}

/// Documents present in the postings of every term, ascending. Empty for no terms.
fn intersect<K: Eq + Hash>(postings: &Postings<K>, terms: &[K]) -> Vec<usize> {
    let Some((first, rest)) = terms.split_first() else {
        return Vec::new();
    };
    let Some(base) = postings.get(first) else {
        return Vec::new();
    };
    let mut lists = Vec::with_capacity(rest.len());
    for term in rest {
        match postings.get(term) {
            Some(list) => lists.push(list),
            None => return Vec::new(),
        }
    }
    base.iter()
        .copied()
        .filter(|doc| lists.iter().all(|l| l.binary_search(doc).is_ok()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new(1, "Cohen, Moshe", "people").unwrap(),
            Record::new(2, "Cohn", "people").unwrap(),
            Record::new(3, "Kohen", "people").unwrap(),
            Record::new(4, "משה כהן", "people").unwrap(),
            Record::new(5, "Amsterdam", "place").unwrap(),
            Record::new(6, "Moshe Moshe", "people").unwrap(),
        ]
    }

    fn ids(rs: &[Record]) -> Vec<u64> {
        rs.iter().map(|r| r.id).collect()
    }

    #[test]
    fn text_lookup_is_conjunctive() {
        let ix = InvertedIndex::build(&records());
        let hits = ix.lookup_text(&["moshe".to_string()]).unwrap();
        assert_eq!(ids(&hits), vec![1, 6]);
        let hits = ix
            .lookup_text(&["moshe".to_string(), "cohen".to_string()])
            .unwrap();
        assert_eq!(ids(&hits), vec![1]);
        let hits = ix
            .lookup_text(&["moshe".to_string(), "levi".to_string()])
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn empty_lookup_returns_nothing() {
        let ix = InvertedIndex::build(&records());
        assert!(ix.lookup_text(&[]).unwrap().is_empty());
        assert!(ix.lookup_code(Language::Eng, &[]).unwrap().is_empty());
    }

    #[test]
    fn code_lookup_by_language_field() {
        let ix = InvertedIndex::build(&records());
        let hits = ix
            .lookup_code(Language::Eng, &[encode("Cohen", Language::Eng)])
            .unwrap();
        assert_eq!(ids(&hits), vec![1, 2]);
        let hits = ix
            .lookup_code(Language::Heb, &[encode("משה", Language::Heb)])
            .unwrap();
        assert_eq!(ids(&hits), vec![4]);
    }

    #[test]
    fn hebrew_codes_live_in_hebrew_field() {
        let ix = InvertedIndex::build(&records());
        let stats = ix.stats();
        assert_eq!(stats.documents, 6);
        // English tables give Hebrew names anchor-only codes such as כ000.
        assert!(
            ix.lookup_code(Language::Eng, &[encode("כהן", Language::Heb)])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn repeated_tokens_index_once() {
        let ix = InvertedIndex::build(&records());
        let hits = ix.lookup_text(&["moshe".to_string()]).unwrap();
        assert_eq!(hits.iter().filter(|r| r.id == 6).count(), 1);
    }
}
