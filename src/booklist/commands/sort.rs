//! Persistent sorting of the collection.
//!
//! Sorting rewrites the collection order (it is not a view transform). Comparison follows
//! the usual locale collation levels for Latin text:
//!
//! 1. base letters, ignoring case and accents (`"émile" ~ "Emile"`)
//! 2. accents: unaccented before accented (`"cote" < "côte"`)
//! 3. case: lowercase before uppercase (`"dune" < "Dune"`)
//!
//! At the first level spaces sort before punctuation, punctuation before digits and
//! digits before letters. `æ`, `œ` and `ß` count as `ae`, `oe` and `ss`.
//!
//! The sort is stable, so books comparing equal keep their relative order.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Book, SortKey};
use std::cmp::Ordering;

pub fn run(books: &mut [Book], key: SortKey) -> Result<CmdResult> {
    let before: Vec<_> = books.iter().map(|b| b.id).collect();
    books.sort_by(|a, b| collate(key.field(a), key.field(b)));
    let changed = books.iter().map(|b| b.id).ne(before);

    let mut result = CmdResult::default();
    if changed {
        result = result.changed();
        result.add_message(CmdMessage::success(format!("Sorted by {}", key)));
    } else {
        result.add_message(CmdMessage::info(format!("Already sorted by {}", key)));
    }
    Ok(result)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    primary: Vec<(CharClass, char)>,
    secondary: Vec<bool>,
    tertiary: Vec<bool>,
}

/// Primary ordering between kinds of characters: spaces, then punctuation, then digits,
/// then letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Space,
    Punctuation,
    Digit,
    Letter,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Space
        } else if c.is_numeric() {
            CharClass::Digit
        } else if c.is_alphabetic() {
            CharClass::Letter
        } else {
            CharClass::Punctuation
        }
    }
}

impl CollationKey {
    fn new(s: &str) -> Self {
        let mut key = CollationKey {
            primary: Vec::with_capacity(s.len()),
            secondary: Vec::with_capacity(s.len()),
            tertiary: Vec::with_capacity(s.len()),
        };
        for c in s.chars() {
            let lower = c.to_lowercase().next().unwrap_or(c);
            let upper = c != lower;
            match expansion(lower) {
                Some(letters) => {
                    for base in letters.chars() {
                        key.push(base, true, upper);
                    }
                }
                None => {
                    let base = base_letter(lower);
                    key.push(base, base != lower, upper);
                }
            }
        }
        key
    }

    fn push(&mut self, base: char, accented: bool, upper: bool) {
        self.primary.push((CharClass::of(base), base));
        self.secondary.push(accented);
        self.tertiary.push(upper);
    }
}

/// Ligatures and letters that collate as two base letters.
fn expansion(c: char) -> Option<&'static str> {
    match c {
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ß' => Some("ss"),
        _ => None,
    }
}

/// Locale-style comparison of two strings.
pub fn collate(a: &str, b: &str) -> Ordering {
    CollationKey::new(a)
        .cmp(&CollationKey::new(b))
        .then_with(|| a.cmp(b))
}

fn base_letter(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
