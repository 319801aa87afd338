//! Splitting surface names into lowercase word tokens

use std::collections::HashSet;

/// Lowercase word fragments of a surface name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameTokens {
    tokens: HashSet<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
}

fn class_of(c: char) -> Option<CharClass> {
    if c.is_lowercase() {
        Some(CharClass::Lower)
    } else if c.is_uppercase() {
        Some(CharClass::Upper)
    } else if c.is_numeric() {
        Some(CharClass::Digit)
    } else if c.is_alphanumeric() {
        // caseless letters
        Some(CharClass::Lower)
    } else {
        None
    }
}

impl NameTokens {
    /// Split on non-alphanumeric characters, case transitions and
    /// letter/digit boundaries.
    ///
    /// `"Oak_Leaves"` gives `oak`, `leaves`; `"redstoneWire"` gives
    /// `redstone`, `wire`; `"HTMLBlock2"` gives `html`, `block`, `2`.
    pub fn split(name: &str) -> Self {
        let chars: Vec<char> = name.chars().collect();
        let mut tokens = HashSet::new();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            let Some(class) = class_of(c) else {
                push_token(&mut tokens, &mut current);
                continue;
            };

            if let Some(prev) = i.checked_sub(1).and_then(|p| class_of(chars[p])) {
                let next = chars.get(i + 1).copied().and_then(class_of);
                let boundary = match (prev, class) {
                    (CharClass::Lower, CharClass::Upper) => true,
                    (CharClass::Upper, CharClass::Upper) => next == Some(CharClass::Lower),
                    (CharClass::Digit, CharClass::Digit) => false,
                    (CharClass::Digit, _) | (_, CharClass::Digit) => true,
                    _ => false,
                };
                if boundary {
                    push_token(&mut tokens, &mut current);
                }
            }

            current.extend(c.to_lowercase());
        }
        push_token(&mut tokens, &mut current);

        Self { tokens }
    }

    /// Exact token membership, never a substring match
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn contains_any(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.contains(t))
    }

    pub fn contains_all(&self, tokens: &[&str]) -> bool {
        tokens.iter().all(|t| self.contains(t))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn push_token(tokens: &mut HashSet<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.insert(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(name: &str) -> Vec<String> {
        let tokens = NameTokens::split(name);
        let mut v: Vec<String> = tokens.tokens.into_iter().collect();
        v.sort();
        v
    }

    #[test]
    fn test_underscores() {
        assert_eq!(sorted("Oak_Leaves"), vec!["leaves", "oak"]);
        assert_eq!(sorted("Water_Flowing"), vec!["flowing", "water"]);
    }

    #[test]
    fn test_case_transitions() {
        assert_eq!(sorted("redstoneWire"), vec!["redstone", "wire"]);
        assert_eq!(sorted("HTMLBlock2"), vec!["2", "block", "html"]);
        assert_eq!(sorted("GLASS"), vec!["glass"]);
    }

    #[test]
    fn test_separators_and_duplicates() {
        assert_eq!(sorted("  stone--stone  brick "), vec!["brick", "stone"]);
        assert!(NameTokens::split("___").is_empty());
    }

    #[test]
    fn test_no_substring_matches() {
        let tokens = NameTokens::split("Firefly_Bush");
        assert!(!tokens.contains("fire"));
        assert!(tokens.contains("firefly"));
        assert!(tokens.contains_any(&["bush", "fern"]));
        assert!(!tokens.contains_all(&["bush", "fern"]));
    }
}
