use serde::{Deserialize, Serialize};

use crate::error::UnknownCharacterSet;

/// The fixed catalog of character sets available to string generation.
///
/// Each set is an immutable, sorted (by byte value) sequence of ASCII
/// characters. `Id`, `IdSymbol`, `HexLower` and `HexUpper` mix letters
/// with other characters and are therefore not alphabetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CharacterSet {
    Id,
    Numeric,
    Letter,
    LetterUpper,
    LetterLower,
    UpperNum,
    LowerNum,
    IdSymbol,
    HexLower,
    HexUpper,
}

const ID: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NUMERIC: &str = "0123456789";
const LETTER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const LETTER_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LETTER_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_NUM: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER_NUM: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SYMBOL: &str = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_abcdefghijklmnopqrstuvwxyz{|}~";
const HEX_LOWER: &str = "0123456789abcdef";
const HEX_UPPER: &str = "0123456789ABCDEF";

impl CharacterSet {
    /// The members of the set, sorted ascending by byte value.
    pub fn members(&self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// Catalog name, as accepted by [`CharacterSet::parse`].
    pub fn name(&self) -> &'static str {
        match self {
            CharacterSet::Id => "ID",
            CharacterSet::Numeric => "NUMERIC",
            CharacterSet::Letter => "LETTER",
            CharacterSet::LetterUpper => "LETTER_UPPER",
            CharacterSet::LetterLower => "LETTER_LOWER",
            CharacterSet::UpperNum => "UPPER_NUM",
            CharacterSet::LowerNum => "LOWER_NUM",
            CharacterSet::IdSymbol => "ID_SYMBOL",
            CharacterSet::HexLower => "HEX_LOWER",
            CharacterSet::HexUpper => "HEX_UPPER",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterSet::Id => ID,
            CharacterSet::Numeric => NUMERIC,
            CharacterSet::Letter => LETTER,
            CharacterSet::LetterUpper => LETTER_UPPER,
            CharacterSet::LetterLower => LETTER_LOWER,
            CharacterSet::UpperNum => UPPER_NUM,
            CharacterSet::LowerNum => LOWER_NUM,
            CharacterSet::IdSymbol => ID_SYMBOL,
            CharacterSet::HexLower => HEX_LOWER,
            CharacterSet::HexUpper => HEX_UPPER,
        }
    }

    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// True iff every member is a letter.
    pub fn is_alpha(&self) -> bool {
        self.members().iter().all(|b| b.is_ascii_alphabetic())
    }

    pub fn contains(&self, c: char) -> bool {
        u8::try_from(c)
            .map(|b| self.members().binary_search(&b).is_ok())
            .unwrap_or(false)
    }

    /// Strict lookup by catalog name (`ID`, `LETTER_LOWER`, ...).
    pub fn parse(name: &str) -> Result<Self, UnknownCharacterSet> {
        match name {
            "ID" => Ok(CharacterSet::Id),
            "NUMERIC" => Ok(CharacterSet::Numeric),
            "LETTER" => Ok(CharacterSet::Letter),
            "LETTER_UPPER" => Ok(CharacterSet::LetterUpper),
            "LETTER_LOWER" => Ok(CharacterSet::LetterLower),
            "UPPER_NUM" => Ok(CharacterSet::UpperNum),
            "LOWER_NUM" => Ok(CharacterSet::LowerNum),
            "ID_SYMBOL" => Ok(CharacterSet::IdSymbol),
            "HEX_LOWER" => Ok(CharacterSet::HexLower),
            "HEX_UPPER" => Ok(CharacterSet::HexUpper),
            other => Err(UnknownCharacterSet(other.to_string())),
        }
    }

    /// Lookup with the generation-side fallback: unknown names resolve to
    /// `Letter` rather than failing.
    pub fn parse_lossy(name: &str) -> Self {
        Self::parse(name).unwrap_or(CharacterSet::Letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_sorted() {
        for set in [
            CharacterSet::Id,
            CharacterSet::Numeric,
            CharacterSet::Letter,
            CharacterSet::LetterUpper,
            CharacterSet::LetterLower,
            CharacterSet::UpperNum,
            CharacterSet::LowerNum,
            CharacterSet::IdSymbol,
            CharacterSet::HexLower,
            CharacterSet::HexUpper,
        ] {
            let members = set.members();
            assert!(members.windows(2).all(|w| w[0] < w[1]), "{set:?}");
        }
    }

    #[test]
    fn only_letter_sets_are_alpha() {
        assert!(CharacterSet::Letter.is_alpha());
        assert!(CharacterSet::LetterUpper.is_alpha());
        assert!(CharacterSet::LetterLower.is_alpha());
        assert!(!CharacterSet::Id.is_alpha());
        assert!(!CharacterSet::Numeric.is_alpha());
        assert!(!CharacterSet::IdSymbol.is_alpha());
        assert!(!CharacterSet::HexLower.is_alpha());
    }

    #[test]
    fn parse_roundtrips_catalog_names() {
        assert_eq!(CharacterSet::parse("HEX_UPPER"), Ok(CharacterSet::HexUpper));
        assert_eq!(
            CharacterSet::parse("base64"),
            Err(UnknownCharacterSet("base64".to_string()))
        );
    }

    #[test]
    fn parse_lossy_falls_back_to_letter() {
        assert_eq!(CharacterSet::parse_lossy("NUMERIC"), CharacterSet::Numeric);
        assert_eq!(CharacterSet::parse_lossy("no-such-set"), CharacterSet::Letter);
    }

    #[test]
    fn contains_uses_membership() {
        assert!(CharacterSet::HexLower.contains('f'));
        assert!(!CharacterSet::HexLower.contains('g'));
        assert!(CharacterSet::IdSymbol.contains('~'));
        assert!(!CharacterSet::IdSymbol.contains(' '));
    }
}
