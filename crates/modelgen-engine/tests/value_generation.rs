use modelgen_core::CharacterSet;
use modelgen_engine::errors::GenerationError;
use modelgen_engine::random::RandomEngine;
use modelgen_engine::values::ValueGenerator;

#[test]
fn string_draws_only_charset_members() {
    let mut engine = RandomEngine::with_seed(91591);
    let mut values = ValueGenerator::new(&mut engine);
    let text = values.string(CharacterSet::LowerNum, 64).expect("string");
    assert_eq!(text.len(), 64);
    for ch in text.chars() {
        assert!(
            CharacterSet::LowerNum.contains(ch),
            "unexpected character {ch:?}"
        );
    }
}

#[test]
fn word_length_stays_in_default_bounds() {
    let mut engine = RandomEngine::with_seed(91591);
    let mut values = ValueGenerator::new(&mut engine);
    for _ in 0..50 {
        let word = values.word().expect("word");
        assert!((4..=10).contains(&word.len()));
        assert!(word.chars().all(|c| c.is_ascii_alphabetic()));
    }
}

#[test]
fn capitalized_word_has_capital_head_and_lower_tail() {
    let mut engine = RandomEngine::with_seed(5);
    let mut values = ValueGenerator::new(&mut engine);
    for _ in 0..20 {
        let word = values
            .capitalized_word(CharacterSet::Letter, 8)
            .expect("capitalized word");
        let mut chars = word.chars();
        assert!(chars.next().is_some_and(|c| c.is_ascii_uppercase()));
        assert!(chars.all(|c| c.is_ascii_lowercase()));
    }
}

#[test]
fn capitalized_word_rejects_non_alpha_charset() {
    let mut engine = RandomEngine::with_seed(5);
    let mut values = ValueGenerator::new(&mut engine);
    assert!(matches!(
        values.capitalized_word(CharacterSet::Numeric, 8),
        Err(GenerationError::NotAlphaCharset(_))
    ));
}

#[test]
fn composition_parts_are_positive_and_sum_to_target() {
    let mut engine = RandomEngine::with_seed(42);
    let mut values = ValueGenerator::new(&mut engine);
    for _ in 0..50 {
        let parts = values.composition(2, 10).expect("composition");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts.iter().sum::<i64>(), 10);
        assert!(parts.iter().all(|part| *part >= 1));
    }
    let parts = values.composition(5, 5).expect("tight composition");
    assert_eq!(parts, vec![1, 1, 1, 1, 1]);
}

#[test]
fn composition_single_part_is_the_target() {
    let mut engine = RandomEngine::with_seed(42);
    let mut values = ValueGenerator::new(&mut engine);
    assert_eq!(values.composition(1, 7).expect("one part"), vec![7]);
}

#[test]
fn composition_rejects_degenerate_arguments() {
    let mut engine = RandomEngine::with_seed(42);
    let mut values = ValueGenerator::new(&mut engine);
    assert!(matches!(
        values.composition(0, 10),
        Err(GenerationError::InvalidRange(_))
    ));
    assert!(matches!(
        values.composition(2, 0),
        Err(GenerationError::InvalidRange(_))
    ));
    // More parts than units to distribute.
    assert!(matches!(
        values.composition(6, 5),
        Err(GenerationError::InvalidRange(_))
    ));
}

#[test]
fn camel_case_words_honor_length_and_minimum() {
    let mut engine = RandomEngine::with_seed(91591);
    let mut values = ValueGenerator::new(&mut engine);
    for _ in 0..50 {
        let text = values
            .camel_case_words(CharacterSet::Letter, 20, 3)
            .expect("camel case");
        assert_eq!(text.len(), 20);
        assert!(text.chars().next().is_some_and(|c| c.is_ascii_uppercase()));

        // Word boundaries are the upper-case characters.
        let mut word_lengths = Vec::new();
        let mut current = 0_usize;
        for ch in text.chars() {
            if ch.is_ascii_uppercase() && current > 0 {
                word_lengths.push(current);
                current = 0;
            }
            current += 1;
        }
        word_lengths.push(current);
        assert!(word_lengths.iter().all(|len| *len >= 3));
    }
}

#[test]
fn camel_case_words_validate_arguments() {
    let mut engine = RandomEngine::with_seed(91591);
    let mut values = ValueGenerator::new(&mut engine);
    assert!(matches!(
        values.camel_case_words(CharacterSet::Letter, 10, 0),
        Err(GenerationError::InvalidLength(_))
    ));
    assert!(matches!(
        values.camel_case_words(CharacterSet::Letter, 4, 5),
        Err(GenerationError::InvalidLength(_))
    ));
    assert!(matches!(
        values.camel_case_words(CharacterSet::UpperNum, 10, 3),
        Err(GenerationError::NotAlphaCharset(_))
    ));
}

#[test]
fn uri_with_all_components_has_the_expected_shape() {
    let mut engine = RandomEngine::with_seed(91591);
    let mut values = ValueGenerator::new(&mut engine);
    for _ in 0..50 {
        let uri = values.uri_with(true, true, true, true).expect("uri");
        let (scheme, rest) = uri.split_once("://").expect("scheme separator");
        assert!(matches!(scheme, "http" | "ssh" | "ftp"));
        let host = rest.rsplit('@').next().expect("host part");
        assert!(host.starts_with("www."));
        assert!(host.contains(':'), "port expected in {uri:?}");
        assert!(uri.contains('?'), "query expected in {uri:?}");
        assert!(uri.contains('#'), "fragment expected in {uri:?}");
    }
}

#[test]
fn http_uri_never_carries_credentials() {
    let mut engine = RandomEngine::with_seed(91591);
    let mut values = ValueGenerator::new(&mut engine);
    for _ in 0..50 {
        let uri = values.http_uri(false, true, false, false).expect("uri");
        assert!(uri.starts_with("http://www."));
        assert!(!uri.contains('@'));
        assert!(!uri.contains('?'));
        assert!(!uri.contains('#'));
    }
}

#[test]
fn uri_fragment_is_percent_encoded() {
    let mut engine = RandomEngine::with_seed(8);
    let mut values = ValueGenerator::new(&mut engine);
    for _ in 0..100 {
        let uri = values.uri_with(false, false, false, true).expect("uri");
        let fragment = uri.split('#').nth(1).expect("fragment");
        for ch in fragment.chars() {
            assert!(
                ch.is_ascii_alphanumeric()
                    || "%-._~!$&'()*+,;=:@/?".contains(ch),
                "raw character {ch:?} in fragment {fragment:?}"
            );
        }
    }
}

#[test]
fn uuid_is_version_4_format_and_seed_stable() {
    let mut a = RandomEngine::with_seed(99);
    let mut b = RandomEngine::with_seed(99);
    let first = ValueGenerator::new(&mut a).uuid();
    let second = ValueGenerator::new(&mut b).uuid();
    assert_eq!(first, second);

    let parsed = uuid::Uuid::parse_str(&first).expect("well-formed uuid");
    assert_eq!(parsed.get_version_num(), 4);
}
