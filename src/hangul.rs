//! Precomposed Hangul syllable classification and jamo decomposition.
//!
//! Ref: https://www.unicode.org/charts/PDF/UAC00.pdf

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;

const N_JONG: u32 = 28;
const N_JUNG: u32 = 21;

/// Leading consonants (초성), in the order used by the syllable arithmetic.
const CHO: [char; 19] = [
    'ᄀ', 'ᄁ', 'ᄂ', 'ᄃ', 'ᄄ', 'ᄅ', 'ᄆ', 'ᄇ', 'ᄈ', 'ᄉ', 'ᄊ', 'ᄋ', 'ᄌ', 'ᄍ', 'ᄎ', 'ᄏ', 'ᄐ', 'ᄑ', 'ᄒ',
];

/// Medial vowels (중성).
const JUNG: [char; 21] = [
    'ᅡ', 'ᅢ', 'ᅣ', 'ᅤ', 'ᅥ', 'ᅦ', 'ᅧ', 'ᅨ', 'ᅩ', 'ᅪ', 'ᅫ', 'ᅬ', 'ᅭ', 'ᅮ', 'ᅯ', 'ᅰ', 'ᅱ', 'ᅲ', 'ᅳ',
    'ᅴ', 'ᅵ',
];

/// Trailing consonants (종성). Index 0 means "no final" and is represented
/// by the sentinel `'\0'`, which callers exclude from indexing/counting.
const JONG: [char; 28] = [
    '\0', 'ᆨ', 'ᆩ', 'ᆪ', 'ᆫ', 'ᆬ', 'ᆭ', 'ᆮ', 'ᆯ', 'ᆰ', 'ᆱ', 'ᆲ', 'ᆳ', 'ᆴ', 'ᆵ', 'ᆶ', 'ᆷ', 'ᆸ', 'ᆹ',
    'ᆺ', 'ᆻ', 'ᆼ', 'ᆽ', 'ᆾ', 'ᆿ', 'ᇀ', 'ᇁ', 'ᇂ',
];

/// True for precomposed Hangul syllables `U+AC00..=U+D7A3`.
pub fn character_is_korean(c: char) -> bool {
    let cp = c as u32;
    (HANGUL_BASE..=HANGUL_LAST).contains(&cp)
}

/// Decomposes a precomposed Hangul syllable into its (initial, medial,
/// final) jamo triple. The final consonant is `'\0'` when the syllable has
/// no trailing consonant.
///
/// Returns `None` for code points outside the precomposed syllable block.
pub fn decompose(c: char) -> Option<(char, char, char)> {
    if !character_is_korean(c) {
        return None;
    }
    let offset = c as u32 - HANGUL_BASE;
    let jong_idx = offset % N_JONG;
    let jung_idx = (offset / N_JONG) % N_JUNG;
    let cho_idx = (offset / N_JONG) / N_JUNG;
    Some((
        CHO[cho_idx as usize],
        JUNG[jung_idx as usize],
        JONG[jong_idx as usize],
    ))
}

/// Edit distance between two jamo triples: each of (cho, jung, jong) that
/// differs contributes 1, in `[0, 3]`.
pub fn triple_distance(a: (char, char, char), b: (char, char, char)) -> u32 {
    let mut d = 0;
    if a.0 != b.0 {
        d += 1;
    }
    if a.1 != b.1 {
        d += 1;
    }
    if a.2 != b.2 {
        d += 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_ga() {
        // 가 = cho 'ᄀ', jung 'ᅡ', no final
        let (cho, jung, jong) = decompose('가').unwrap();
        assert_eq!(cho, 'ᄀ');
        assert_eq!(jung, 'ᅡ');
        assert_eq!(jong, '\0');
    }

    #[test]
    fn decompose_gang() {
        // 강 = cho 'ᄀ', jung 'ᅡ', final 'ᆼ'
        let (cho, jung, jong) = decompose('강').unwrap();
        assert_eq!(cho, 'ᄀ');
        assert_eq!(jung, 'ᅡ');
        assert_eq!(jong, 'ᆼ');
    }

    #[test]
    fn non_korean_is_not_korean() {
        assert!(!character_is_korean('a'));
        assert!(!character_is_korean('1'));
        assert!(decompose('a').is_none());
    }

    #[test]
    fn triple_distance_counts_differing_components() {
        let a = decompose('가').unwrap();
        let b = decompose('강').unwrap();
        assert_eq!(triple_distance(a, b), 1);
        assert_eq!(triple_distance(a, a), 0);
    }
}
