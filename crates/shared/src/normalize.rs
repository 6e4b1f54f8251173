/// Canonical form of an email for storage and lookup: trimmed, lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-folded display name used for ordering and substring matching.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Initial key of a display name: the first character of each word,
/// with Hangul syllables reduced to their leading consonant (choseong)
/// so Korean names match by consonant initials.
pub fn initial_key(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .map(|c| choseong(c).unwrap_or_else(|| c.to_lowercase().next().unwrap_or(c)))
        .collect()
}

const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

fn choseong(c: char) -> Option<char> {
    let code = c as u32;
    // Hangul syllable block: U+AC00..=U+D7A3, 588 syllables per choseong
    if !(0xAC00..=0xD7A3).contains(&code) {
        return None;
    }

    CHOSEONG.get(((code - 0xAC00) / 588) as usize).copied()
}
