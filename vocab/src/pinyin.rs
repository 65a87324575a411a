//! Tone-number pinyin to diacritic pinyin.
//!
//! Each run of letters directly followed by a tone digit is treated as one
//! syllable: `xue2 xi2` and `xue2xi2` both normalize. Digits `1`-`4` place a
//! tone mark; `5` and `0` mark the neutral tone and are dropped. `v` and `u:`
//! are spelled `ü` inside toned syllables. Text that carries no tone digits
//! passes through unchanged, so already-marked pinyin is left alone.
//!
//! Marks are attached as combining characters and the result is composed to
//! NFC, so `ü` + caron comes out as the single code point `ǚ`.

use unicode_normalization::UnicodeNormalization;

const MACRON: char = '\u{0304}';
const ACUTE: char = '\u{0301}';
const CARON: char = '\u{030C}';
const GRAVE: char = '\u{0300}';

/// Normalize every tone-numbered syllable in `input`.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut syllable = String::new();

    for c in input.chars() {
        if is_syllable_char(c) {
            syllable.push(c);
            continue;
        }

        match tone_number(c) {
            Some(tone) if !syllable.is_empty() => {
                out.push_str(&apply_tone(&syllable, tone));
            }
            _ => {
                out.push_str(&syllable);
                out.push(c);
            }
        }
        syllable.clear();
    }
    out.push_str(&syllable);

    out.nfc().collect()
}

fn is_syllable_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ':' | 'ü' | 'Ü' | 'ê' | 'Ê')
}

fn tone_number(c: char) -> Option<u8> {
    match c {
        '0' => Some(5),
        '1'..='5' => c.to_digit(10).map(|d| d as u8),
        _ => None,
    }
}

fn tone_mark(tone: u8) -> Option<char> {
    match tone {
        1 => Some(MACRON),
        2 => Some(ACUTE),
        3 => Some(CARON),
        4 => Some(GRAVE),
        _ => None,
    }
}

fn spell_umlaut(syllable: &str) -> String {
    syllable
        .replace("u:", "ü")
        .replace("U:", "Ü")
        .replace('v', "ü")
        .replace('V', "Ü")
}

fn is_vowel(c: char) -> bool {
    matches!(fold_case(c), 'a' | 'e' | 'ê' | 'i' | 'o' | 'u' | 'ü')
}

fn fold_case(c: char) -> char {
    match c {
        'Ü' => 'ü',
        'Ê' => 'ê',
        _ => c.to_ascii_lowercase(),
    }
}

/// Index of the char that carries the tone mark.
///
/// `a`, `e` and `ê` always take it, `o` takes it in `ou`, otherwise the last
/// vowel does. Syllabic nasals (`m2`, `ng2`) mark the nasal.
fn mark_position(chars: &[char]) -> Option<usize> {
    let lower: Vec<char> = chars.iter().copied().map(fold_case).collect();

    if let Some(i) = lower.iter().position(|&c| matches!(c, 'a' | 'e' | 'ê')) {
        return Some(i);
    }
    if let Some(i) = lower.windows(2).position(|w| w == ['o', 'u']) {
        return Some(i);
    }
    if let Some(i) = chars.iter().rposition(|&c| is_vowel(c)) {
        return Some(i);
    }
    lower.iter().position(|&c| c == 'm' || c == 'n')
}

fn apply_tone(syllable: &str, tone: u8) -> String {
    let spelled = spell_umlaut(syllable);
    let Some(mark) = tone_mark(tone) else {
        return spelled;
    };

    let chars: Vec<char> = spelled.chars().collect();
    let Some(at) = mark_position(&chars) else {
        return spelled;
    };

    let mut out = String::with_capacity(spelled.len() + 2);
    for (i, c) in chars.iter().enumerate() {
        out.push(*c);
        if i == at {
            out.push(mark);
        }
    }
    out
}
