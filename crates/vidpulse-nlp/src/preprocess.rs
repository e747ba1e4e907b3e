//! Comment text normalization applied before any classifier pass.

/// Common emoji rewritten to the word viewers mean by them, so the
/// downstream passes can treat them like any other token.
const EMOJI_TOKENS: &[(char, &str)] = &[
    ('\u{1F525}', "fire"),      // 🔥
    ('\u{2764}', "love"),       // ❤
    ('\u{1F60D}', "love"),      // 😍
    ('\u{1F602}', "funny"),     // 😂
    ('\u{1F44D}', "like"),      // 👍
    ('\u{1F44E}', "dislike"),   // 👎
    ('\u{1F621}', "angry"),     // 😡
    ('\u{1F62D}', "crying"),    // 😭
    ('\u{1F4AF}', "perfect"),   // 💯
    ('\u{1F697}', "car"),       // 🚗
    ('\u{1F3CE}', "racecar"),   // 🏎
];

/// Generic token for pictographs without a dedicated mapping.
pub(crate) const GENERIC_EMOJI_TOKEN: &str = "emoji";

fn is_pictographic(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1FAFF   // emoji, symbols, pictographs, transport
        | 0x2600..=0x27BF   // misc symbols, dingbats
        | 0x2B00..=0x2BFF   // arrows and stars used as emoji
        | 0xFE00..=0xFE0F   // variation selectors
        | 0x200D            // zero-width joiner
    )
}

/// Normalize one raw comment.
///
/// Trims the input and rewrites pictographic symbols into word tokens.
/// Empty or whitespace-only input yields an empty string. Pure: never
/// fails, never touches anything outside its arguments.
#[must_use]
pub fn preprocess(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if let Some(&(_, token)) = EMOJI_TOKENS.iter().find(|(e, _)| *e == c) {
            out.push(' ');
            out.push_str(token);
            out.push(' ');
        } else if matches!(u32::from(c), 0xFE00..=0xFE0F | 0x200D) {
            // Presentation modifiers carry no meaning of their own.
        } else if is_pictographic(c) {
            out.push(' ');
            out.push_str(GENERIC_EMOJI_TOKEN);
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    // Collapse the whitespace introduced around substituted tokens.
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
