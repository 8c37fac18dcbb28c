//! Emoji shortcode table
//!
//! Read-only data consulted by the emoji rule. Aliases are matched exactly and
//! case-sensitively; when two entries share an alias the first one wins.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One emoji glyph and the shortcodes that produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiEntry {
    pub emoji: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
}

const fn entry(
    emoji: &'static str,
    description: &'static str,
    aliases: &'static [&'static str],
) -> EmojiEntry {
    EmojiEntry {
        emoji,
        description,
        aliases,
    }
}

pub static EMOJI_LIST: &[EmojiEntry] = &[
    entry("\u{1F600}", "grinning face", &["grinning"]),
    entry("\u{1F603}", "grinning face with big eyes", &["smiley"]),
    entry("\u{1F604}", "grinning face with smiling eyes", &["smile"]),
    entry("\u{1F601}", "beaming face with smiling eyes", &["grin"]),
    entry("\u{1F606}", "grinning squinting face", &["laughing", "satisfied"]),
    entry("\u{1F605}", "grinning face with sweat", &["sweat_smile"]),
    entry("\u{1F602}", "face with tears of joy", &["joy"]),
    entry("\u{1F642}", "slightly smiling face", &["slightly_smiling_face"]),
    entry("\u{1F609}", "winking face", &["wink"]),
    entry("\u{1F60A}", "smiling face with smiling eyes", &["blush"]),
    entry("\u{1F60D}", "smiling face with heart-eyes", &["heart_eyes"]),
    entry("\u{1F618}", "face blowing a kiss", &["kissing_heart"]),
    entry("\u{1F60E}", "smiling face with sunglasses", &["sunglasses"]),
    entry("\u{1F914}", "thinking face", &["thinking"]),
    entry("\u{1F610}", "neutral face", &["neutral_face"]),
    entry("\u{1F644}", "face with rolling eyes", &["roll_eyes"]),
    entry("\u{1F62E}", "face with open mouth", &["open_mouth"]),
    entry("\u{1F634}", "sleeping face", &["sleeping"]),
    entry("\u{1F61B}", "face with tongue", &["stuck_out_tongue"]),
    entry("\u{1F622}", "crying face", &["cry"]),
    entry("\u{1F62D}", "loudly crying face", &["sob"]),
    entry("\u{1F621}", "pouting face", &["rage", "pout"]),
    entry("\u{1F631}", "face screaming in fear", &["scream"]),
    entry("\u{1F973}", "partying face", &["partying_face"]),
    entry("\u{1F44D}", "thumbs up", &["+1", "thumbsup"]),
    entry("\u{1F44E}", "thumbs down", &["-1", "thumbsdown"]),
    entry("\u{1F44F}", "clapping hands", &["clap"]),
    entry("\u{1F64C}", "raising hands", &["raised_hands"]),
    entry("\u{1F64F}", "folded hands", &["pray"]),
    entry("\u{1F44B}", "waving hand", &["wave"]),
    entry("\u{1F44C}", "OK hand", &["ok_hand"]),
    entry("\u{270C}\u{FE0F}", "victory hand", &["v"]),
    entry("\u{1F4AA}", "flexed biceps", &["muscle"]),
    entry("\u{1F440}", "eyes", &["eyes"]),
    entry("\u{2764}\u{FE0F}", "red heart", &["heart"]),
    entry("\u{1F494}", "broken heart", &["broken_heart"]),
    entry("\u{1F49C}", "purple heart", &["purple_heart"]),
    entry("\u{1F499}", "blue heart", &["blue_heart"]),
    entry("\u{1F49A}", "green heart", &["green_heart"]),
    entry("\u{1F49B}", "yellow heart", &["yellow_heart"]),
    entry("\u{1F525}", "fire", &["fire"]),
    entry("\u{2728}", "sparkles", &["sparkles"]),
    entry("\u{2B50}", "star", &["star"]),
    entry("\u{1F31F}", "glowing star", &["star2"]),
    entry("\u{26A1}", "high voltage", &["zap"]),
    entry("\u{2600}\u{FE0F}", "sun", &["sunny"]),
    entry("\u{1F308}", "rainbow", &["rainbow"]),
    entry("\u{2614}", "umbrella with rain drops", &["umbrella"]),
    entry("\u{2744}\u{FE0F}", "snowflake", &["snowflake"]),
    entry("\u{1F389}", "party popper", &["tada"]),
    entry("\u{1F381}", "wrapped gift", &["gift"]),
    entry("\u{1F680}", "rocket", &["rocket"]),
    entry("\u{1F4A1}", "light bulb", &["bulb"]),
    entry("\u{1F4DD}", "memo", &["memo", "pencil"]),
    entry("\u{1F4CC}", "pushpin", &["pushpin"]),
    entry("\u{1F4CE}", "paperclip", &["paperclip"]),
    entry("\u{1F4C5}", "calendar", &["date"]),
    entry("\u{1F50D}", "magnifying glass tilted left", &["mag"]),
    entry("\u{1F512}", "locked", &["lock"]),
    entry("\u{1F511}", "key", &["key"]),
    entry("\u{1F41B}", "bug", &["bug"]),
    entry("\u{1F4A5}", "collision", &["boom", "collision"]),
    entry("\u{1F4AF}", "hundred points", &["100"]),
    entry("\u{2705}", "check mark button", &["white_check_mark"]),
    entry("\u{2714}\u{FE0F}", "check mark", &["heavy_check_mark"]),
    entry("\u{274C}", "cross mark", &["x"]),
    entry("\u{26A0}\u{FE0F}", "warning", &["warning"]),
    entry("\u{2753}", "question mark", &["question"]),
    entry("\u{2757}", "exclamation mark", &["exclamation", "heavy_exclamation_mark"]),
    entry("\u{1F6A7}", "construction", &["construction"]),
    entry("\u{2615}", "hot beverage", &["coffee"]),
    entry("\u{1F355}", "pizza", &["pizza"]),
    entry("\u{1F34E}", "red apple", &["apple"]),
    entry("\u{1F436}", "dog face", &["dog"]),
    entry("\u{1F431}", "cat face", &["cat"]),
    entry("\u{1F98A}", "fox", &["fox_face"]),
    entry("\u{1F422}", "turtle", &["turtle"]),
    entry("\u{1F980}", "crab", &["crab"]),
];

static ALIAS_INDEX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for item in EMOJI_LIST {
        for alias in item.aliases {
            index.entry(*alias).or_insert(item.emoji);
        }
    }
    index
});

/// Glyph registered for `shortcode`, if any.
pub fn find_emoji(shortcode: &str) -> Option<&'static str> {
    ALIAS_INDEX.get(shortcode).copied()
}
