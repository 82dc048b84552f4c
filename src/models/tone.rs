//! Tone Catalog
//!
//! Tone identifiers are resolved against a remote catalog; the built-in list
//! below is the fallback when that catalog is empty or unreachable. Unknown
//! tone values stored in settings are passed through untouched, only the
//! wizard snaps a missing tone to the first catalog entry.

use serde::{Deserialize, Serialize};

/// One entry of the tone-of-voice catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToneOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
}

impl ToneOption {
    fn new(value: &str, label: &str, hint: &str, example: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            hint: Some(hint.to_string()),
            example: Some(example.to_string()),
        }
    }
}

/// Built-in tone catalog used when the remote one is unavailable
pub fn fallback_tone_options() -> Vec<ToneOption> {
    vec![
        ToneOption::new(
            "none",
            "No tone",
            "Default setting. Tone shaping is off.",
            "Thank you for your review!",
        ),
        ToneOption::new(
            "business",
            "Business",
            "Formal, official register.",
            "Thank you for your feedback. We value your opinion.",
        ),
        ToneOption::new(
            "joking",
            "Joking",
            "Light humor where appropriate.",
            "Thanks! Our warehouse did a little happy dance.",
        ),
        ToneOption::new(
            "serious",
            "Serious",
            "Restrained and matter-of-fact.",
            "Thank you. We have noted your remarks.",
        ),
        ToneOption::new(
            "supportive",
            "Supportive",
            "Reassuring and solution-oriented.",
            "Thank you for telling us. We will make this right.",
        ),
        ToneOption::new(
            "caring",
            "Caring",
            "Warm and attentive.",
            "Thank you! We hope the order serves you well.",
        ),
        ToneOption::new(
            "fun",
            "Fun",
            "Playful and energetic.",
            "Woohoo, thanks a bunch for the kind words!",
        ),
        ToneOption::new(
            "friendly",
            "Friendly",
            "Warm and approachable.",
            "Thanks for the review! Glad you liked it.",
        ),
        ToneOption::new(
            "chatty",
            "Chatty",
            "Conversational, informal.",
            "Hey, thanks! Drop by again any time.",
        ),
        ToneOption::new(
            "respectful",
            "Respectful",
            "Polite and courteous.",
            "We sincerely appreciate your review.",
        ),
        ToneOption::new(
            "poetic",
            "Poetic",
            "Lyrical phrasing.",
            "Your kind words brighten our day like morning light.",
        ),
        ToneOption::new(
            "dramatic",
            "Dramatic",
            "Expressive and emphatic.",
            "A thousand thanks! Your review made our week.",
        ),
        ToneOption::new(
            "scientific",
            "Scientific",
            "Precise and analytical.",
            "Thank you. Your observations have been recorded for analysis.",
        ),
    ]
}

/// Pick the effective catalog: the remote list when it has entries, the
/// built-in fallback otherwise
pub fn effective_tone_options(remote: Vec<ToneOption>) -> Vec<ToneOption> {
    if remote.is_empty() {
        fallback_tone_options()
    } else {
        remote
    }
}
