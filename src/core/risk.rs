// keyword risk flagging for incoming messages
// purely lexical: "i do not want to hurt myself" still flags, and that's fine.
// a false alarm costs a banner, a miss costs a lot more

// phrases are stored lowercase, matching is done on the lowercased input
const HIGH_RISK_PHRASES: [&str; 5] = [
    "i want to die",
    "kill myself",
    "suicide",
    "end my life",
    "hurt myself",
];

pub struct RiskClassifier;

impl RiskClassifier {
    /// true if the text contains any high risk phrase, ignoring case
    pub fn scan(text: &str) -> bool {
        Self::first_match(text).is_some()
    }

    /// the first phrase found in the text, for logging
    pub fn first_match(text: &str) -> Option<&'static str> {
        let lower = text.to_lowercase();

        HIGH_RISK_PHRASES
            .into_iter()
            .find(|phrase| lower.contains(phrase))
    }

    pub fn phrases() -> &'static [&'static str] {
        &HIGH_RISK_PHRASES
    }
}
