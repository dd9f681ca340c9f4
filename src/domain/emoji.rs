/// Icon for chores that match no rule
pub const DEFAULT_ICON: &str = "✅";

/// One row of the classifier table: any keyword selects the icon
struct Rule {
    keywords: &'static [&'static str],
    icon: &'static str,
}

/// Evaluated top to bottom. Compound keywords must sit above the generic
/// keywords they contain ("garbage truck" before "garbage", "card" before "car").
const RULES: &[Rule] = &[
    Rule { keywords: &["hair"], icon: "💈" },
    Rule { keywords: &["garbage truck"], icon: "🗑️🚛" },
    Rule { keywords: &["garbage", "trash"], icon: "🗑️" },
    Rule { keywords: &["card"], icon: "🏞️" },
    Rule { keywords: &["call"], icon: "☎️" },
    Rule { keywords: &["dish"], icon: "🍽️" },
    Rule { keywords: &["homework"], icon: "📚" },
    Rule { keywords: &["exercise", "workout"], icon: "💪" },
    Rule { keywords: &["dog", "walk"], icon: "🐕" },
    Rule { keywords: &["tablet", "vitamin"], icon: "💊" },
    Rule { keywords: &["car", "drive"], icon: "🚗" },
    Rule { keywords: &["piano", "music"], icon: "🎼" },
    Rule { keywords: &["violin"], icon: "🎻" },
    Rule { keywords: &["money", "cash", "stock"], icon: "💲" },
    Rule { keywords: &["rumi"], icon: "🐶" },
    Rule { keywords: &["library", "book"], icon: "📚" },
    Rule { keywords: &["holiday", "vacation"], icon: "🏖️" },
    Rule { keywords: &["water"], icon: "💧" },
];

/// Pick the icon for a chore title (case-insensitive substring match, first rule wins)
pub fn classify(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|rule| rule.icon)
        .unwrap_or(DEFAULT_ICON)
}
