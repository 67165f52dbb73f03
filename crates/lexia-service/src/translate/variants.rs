//! Heuristics that derive extra translation variants from a primary one.

use lexia_entity::folder::Language;

/// Confidence reported for the provider's primary translation.
pub const PRIMARY_CONFIDENCE: f32 = 0.95;
/// Back-translation confidence below which alternatives are requested.
pub const ALTERNATIVES_THRESHOLD: f32 = 0.85;
/// Confidence of a translation routed through a pivot language.
pub const PIVOT_CONFIDENCE: f32 = 0.75;
/// Confidence of a differing re-request.
pub const REREQUEST_CONFIDENCE: f32 = 0.80;
/// Confidence of the formal-register variant.
pub const FORMAL_CONFIDENCE: f32 = 0.85;
/// Confidence of the regional variant.
pub const REGIONAL_CONFIDENCE: f32 = 0.80;
/// Confidence of the simplified variant.
pub const SIMPLIFIED_CONFIDENCE: f32 = 0.75;
/// Maximum number of variants besides the primary one.
pub const MAX_EXTRA_VARIANTS: usize = 3;
/// Languages tried, in order, as pivots.
pub const PIVOT_LANGUAGES: [Language; 3] = [Language::French, Language::Spanish, Language::German];

fn words(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Whether two texts are equal ignoring case, or share more than 80% of words.
pub fn is_text_similar(a: &str, b: &str) -> bool {
    if a.trim().to_lowercase() == b.trim().to_lowercase() {
        return true;
    }
    let a = words(a);
    let b = words(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let common = a.iter().filter(|w| b.contains(w)).count();
    common as f32 / a.len().max(b.len()) as f32 > 0.8
}

/// Scores a translation by how much of the original survives a round trip.
///
/// Ranges from 0.6 (no overlap) to 0.9, or 0.95 for an exact match.
pub fn translation_confidence(original: &str, back_translated: &str) -> f32 {
    let original_lower = original.trim().to_lowercase();
    if original_lower == back_translated.trim().to_lowercase() {
        return PRIMARY_CONFIDENCE;
    }
    let original = words(original);
    if original.is_empty() {
        return 0.5;
    }
    let back = words(back_translated);
    let common = original.iter().filter(|w| back.contains(w)).count();
    let similarity = common as f32 / original.len() as f32;
    (0.6 + similarity * 0.3).min(PRIMARY_CONFIDENCE)
}

/// The primary translation marked as formal register, for languages that have one.
pub fn formal_variant(text: &str, to: Language) -> Option<String> {
    let marker = match to {
        Language::German => "förmlich",
        Language::French => "formel",
        Language::Spanish => "formal",
        Language::Japanese => "敬語",
        Language::Russian => "формальный",
        _ => return None,
    };
    Some(format!("{text} ({marker})"))
}

/// The primary translation marked with a regional flavour, where one is common.
pub fn regional_variant(text: &str, to: Language) -> Option<String> {
    let marker = match to {
        Language::English => "UK",
        Language::Spanish => "MX",
        Language::Chinese => "繁体",
        _ => return None,
    };
    Some(format!("{text} ({marker})"))
}

/// Long texts with many words or long sentences.
pub fn is_complex_text(text: &str) -> bool {
    let word_count = text.split_whitespace().count();
    let sentences = text.matches(['.', '!', '?']).count().max(1);
    word_count > 100 || word_count as f32 / sentences as f32 > 20.0
}

/// The simplified variant, offered only for long complex originals.
pub fn simplified_variant(original: &str, primary: &str) -> Option<String> {
    (original.chars().count() > 100 && is_complex_text(original))
        .then(|| format!("{primary} (simplified)"))
}
