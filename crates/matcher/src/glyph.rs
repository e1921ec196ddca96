//! Vibe tag to emoji lookup.

/// Shown when none of an item's tags has a glyph.
pub const DEFAULT_GLYPH: &str = "🛍️";

/// Known tags and their glyphs. Matching is exact and case-sensitive.
pub const GLYPHS: &[(&str, &str)] = &[
    ("boho", "🌸"),
    ("festival", "🎉"),
    ("beach", "🌊"),
    ("urban", "🏙️"),
    ("techwear", "🔌"),
    ("athletic", "👟"),
    ("cozy", "🧣"),
    ("comfort", "☕"),
    ("minimalist", "✨"),
    ("elegant", "💎"),
    ("classic", "🏛️"),
    ("cyberpunk", "🤖"),
    ("energetic", "⚡"),
    ("relaxed", "🧘"),
    ("vacation", "🌴"),
    ("vintage", "📜"),
    ("academic", "📚"),
];

/// Glyph of the first tag, in the item's own order, that has one.
pub fn glyph_for<S: AsRef<str>>(vibes: &[S]) -> &'static str {
    vibes
        .iter()
        .find_map(|tag| lookup(tag.as_ref()))
        .unwrap_or(DEFAULT_GLYPH)
}

fn lookup(tag: &str) -> Option<&'static str> {
    GLYPHS
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, glyph)| *glyph)
}
