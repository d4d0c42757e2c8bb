// Prompt assembly for the generation endpoints. Pure string building over
// two fixed lookup tables; unknown keys pass through verbatim.

use serde::{Deserialize, Serialize};

/// Category list interpolated when an owner has no stored items yet.
pub const DEFAULT_CATEGORIES: &str = "tops, bottoms, dresses, shoes";

const DEFAULT_VIBE: &str = "colorful";

/// Quiz answers driving outfit generation. Every field arrives as free text
/// and is interpolated without enum validation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OutfitPreferences {
    pub trends: String,
    pub season: String,
    pub weather: String,
    pub occasion: String,
    pub voice_preference: Option<String>,
}

/// Maps a style vibe key to its descriptive phrase.
pub fn style_phrase(trends: &str) -> &str {
    match trends {
        "casual" => "casual comfortable everyday",
        "formal" => "elegant formal sophisticated",
        "sporty" => "athletic sporty activewear",
        "trendy" => "trendy fashionable modern",
        "classic" => "classic timeless elegant",
        other => other,
    }
}

/// Maps a weather condition key to its descriptive phrase.
pub fn weather_phrase(weather: &str) -> &str {
    match weather {
        "hot" => "light breathable summer",
        "warm" => "comfortable spring",
        "mild" => "layered transitional",
        "cool" => "cozy autumn",
        "cold" => "warm winter layered",
        other => other,
    }
}

/// Builds the outfit prompt from quiz preferences and the owner's stored
/// category labels.
pub fn outfit_prompt(preferences: &OutfitPreferences, categories: &[String]) -> String {
    let style = style_phrase(&preferences.trends);
    let weather = weather_phrase(&preferences.weather);
    let season = &preferences.season;
    let occasion = &preferences.occasion;
    let vibe = preferences
        .voice_preference
        .as_deref()
        .filter(|vibe| !vibe.is_empty())
        .unwrap_or(DEFAULT_VIBE);
    let wardrobe = if categories.is_empty() {
        DEFAULT_CATEGORIES.to_string()
    } else {
        categories.join(", ")
    };

    format!(
        "professional fashion illustration, full body outfit, {style} style, \
         {season} season, {weather} weather, {occasion} outfit, {vibe} aesthetic, \
         wardrobe pieces: {wardrobe}, fashion sketch, clean white background, \
         detailed clothing design, high quality"
    )
}

/// Builds the moodboard prompt from the request's free-text fields.
pub fn moodboard_prompt(theme: &str, colors: &str, style: &str) -> String {
    format!(
        "fashion moodboard collage, {theme} aesthetic, {colors} color palette, \
         {style} style, outfit inspirations, accessories, textures, fabric swatches, \
         trendy fashion design board, professional styling, pinterest aesthetic, \
         high quality"
    )
}
