// Outfit and moodboard generation: prompt assembly plus the upstream
// text-to-image client.

pub mod generator;
pub mod prompt;
