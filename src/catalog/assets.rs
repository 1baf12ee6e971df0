const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

const UNIT_SCALE: f32 = 0.1;
const STAT_CEILING: f32 = 150.0;

/// Card artwork for an entry. Depends on the id alone.
pub fn asset_url(id: u32) -> String {
    format!("{SPRITE_BASE}/{id}.png")
}

pub fn dex_number(id: u32) -> String {
    format!("#{id:03}")
}

/// Decimetres to metres.
pub fn metres(height: u32) -> String {
    format!("{:.1} m", height as f32 * UNIT_SCALE)
}

/// Hectograms to kilograms.
pub fn kilograms(weight: u32) -> String {
    format!("{:.1} kg", weight as f32 * UNIT_SCALE)
}

pub fn stat_fraction(value: u32) -> f32 {
    (value as f32 / STAT_CEILING).clamp(0.0, 1.0)
}

pub fn humanize(label: &str) -> String {
    label.replacen('-', " ", 1)
}
