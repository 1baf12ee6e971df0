use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPalette {
    pub bg: Color32,
    pub text: Color32,
    pub border: Color32,
}

impl CategoryPalette {
    const fn new(bg: [u8; 3], text: [u8; 3], border: [u8; 3]) -> Self {
        Self {
            bg: Color32::from_rgb(bg[0], bg[1], bg[2]),
            text: Color32::from_rgb(text[0], text[1], text[2]),
            border: Color32::from_rgb(border[0], border[1], border[2]),
        }
    }

    pub fn has_light_text(&self) -> bool {
        self.text == Color32::WHITE
    }

    /// Translucent fill for chips and panels drawn on top of `bg`.
    pub fn overlay(&self) -> Color32 {
        if self.has_light_text() {
            Color32::from_black_alpha(76)
        } else {
            Color32::from_black_alpha(26)
        }
    }

    pub fn chip(&self) -> Color32 {
        if self.has_light_text() {
            Color32::from_white_alpha(51)
        } else {
            Color32::from_white_alpha(38)
        }
    }
}

const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];
const BLACK: [u8; 3] = [0x00, 0x00, 0x00];

const NORMAL: CategoryPalette = CategoryPalette::new([0xA8, 0xA8, 0x78], WHITE, [0x8B, 0x8B, 0x5F]);

pub fn palette_for(category: &str) -> CategoryPalette {
    match category.to_ascii_lowercase().as_str() {
        "fire" => CategoryPalette::new([0xF0, 0x80, 0x30], WHITE, [0xCC, 0x55, 0x00]),
        "water" => CategoryPalette::new([0x68, 0x90, 0xF0], WHITE, [0x4A, 0x6F, 0xA5]),
        "electric" => CategoryPalette::new([0xF8, 0xD0, 0x30], BLACK, [0xC4, 0x9E, 0x0E]),
        "grass" => CategoryPalette::new([0x78, 0xC8, 0x50], WHITE, [0x5B, 0xA0, 0x3D]),
        "ice" => CategoryPalette::new([0x98, 0xD8, 0xD8], BLACK, [0x73, 0xA8, 0xA8]),
        "fighting" => CategoryPalette::new([0xC0, 0x30, 0x28], WHITE, [0x8B, 0x1F, 0x1F]),
        "poison" => CategoryPalette::new([0xA0, 0x40, 0xA0], WHITE, [0x70, 0x2A, 0x70]),
        "ground" => CategoryPalette::new([0xE0, 0xC0, 0x68], BLACK, [0xA8, 0x98, 0x50]),
        "flying" => CategoryPalette::new([0xA8, 0x90, 0xF0], WHITE, [0x7A, 0x68, 0xB8]),
        "psychic" => CategoryPalette::new([0xF8, 0x58, 0x88], WHITE, [0xC4, 0x3A, 0x63]),
        "bug" => CategoryPalette::new([0xA8, 0xB8, 0x20], WHITE, [0x80, 0x86, 0x20]),
        "rock" => CategoryPalette::new([0xB8, 0xA0, 0x38], WHITE, [0x8B, 0x7A, 0x2A]),
        "ghost" => CategoryPalette::new([0x70, 0x58, 0x98], WHITE, [0x50, 0x40, 0x70]),
        "dragon" => CategoryPalette::new([0x70, 0x38, 0xF8], WHITE, [0x56, 0x28, 0xCC]),
        "dark" => CategoryPalette::new([0x70, 0x58, 0x48], WHITE, [0x50, 0x40, 0x30]),
        "steel" => CategoryPalette::new([0xB8, 0xB8, 0xD0], BLACK, [0x8B, 0x8B, 0xA8]),
        "fairy" => CategoryPalette::new([0xEE, 0x99, 0xAC], BLACK, [0xC4, 0x7A, 0x8E]),
        _ => NORMAL,
    }
}
