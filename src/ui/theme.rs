use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0x89, 0xb4, 0xfa);
pub const BORDER: Color = Color::Rgb(0x45, 0x47, 0x5a);
pub const DIM: Color = Color::Rgb(0x58, 0x5b, 0x70);
pub const SELECTED_BG: Color = Color::Rgb(0x31, 0x32, 0x44);

/// Parse a palette entry: a few named colors or `#rrggbb`.
pub fn parse_color(name: &str) -> Color {
    match name.trim().to_ascii_lowercase().as_str() {
        "green" => Color::Rgb(0xa6, 0xe3, 0xa1),
        "pink" => Color::Rgb(0xf5, 0xc2, 0xe7),
        "yellow" => Color::Rgb(0xf9, 0xe2, 0xaf),
        "blue" => Color::Rgb(0x89, 0xb4, 0xfa),
        "gray" | "grey" => Color::Rgb(0x93, 0x99, 0xb2),
        other => {
            let hex = other.trim_start_matches('#');
            if hex.len() == 6
                && hex.is_ascii()
                && let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                )
            {
                return Color::Rgb(r, g, b);
            }
            Color::White
        }
    }
}

/// Hover highlight color for each of `count` cells, drawn at random from the
/// configured palette.
pub fn cell_colors(palette: &[String], count: usize) -> Vec<Color> {
    let palette: Vec<Color> = palette.iter().map(|c| parse_color(c)).collect();
    if palette.is_empty() {
        return vec![ACCENT; count];
    }
    let mut rng = SmallRng::from_entropy();
    (0..count)
        .map(|_| palette[rng.gen_range(0..palette.len())])
        .collect()
}
