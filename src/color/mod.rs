use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Parse a CSS-style hex color
///
/// Accepts `#rrggbb`, `#rgb` and the same forms without the leading `#`.
pub fn parse_hex(value: &str) -> Option<Rgb> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if !digits.chars().all(|digit| digit.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        6 => u32::from_str_radix(digits, 16).ok().map(rgb_from_u32),
        3 => {
            let mut channels = [0u8; 3];
            for (channel, digit) in channels.iter_mut().zip(digits.chars()) {
                #[allow(clippy::cast_possible_truncation)]
                let nibble = digit.to_digit(16)? as u8;
                *channel = (nibble << 4) | nibble;
            }
            Some(Rgb {
                r: channels[0],
                g: channels[1],
                b: channels[2],
            })
        }
        _ => None,
    }
}
