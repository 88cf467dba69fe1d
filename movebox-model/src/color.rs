//! Color name canonicalization for room label colors.
//!
//! Rooms store a canonical lowercase color name (the CSS/X11 named color
//! set). Input may be a name in any case or spacing ("Light Blue",
//! "light_blue"), a hex triplet (`#add8e6`, `#abc`), or an `rgb(r, g, b)`
//! / `r,g,b` triple. RGB input maps to the nearest named color.

use crate::error::ModelError;

/// A named color and its sRGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl NamedColor {
    /// `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb.0, self.rgb.1, self.rgb.2)
    }

    /// RGB components scaled to 0.0..=1.0.
    pub fn rgb_f32(&self) -> (f32, f32, f32) {
        (
            f32::from(self.rgb.0) / 255.0,
            f32::from(self.rgb.1) / 255.0,
            f32::from(self.rgb.2) / 255.0,
        )
    }
}

/// Canonicalize a color name or RGB value to a lowercase color name.
pub fn canonical_color(input: &str) -> Result<String, ModelError> {
    lookup_color(input).map(|c| c.name.to_string())
}

/// Resolve a color name or RGB value to its named color entry.
pub fn lookup_color(input: &str) -> Result<NamedColor, ModelError> {
    let invalid = || ModelError::InvalidColor(input.to_string());
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if let Some(rgb) = parse_rgb(trimmed) {
        return Ok(nearest_color(rgb));
    }

    let key: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    let key = key.replace("grey", "gray");

    NAMED_COLORS
        .iter()
        .find(|c| c.name == key)
        .copied()
        .ok_or_else(invalid)
}

/// Find the named color closest to an RGB value (squared Euclidean distance).
pub fn nearest_color(rgb: (u8, u8, u8)) -> NamedColor {
    let dist = |c: &NamedColor| {
        let dr = i32::from(c.rgb.0) - i32::from(rgb.0);
        let dg = i32::from(c.rgb.1) - i32::from(rgb.1);
        let db = i32::from(c.rgb.2) - i32::from(rgb.2);
        dr * dr + dg * dg + db * db
    };
    // NAMED_COLORS is non-empty, so min_by_key always yields an entry.
    *NAMED_COLORS
        .iter()
        .min_by_key(|c| dist(c))
        .unwrap_or(&NAMED_COLORS[0])
}

fn parse_rgb(s: &str) -> Option<(u8, u8, u8)> {
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_lowercase();
    let inner = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(&lower);
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse().ok()?;
    let g = parts[1].parse().ok()?;
    let b = parts[2].parse().ok()?;
    Some((r, g, b))
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

macro_rules! named {
    ($name:literal, $r:literal, $g:literal, $b:literal) => {
        NamedColor {
            name: $name,
            rgb: ($r, $g, $b),
        }
    };
}

/// CSS/X11 named colors. Where two names share a value, the first listed
/// wins for RGB lookups.
pub static NAMED_COLORS: &[NamedColor] = &[
    named!("black", 0, 0, 0),
    named!("white", 255, 255, 255),
    named!("red", 255, 0, 0),
    named!("lime", 0, 255, 0),
    named!("blue", 0, 0, 255),
    named!("yellow", 255, 255, 0),
    named!("cyan", 0, 255, 255),
    named!("aqua", 0, 255, 255),
    named!("magenta", 255, 0, 255),
    named!("fuchsia", 255, 0, 255),
    named!("silver", 192, 192, 192),
    named!("gray", 128, 128, 128),
    named!("maroon", 128, 0, 0),
    named!("olive", 128, 128, 0),
    named!("green", 0, 128, 0),
    named!("purple", 128, 0, 128),
    named!("teal", 0, 128, 128),
    named!("navy", 0, 0, 128),
    named!("orange", 255, 165, 0),
    named!("aliceblue", 240, 248, 255),
    named!("antiquewhite", 250, 235, 215),
    named!("aquamarine", 127, 255, 212),
    named!("azure", 240, 255, 255),
    named!("beige", 245, 245, 220),
    named!("bisque", 255, 228, 196),
    named!("blanchedalmond", 255, 235, 205),
    named!("blueviolet", 138, 43, 226),
    named!("brown", 165, 42, 42),
    named!("burlywood", 222, 184, 135),
    named!("cadetblue", 95, 158, 160),
    named!("chartreuse", 127, 255, 0),
    named!("chocolate", 210, 105, 30),
    named!("coral", 255, 127, 80),
    named!("cornflowerblue", 100, 149, 237),
    named!("cornsilk", 255, 248, 220),
    named!("crimson", 220, 20, 60),
    named!("darkblue", 0, 0, 139),
    named!("darkcyan", 0, 139, 139),
    named!("darkgoldenrod", 184, 134, 11),
    named!("darkgray", 169, 169, 169),
    named!("darkgreen", 0, 100, 0),
    named!("darkkhaki", 189, 183, 107),
    named!("darkmagenta", 139, 0, 139),
    named!("darkolivegreen", 85, 107, 47),
    named!("darkorange", 255, 140, 0),
    named!("darkorchid", 153, 50, 204),
    named!("darkred", 139, 0, 0),
    named!("darksalmon", 233, 150, 122),
    named!("darkseagreen", 143, 188, 143),
    named!("darkslateblue", 72, 61, 139),
    named!("darkslategray", 47, 79, 79),
    named!("darkturquoise", 0, 206, 209),
    named!("darkviolet", 148, 0, 211),
    named!("deeppink", 255, 20, 147),
    named!("deepskyblue", 0, 191, 255),
    named!("dimgray", 105, 105, 105),
    named!("dodgerblue", 30, 144, 255),
    named!("firebrick", 178, 34, 34),
    named!("floralwhite", 255, 250, 240),
    named!("forestgreen", 34, 139, 34),
    named!("gainsboro", 220, 220, 220),
    named!("ghostwhite", 248, 248, 255),
    named!("gold", 255, 215, 0),
    named!("goldenrod", 218, 165, 32),
    named!("greenyellow", 173, 255, 47),
    named!("honeydew", 240, 255, 240),
    named!("hotpink", 255, 105, 180),
    named!("indianred", 205, 92, 92),
    named!("indigo", 75, 0, 130),
    named!("ivory", 255, 255, 240),
    named!("khaki", 240, 230, 140),
    named!("lavender", 230, 230, 250),
    named!("lavenderblush", 255, 240, 245),
    named!("lawngreen", 124, 252, 0),
    named!("lemonchiffon", 255, 250, 205),
    named!("lightblue", 173, 216, 230),
    named!("lightcoral", 240, 128, 128),
    named!("lightcyan", 224, 255, 255),
    named!("lightgoldenrodyellow", 250, 250, 210),
    named!("lightgray", 211, 211, 211),
    named!("lightgreen", 144, 238, 144),
    named!("lightpink", 255, 182, 193),
    named!("lightsalmon", 255, 160, 122),
    named!("lightseagreen", 32, 178, 170),
    named!("lightskyblue", 135, 206, 250),
    named!("lightslategray", 119, 136, 153),
    named!("lightsteelblue", 176, 196, 222),
    named!("lightyellow", 255, 255, 224),
    named!("limegreen", 50, 205, 50),
    named!("linen", 250, 240, 230),
    named!("mediumaquamarine", 102, 205, 170),
    named!("mediumblue", 0, 0, 205),
    named!("mediumorchid", 186, 85, 211),
    named!("mediumpurple", 147, 112, 219),
    named!("mediumseagreen", 60, 179, 113),
    named!("mediumslateblue", 123, 104, 238),
    named!("mediumspringgreen", 0, 250, 154),
    named!("mediumturquoise", 72, 209, 204),
    named!("mediumvioletred", 199, 21, 133),
    named!("midnightblue", 25, 25, 112),
    named!("mintcream", 245, 255, 250),
    named!("mistyrose", 255, 228, 225),
    named!("moccasin", 255, 228, 181),
    named!("navajowhite", 255, 222, 173),
    named!("oldlace", 253, 245, 230),
    named!("olivedrab", 107, 142, 35),
    named!("orangered", 255, 69, 0),
    named!("orchid", 218, 112, 214),
    named!("palegoldenrod", 238, 232, 170),
    named!("palegreen", 152, 251, 152),
    named!("paleturquoise", 175, 238, 238),
    named!("palevioletred", 219, 112, 147),
    named!("papayawhip", 255, 239, 213),
    named!("peachpuff", 255, 218, 185),
    named!("peru", 205, 133, 63),
    named!("pink", 255, 192, 203),
    named!("plum", 221, 160, 221),
    named!("powderblue", 176, 224, 230),
    named!("rebeccapurple", 102, 51, 153),
    named!("rosybrown", 188, 143, 143),
    named!("royalblue", 65, 105, 225),
    named!("saddlebrown", 139, 69, 19),
    named!("salmon", 250, 128, 114),
    named!("sandybrown", 244, 164, 96),
    named!("seagreen", 46, 139, 87),
    named!("seashell", 255, 245, 238),
    named!("sienna", 160, 82, 45),
    named!("skyblue", 135, 206, 235),
    named!("slateblue", 106, 90, 205),
    named!("slategray", 112, 128, 144),
    named!("snow", 255, 250, 250),
    named!("springgreen", 0, 255, 127),
    named!("steelblue", 70, 130, 180),
    named!("tan", 210, 180, 140),
    named!("thistle", 216, 191, 216),
    named!("tomato", 255, 99, 71),
    named!("turquoise", 64, 224, 208),
    named!("violet", 238, 130, 238),
    named!("wheat", 245, 222, 179),
    named!("whitesmoke", 245, 245, 245),
    named!("yellowgreen", 154, 205, 50),
];
