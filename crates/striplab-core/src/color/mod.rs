//! Color display conversions
//!
//! RGB to hex / HSV / HSL conversions used for scientific-mode display.
//! Pure and stateless; nothing here feeds the quantification path.

mod conversions;


pub use conversions::{
    format_hsl, format_hsv, parse_hex, rgb_to_hex, rgb_to_hsl, rgb_to_hsv, scientific_color_data,
    Hsl, Hsv,
};
