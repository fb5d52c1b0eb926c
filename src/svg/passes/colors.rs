//! Color literal normalization.

use lightningcss::{traits::Parse, values::color::CssColor};

use crate::svg::{Document, Pass};

/// Attributes holding a paint or color value.
const COLOR_ATTRS: &[&str] = &[
    "color",
    "fill",
    "flood-color",
    "lighting-color",
    "stop-color",
    "stroke",
];

/// Rewrites opaque sRGB colors (`rgb()`, names, short or uppercase hex)
/// to lowercase `#rrggbb`.
///
/// Hex values are never shortened so that long-form color lookups
/// downstream keep matching. Translucent colors, `currentColor` and paint
/// servers are left alone.
pub struct ConvertColors;

impl Pass for ConvertColors {
    fn name(&self) -> &'static str {
        "convertColors"
    }

    fn apply(&self, doc: &mut Document) {
        doc.walk_mut(&mut |elem| {
            for (name, value) in elem.attrs.values_mut() {
                if COLOR_ATTRS.contains(&name)
                    && let Some(converted) = convert(value)
                {
                    *value = converted;
                }
            }
        });
    }
}

fn convert(value: &str) -> Option<String> {
    let CssColor::RGBA(rgba) = CssColor::parse_string(value.trim()).ok()? else {
        return None;
    };
    if rgba.alpha_f32() < 1.0 {
        return None;
    }
    let hex = format!("#{:02x}{:02x}{:02x}", rgba.red, rgba.green, rgba.blue);
    (hex != value).then_some(hex)
}
