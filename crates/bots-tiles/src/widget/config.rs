//! Box attributes.
//!
//! A box's look and behavior is a [`BoxConfig`]. Attributes are changed by
//! name through [`BoxConfig::set`] (or in bulk through
//! [`BoxWidget::change_attrs`](super::BoxWidget::change_attrs)), which checks
//! each value and reports which caches the change makes stale.
//!
//! | attribute | value | default |
//! |---|---|---|
//! | `background_color` | color | light gray |
//! | `border_size` | number ≥ 0 | 0 |
//! | `border_color` | color | light gray |
//! | `fill_in_border` | bool | false |
//! | `margin` | number ≥ 0 | 10 |
//! | `corner_rounding` | number ≥ 0 | 10 |
//! | `hovered_over_color` | color | light green |
//! | `image_path` | string, empty for none | "" |
//! | `resize_image` | bool | true |
//! | `center_image` | bool | true |
//! | `keep_proportion` | bool | true |
//! | `text_color` | color | black |
//! | `text_size` | integer > 0 | 12 |
//! | `text_font` | string, empty for default | none |
//! | `text_wrap` | bool | true |
//! | `text_justification` | justification name | center |
//! | `if_overflowing_text` | overflow policy name | resize_box_down |
//! | `grow_text_to_fit` | bool | false |
//!
//! Colors are names (`"light gray"`), `#rrggbb[aa]` strings, or 3 or 4
//! integers in `0..=255`.

use std::path::PathBuf;

use bots_tiles_render::Color;
use bots_tiles_render::ImagePlacement;
use bots_tiles_render::text::{Justification, OverflowPolicy, OverflowSettings, TextStyle};

use crate::error::{BoxError, Result};

/// A value for a box attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A list of integers, such as an RGB color.
    Ints(Vec<i64>),
    Color(Color),
    Justification(Justification),
    Overflow(OverflowPolicy),
    /// No value, for optional attributes such as `text_font`.
    None,
}

impl AttrValue {
    /// Short name of the value's type, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "integer",
            AttrValue::Float(_) => "float",
            AttrValue::Str(_) => "string",
            AttrValue::Ints(_) => "integer list",
            AttrValue::Color(_) => "color",
            AttrValue::Justification(_) => "justification",
            AttrValue::Overflow(_) => "overflow policy",
            AttrValue::None => "none",
        }
    }
}

macro_rules! attr_value_from {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl From<$ty> for AttrValue {
                fn from($v: $ty) -> Self {
                    $body
                }
            }
        )*
    };
}

attr_value_from! {
    bool => |v| AttrValue::Bool(v),
    i32 => |v| AttrValue::Int(v.into()),
    i64 => |v| AttrValue::Int(v),
    u32 => |v| AttrValue::Int(v.into()),
    f32 => |v| AttrValue::Float(v.into()),
    f64 => |v| AttrValue::Float(v),
    &str => |v| AttrValue::Str(v.to_string()),
    String => |v| AttrValue::Str(v),
    Color => |v| AttrValue::Color(v),
    Justification => |v| AttrValue::Justification(v),
    OverflowPolicy => |v| AttrValue::Overflow(v),
    (u8, u8, u8) => |v| AttrValue::Ints(vec![v.0.into(), v.1.into(), v.2.into()]),
    [u8; 3] => |v| AttrValue::Ints(v.iter().map(|c| i64::from(*c)).collect()),
    [u8; 4] => |v| AttrValue::Ints(v.iter().map(|c| i64::from(*c)).collect()),
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(AttrValue::None, Into::into)
    }
}

/// Caches a change makes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    /// Text must be parsed again (and laid out again).
    pub parse: bool,
    /// Text must be laid out again.
    pub layout: bool,
    /// The image must be loaded again.
    pub image: bool,
}

impl Invalidation {
    /// Only the next paint changes.
    pub const PAINT: Self = Self {
        parse: false,
        layout: false,
        image: false,
    };
    pub const LAYOUT: Self = Self {
        parse: false,
        layout: true,
        image: false,
    };
    pub const PARSE: Self = Self {
        parse: true,
        layout: true,
        image: false,
    };
    pub const IMAGE: Self = Self {
        parse: false,
        layout: false,
        image: true,
    };

    /// Combine two invalidations.
    pub fn union(self, other: Self) -> Self {
        Self {
            parse: self.parse || other.parse,
            layout: self.layout || other.layout,
            image: self.image || other.image,
        }
    }
}

/// Everything a user can configure about a box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxConfig {
    pub background_color: Color,
    pub border_size: f32,
    pub border_color: Color,
    /// Fill the box behind a border instead of drawing only the outline.
    pub fill_in_border: bool,
    /// Space between the box edge and the text.
    pub margin: f32,
    pub corner_rounding: f32,
    /// Fill color while hovered over or selected.
    pub hovered_over_color: Color,
    /// Image drawn behind the text. `None` for no image.
    pub image_path: Option<PathBuf>,
    pub resize_image: bool,
    pub center_image: bool,
    pub keep_proportion: bool,
    pub text_color: Color,
    pub text_size: u32,
    pub text_font: Option<String>,
    pub text_wrap: bool,
    pub text_justification: Justification,
    pub if_overflowing_text: OverflowPolicy,
    pub grow_text_to_fit: bool,
}

impl Default for BoxConfig {
    fn default() -> Self {
        let light_gray = Color::from_rgb8(211, 211, 211);
        Self {
            background_color: light_gray,
            border_size: 0.0,
            border_color: light_gray,
            fill_in_border: false,
            margin: 10.0,
            corner_rounding: 10.0,
            hovered_over_color: Color::from_rgb8(144, 238, 144),
            image_path: None,
            resize_image: true,
            center_image: true,
            keep_proportion: true,
            text_color: Color::BLACK,
            text_size: 12,
            text_font: None,
            text_wrap: true,
            text_justification: Justification::Center,
            if_overflowing_text: OverflowPolicy::ResizeBoxDown,
            grow_text_to_fit: false,
        }
    }
}

/// One row of the attribute table.
struct Attribute {
    name: &'static str,
    invalidates: Invalidation,
    apply: fn(&mut BoxConfig, &AttrValue) -> std::result::Result<(), String>,
}

const ATTRIBUTES: &[Attribute] = &[
    Attribute {
        name: "background_color",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.background_color = color(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "border_size",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.border_size = non_negative(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "border_color",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.border_color = color(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "fill_in_border",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.fill_in_border = boolean(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "margin",
        invalidates: Invalidation::LAYOUT,
        apply: |c, v| {
            c.margin = non_negative(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "corner_rounding",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.corner_rounding = non_negative(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "hovered_over_color",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.hovered_over_color = color(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "image_path",
        invalidates: Invalidation::IMAGE,
        apply: |c, v| {
            c.image_path = optional_string(v)?.map(PathBuf::from);
            Ok(())
        },
    },
    Attribute {
        name: "resize_image",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.resize_image = boolean(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "center_image",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.center_image = boolean(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "keep_proportion",
        invalidates: Invalidation::PAINT,
        apply: |c, v| {
            c.keep_proportion = boolean(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "text_color",
        invalidates: Invalidation::PARSE,
        apply: |c, v| {
            c.text_color = color(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "text_size",
        invalidates: Invalidation::PARSE,
        apply: |c, v| {
            c.text_size = positive_int(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "text_font",
        invalidates: Invalidation::PARSE,
        apply: |c, v| {
            c.text_font = optional_string(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "text_wrap",
        invalidates: Invalidation::LAYOUT,
        apply: |c, v| {
            c.text_wrap = boolean(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "text_justification",
        invalidates: Invalidation::LAYOUT,
        apply: |c, v| {
            c.text_justification = justification(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "if_overflowing_text",
        invalidates: Invalidation::LAYOUT,
        apply: |c, v| {
            c.if_overflowing_text = overflow_policy(v)?;
            Ok(())
        },
    },
    Attribute {
        name: "grow_text_to_fit",
        invalidates: Invalidation::LAYOUT,
        apply: |c, v| {
            c.grow_text_to_fit = boolean(v)?;
            Ok(())
        },
    },
];

fn wrong_kind(expected: &str, value: &AttrValue) -> String {
    format!("expected {expected}, got {}", value.kind())
}

fn boolean(value: &AttrValue) -> std::result::Result<bool, String> {
    match value {
        AttrValue::Bool(b) => Ok(*b),
        other => Err(wrong_kind("bool", other)),
    }
}

fn non_negative(value: &AttrValue) -> std::result::Result<f32, String> {
    let n = match value {
        AttrValue::Int(n) => *n as f64,
        AttrValue::Float(n) => *n,
        other => return Err(wrong_kind("number", other)),
    };
    if !n.is_finite() || n < 0.0 {
        return Err(format!("{n} is not a non-negative number"));
    }
    Ok(n as f32)
}

fn positive_int(value: &AttrValue) -> std::result::Result<u32, String> {
    match value {
        AttrValue::Int(n) => u32::try_from(*n)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("{n} is not a positive integer")),
        other => Err(wrong_kind("integer", other)),
    }
}

fn optional_string(value: &AttrValue) -> std::result::Result<Option<String>, String> {
    match value {
        AttrValue::Str(s) if s.is_empty() => Ok(None),
        AttrValue::Str(s) => Ok(Some(s.clone())),
        AttrValue::None => Ok(None),
        other => Err(wrong_kind("string", other)),
    }
}

fn color(value: &AttrValue) -> std::result::Result<Color, String> {
    match value {
        AttrValue::Color(c) => Ok(*c),
        AttrValue::Str(name) => {
            Color::from_name(name).ok_or_else(|| format!("unknown color '{name}'"))
        }
        AttrValue::Ints(parts) => {
            let channels = parts
                .iter()
                .map(|p| u8::try_from(*p))
                .collect::<std::result::Result<Vec<u8>, _>>()
                .map_err(|_| "color channels must be in 0..=255".to_string())?;
            match channels[..] {
                [r, g, b] => Ok(Color::from_rgb8(r, g, b)),
                [r, g, b, a] => Ok(Color::from_rgba8(r, g, b, a)),
                _ => Err(format!("a color needs 3 or 4 channels, got {}", channels.len())),
            }
        }
        other => Err(wrong_kind("color", other)),
    }
}

fn justification(value: &AttrValue) -> std::result::Result<Justification, String> {
    match value {
        AttrValue::Justification(j) => Ok(*j),
        AttrValue::Str(name) => {
            Justification::from_name(name).ok_or_else(|| format!("unknown justification '{name}'"))
        }
        other => Err(wrong_kind("justification", other)),
    }
}

fn overflow_policy(value: &AttrValue) -> std::result::Result<OverflowPolicy, String> {
    match value {
        AttrValue::Overflow(p) => Ok(*p),
        AttrValue::Str(name) => {
            OverflowPolicy::from_name(name).ok_or_else(|| format!("unknown overflow policy '{name}'"))
        }
        other => Err(wrong_kind("overflow policy", other)),
    }
}

impl BoxConfig {
    /// Names of every attribute, in table order.
    pub fn attribute_names() -> impl Iterator<Item = &'static str> {
        ATTRIBUTES.iter().map(|a| a.name)
    }

    /// Set one attribute by name.
    ///
    /// On error the configuration is unchanged.
    pub fn set(&mut self, name: &str, value: &AttrValue) -> Result<Invalidation> {
        let attribute = ATTRIBUTES
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| BoxError::unknown_attribute(name))?;
        (attribute.apply)(self, value).map_err(|message| BoxError::invalid_value(name, message))?;
        Ok(attribute.invalidates)
    }

    /// Set several attributes. Stops at the first error, leaving the
    /// attributes before it applied; apply to a copy for all-or-nothing
    /// updates.
    pub fn apply<I, K, V>(&mut self, attrs: I) -> Result<Invalidation>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        attrs.into_iter().try_fold(Invalidation::default(), |acc, (name, value)| {
            Ok(acc.union(self.set(name.as_ref(), &value.into())?))
        })
    }

    /// The style of text outside any tag.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            bold: false,
            italic: false,
            color: self.text_color,
            font: self.text_font.clone(),
            size: self.text_size,
        }
    }

    /// Layout settings for the text.
    pub fn overflow_settings(&self) -> OverflowSettings {
        OverflowSettings {
            policy: self.if_overflowing_text,
            justification: self.text_justification,
            margin: self.margin,
            wrap: self.text_wrap,
            grow_text_to_fit: self.grow_text_to_fit,
            placeholder_style: self.text_style(),
        }
    }

    /// How the image is fitted into the box.
    pub fn image_placement(&self) -> ImagePlacement {
        ImagePlacement {
            resize: self.resize_image,
            center: self.center_image,
            keep_proportion: self.keep_proportion,
        }
    }
}

/// Read attributes from a TOML table.
///
/// ```
/// use bots_tiles::widget::{attrs_from_toml, AttrValue};
///
/// let attrs = attrs_from_toml(r#"
///     background_color = "gray"
///     border_color = [0, 0, 0]
///     corner_rounding = 25
/// "#).unwrap();
/// assert!(attrs.contains(&("corner_rounding".to_string(), AttrValue::Int(25))));
/// ```
pub fn attrs_from_toml(src: &str) -> Result<Vec<(String, AttrValue)>> {
    let table: toml::Table = src.parse()?;
    table
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                toml::Value::Boolean(b) => AttrValue::Bool(b),
                toml::Value::Integer(n) => AttrValue::Int(n),
                toml::Value::Float(n) => AttrValue::Float(n),
                toml::Value::String(s) => AttrValue::Str(s),
                toml::Value::Array(items) => AttrValue::Ints(
                    items
                        .iter()
                        .map(toml::Value::as_integer)
                        .collect::<Option<Vec<i64>>>()
                        .ok_or_else(|| BoxError::invalid_value(&name, "arrays must hold integers"))?,
                ),
                other => {
                    return Err(BoxError::invalid_value(
                        &name,
                        format!("unsupported {} value", other.type_str()),
                    ));
                }
            };
            Ok((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoxConfig::default();
        assert_eq!(Some(config.background_color), Color::from_name("light gray"));
        assert_eq!(config.border_color, config.background_color);
        assert_eq!(Some(config.hovered_over_color), Color::from_name("light green"));
        assert_eq!(config.margin, 10.0);
        assert_eq!(config.corner_rounding, 10.0);
        assert_eq!(config.text_size, 12);
        assert_eq!(config.text_justification, Justification::Center);
        assert_eq!(config.if_overflowing_text, OverflowPolicy::ResizeBoxDown);
        assert!(config.image_path.is_none());
        assert!(config.text_wrap && config.resize_image && config.center_image);
    }

    #[test]
    fn test_every_field_has_an_attribute() {
        assert_eq!(BoxConfig::attribute_names().count(), 18);
        let mut names: Vec<_> = BoxConfig::attribute_names().collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 18);
    }

    #[test]
    fn test_set_values() {
        let mut config = BoxConfig::default();
        config.set("background_color", &"gray".into()).unwrap();
        config.set("border_color", &(0_u8, 0, 0).into()).unwrap();
        config.set("hovered_over_color", &[1_u8, 2, 3, 4].into()).unwrap();
        config.set("margin", &2.5_f32.into()).unwrap();
        config.set("text_size", &28.into()).unwrap();
        config.set("text_font", &"arial".into()).unwrap();
        config.set("text_justification", &"top_left".into()).unwrap();
        config.set("if_overflowing_text", &OverflowPolicy::ResizeText.into()).unwrap();
        config.set("image_path", &"tile.png".into()).unwrap();

        assert_eq!(Some(config.background_color), Color::from_name("gray"));
        assert_eq!(config.border_color, Color::BLACK);
        assert_eq!(config.hovered_over_color, Color::from_rgba8(1, 2, 3, 4));
        assert_eq!(config.margin, 2.5);
        assert_eq!(config.text_size, 28);
        assert_eq!(config.text_font.as_deref(), Some("arial"));
        assert_eq!(config.text_justification, Justification::TopLeft);
        assert_eq!(config.if_overflowing_text, OverflowPolicy::ResizeText);
        assert_eq!(config.image_path, Some(PathBuf::from("tile.png")));

        config.set("text_font", &AttrValue::None).unwrap();
        config.set("image_path", &"".into()).unwrap();
        assert!(config.text_font.is_none());
        assert!(config.image_path.is_none());
    }

    #[test]
    fn test_invalidation_kinds() {
        let mut config = BoxConfig::default();
        assert_eq!(config.set("text_color", &"red".into()).unwrap(), Invalidation::PARSE);
        assert_eq!(config.set("margin", &4.into()).unwrap(), Invalidation::LAYOUT);
        assert_eq!(config.set("image_path", &"a.png".into()).unwrap(), Invalidation::IMAGE);
        assert_eq!(config.set("border_size", &1.into()).unwrap(), Invalidation::PAINT);

        let all = config
            .apply([("text_wrap", AttrValue::Bool(false)), ("resize_image", AttrValue::Bool(false))])
            .unwrap();
        assert_eq!(all, Invalidation::LAYOUT);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = BoxConfig::default();
        let before = config.clone();

        assert!(matches!(
            config.set("colour", &"red".into()),
            Err(BoxError::UnknownAttribute(name)) if name == "colour"
        ));
        for (name, value) in [
            ("margin", AttrValue::Int(-1)),
            ("margin", AttrValue::Float(f64::NAN)),
            ("text_size", AttrValue::Int(0)),
            ("text_size", AttrValue::Float(12.0)),
            ("text_wrap", AttrValue::Int(1)),
            ("background_color", AttrValue::Str("blurple".into())),
            ("background_color", AttrValue::Ints(vec![1, 2])),
            ("background_color", AttrValue::Ints(vec![1, 2, 256])),
            ("text_justification", AttrValue::Str("middle".into())),
            ("if_overflowing_text", AttrValue::Bool(true)),
            ("text_font", AttrValue::Int(3)),
        ] {
            assert!(
                matches!(config.set(name, &value), Err(BoxError::InvalidValue { .. })),
                "{name} accepted {value:?}"
            );
        }
        assert_eq!(config, before);
    }

    #[test]
    fn test_text_style_and_settings() {
        let mut config = BoxConfig::default();
        config
            .apply([
                ("text_color", AttrValue::from("blue")),
                ("text_size", AttrValue::from(20)),
                ("text_font", AttrValue::from("serif")),
                ("grow_text_to_fit", AttrValue::from(true)),
            ])
            .unwrap();

        let style = config.text_style();
        assert_eq!(style, TextStyle::new(Color::BLUE, 20).font("serif"));

        let settings = config.overflow_settings();
        assert_eq!(settings.margin, 10.0);
        assert!(settings.grow_text_to_fit);
        assert_eq!(settings.placeholder_style, style);
        assert_eq!(config.image_placement(), ImagePlacement::default());
    }

    #[test]
    fn test_attrs_from_toml() {
        let attrs = attrs_from_toml(
            r#"
            fill_in_border = true
            margin = 4.5
            text_size = 28
            text_justification = "midtop"
            border_color = [0, 0, 0, 255]
            "#,
        )
        .unwrap();

        let mut config = BoxConfig::default();
        config.apply(attrs).unwrap();
        assert!(config.fill_in_border);
        assert_eq!(config.margin, 4.5);
        assert_eq!(config.text_size, 28);
        assert_eq!(config.text_justification, Justification::MidTop);
        assert_eq!(config.border_color, Color::BLACK);
    }

    #[test]
    fn test_attrs_from_toml_errors() {
        assert!(matches!(attrs_from_toml("margin = "), Err(BoxError::Config(_))));
        assert!(matches!(
            attrs_from_toml("border_color = [\"a\"]"),
            Err(BoxError::InvalidValue { attribute, .. }) if attribute == "border_color"
        ));
        assert!(matches!(
            attrs_from_toml("[nested]\nx = 1"),
            Err(BoxError::InvalidValue { .. })
        ));
    }
}
