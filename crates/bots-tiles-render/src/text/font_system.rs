//! Font-backed text measurement.

use bots_tiles_core::logging::targets;
use cosmic_text::{Attrs, Buffer, Family, Metrics, Shaping, Style, Weight, Wrap};

use super::shaping::TextMeasurer;
use super::style::TextStyle;
use crate::types::Size;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_MULTIPLIER: f32 = 1.2;

/// Configuration for initializing the font system.
#[derive(Debug, Clone)]
pub struct FontSystemConfig {
    /// Whether to load system fonts on initialization.
    pub load_system_fonts: bool,
    /// Locale string for text shaping (e.g., "en-US").
    pub locale: String,
    /// Family used when a style names no font.
    pub sans_serif_family: Option<String>,
}

impl Default for FontSystemConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            locale: sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string()),
            sans_serif_family: None,
        }
    }
}

impl FontSystemConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to load system fonts on initialization.
    pub fn load_system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }

    /// Set the locale for text shaping.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the default sans-serif font family.
    pub fn sans_serif_family(mut self, family: impl Into<String>) -> Self {
        self.sans_serif_family = Some(family.into());
        self
    }
}

/// Measures text by shaping it with real fonts.
///
/// Wraps cosmic-text's `FontSystem`. Not `Sync`; keep one per thread.
///
/// # Example
///
/// ```no_run
/// use bots_tiles_render::text::{FontSystem, TextMeasurer, TextStyle};
///
/// let mut fonts = FontSystem::new();
/// let size = fonts.measure("Play", &TextStyle::default().size(40));
/// println!("{}x{}", size.width, size.height);
/// ```
pub struct FontSystem {
    inner: cosmic_text::FontSystem,
}

impl FontSystem {
    /// Create a font system with system fonts loaded.
    ///
    /// Loading system fonts may take a noticeable fraction of a second.
    pub fn new() -> Self {
        Self::with_config(FontSystemConfig::default())
    }

    /// Create a new font system with custom configuration.
    pub fn with_config(config: FontSystemConfig) -> Self {
        let mut inner = if config.load_system_fonts {
            cosmic_text::FontSystem::new()
        } else {
            cosmic_text::FontSystem::new_with_locale_and_db(
                config.locale.clone(),
                fontdb::Database::new(),
            )
        };

        if let Some(ref family) = config.sans_serif_family {
            inner.db_mut().set_sans_serif_family(family);
        }

        tracing::debug!(
            target: targets::TEXT,
            faces = inner.db().faces().count(),
            locale = %config.locale,
            "font system ready"
        );
        Self { inner }
    }

    /// Get a reference to the font database.
    pub fn database(&self) -> &fontdb::Database {
        self.inner.db()
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSystem")
            .field("faces", &self.inner.db().faces().count())
            .finish()
    }
}

/// Convert a text style to cosmic-text attributes.
fn to_attrs(style: &TextStyle) -> Attrs<'_> {
    let family = match style.font.as_deref() {
        Some(name) => Family::Name(name),
        None => Family::SansSerif,
    };
    let [r, g, b, a] = style.color.to_rgba8();

    Attrs::new()
        .family(family)
        .weight(if style.bold { Weight::BOLD } else { Weight::NORMAL })
        .style(if style.italic { Style::Italic } else { Style::Normal })
        .color(cosmic_text::Color::rgba(r, g, b, a))
}

impl TextMeasurer for FontSystem {
    fn measure(&mut self, text: &str, style: &TextStyle) -> Size {
        let font_size = style.size as f32;
        let line_height = font_size * LINE_HEIGHT_MULTIPLIER;

        let mut buffer = Buffer::new(&mut self.inner, Metrics::new(font_size, line_height));
        buffer.set_wrap(&mut self.inner, Wrap::None);
        buffer.set_size(&mut self.inner, None, None);
        buffer.set_text(&mut self.inner, text, to_attrs(style), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.inner, false);

        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0_f32, f32::max);
        Size::new(width, line_height)
    }
}
