//! The Bots and Tiles intro screen, driven headless.
//!
//! Builds the title and "Play" boxes, feeds them a resize, a hover and a
//! click, and prints what each frame would draw.
//!
//! Run with: cargo run -p bots-tiles --example intro_screen
//! Set `RUST_LOG=bots_tiles=debug` to watch layout and clicks.

use bots_tiles::prelude::*;
use bots_tiles::render::DrawCommand;
use tracing_subscriber::EnvFilter;

const BOX_ATTRS: &str = r#"
background_color = "gray"
corner_rounding = 25
text_justification = "center"
border_size = 1
border_color = "black"
if_overflowing_text = "resize_box_down"
fill_in_border = true
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Title,
    Play,
}

fn intro_screen(surface: Size) -> Result<Screen<Action>> {
    let mut title = BoxWidget::new(
        surface,
        |w, h| Vector2d::new(w / 2.0, h / 2.0),
        |w, h| Vector2d::new(w / 2.5, h / 2.5),
        "<s: 40,b>Bots and Tiles</>",
    )
    .with_click_result(Action::Title);
    title.change_attrs_toml(BOX_ATTRS)?;

    let mut play = BoxWidget::new(
        surface,
        |w, h| Vector2d::new(w / 2.0, h / 2.0 + 100.0),
        |w, h| Vector2d::new(w / 5.0, h / 5.0),
        "<s: 28>Play</>",
    )
    .with_click_result(Action::Play);
    play.change_attrs_toml(BOX_ATTRS)?;

    Ok(Screen::new().with_box("title", title).with_box("play", play))
}

fn print_frame(label: &str, canvas: &DisplayList) {
    println!("{label}:");
    for command in canvas.commands() {
        match command {
            DrawCommand::FillRoundedRect { rect, color } => {
                println!("  fill   {:?} {:?}", rect.rect, color.to_rgba8());
            }
            DrawCommand::StrokeRoundedRect { rect, color, width } => {
                println!("  stroke {:?} {:?} width {width}", rect.rect, color.to_rgba8());
            }
            DrawCommand::Image { width, height, dest } => {
                println!("  image  {width}x{height} into {:?}", dest.rect);
            }
            DrawCommand::Text { run, origin } => {
                println!("  text   {:?} at ({}, {}) size {}", run.text, origin.x, origin.y, run.style.size);
            }
        }
    }
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let surface = Size::new(500.0, 500.0);
    let mut screen = intro_screen(surface)?;
    let mut fonts = FixedAdvance::default();
    let mut canvas = DisplayList::new();

    let frames = [
        ("resize", BoxEvent::Resize { surface }),
        ("hover over play", BoxEvent::pointer_move(300.0, 370.0)),
        ("click play", BoxEvent::pointer_press(300.0, 370.0)),
        ("after click", BoxEvent::Tick),
    ];

    for (label, event) in frames {
        canvas.clear();
        let clicks = screen.update(&event, &mut canvas, &mut fonts)?;
        print_frame(label, &canvas);

        if !clicks.is_empty() {
            println!("clicked: {clicks:?}, leaving the intro screen\n");
            screen.hide();
        }
    }

    Ok(())
}
