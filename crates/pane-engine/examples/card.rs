//! Example: a profile card written to `card.png`

use pane_engine::layout::*;
use pane_engine::render::Color;
use pane_engine::{Config, Engine};
use std::result::Result;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pane_engine::init_logging();

    let engine = Engine::new(Config::default().font_size(20.0).background(Color::WHITE))?;

    let avatar = AvatarCircle::new(GradientBox::new().size(256, 256).lu(Color::MIKU).ll(Color::MIKU_DARK)).size(96);

    let name = Column::new(vec![
        Text::new("Pane Engine").font_size(28.0).into(),
        Pill::new(Text::new("level"), Text::new("42")).into(),
    ])
    .border_width(6)
    .align_x(0.0);

    let bio = RichText::new(
        "Composes images from rows, columns, grids and rich text with inline emoji 🎨",
        360,
    );

    let card = AddBorder::new(
        Column::new(vec![
            Row::new(vec![avatar.into(), name.into()]).border_width(12).into(),
            bio.into(),
            SetKwargs::new(ProgressBar::new(360).fill(Color::MIKU)).set_ext("progress", 0.7f32).into(),
        ])
        .border_width(12),
    )
    .border_color(Color::MIKU_DARK);

    let image = engine.render(&card.into())?;
    image.save_png("card.png")?;
    println!("Rendered {}x{} card to card.png", image.width(), image.height());
    Ok(())
}
