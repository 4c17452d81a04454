use glyph_layout::{
    fontdb, AttributedText, Family, Font, FontProvider, FontSystem, PortableEngine, Rect,
    TypeLayout, NOTDEF_GLYPH,
};

fn empty_font_system() -> FontSystem {
    FontSystem::new_with_db(fontdb::Database::new())
}

#[test]
fn lays_out_without_any_fonts() {
    let font_system = empty_font_system();
    let engine = PortableEngine::new(&font_system);

    let mut text = AttributedText::new("Hello world");
    text.set_font(6..11, Font::new().family(Family::Monospace).size(30.0));
    let layout = engine.layout(&text, Rect::from_size(1000.0, 100.0));

    assert_eq!(layout.lines.len(), 1);
    assert_eq!(layout.glyph_count(), 10);
    assert!(layout.glyphs().all(|glyph| glyph.id == NOTDEF_GLYPH));

    // Synthetic metrics follow the largest font on the line
    let line = &layout.lines[0];
    assert_eq!(line.ascent, 24.0);
    assert_eq!(line.descent, 6.0);
    assert_eq!(line.runs.len(), 2);
    assert_eq!(line.runs[1].x, 6.0 * 7.5);
}

#[test]
fn shared_between_threads() {
    let font_system = empty_font_system();
    let text = AttributedText::new("one two three four five six");

    let layouts: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = PortableEngine::new(&font_system);
                let text = &text;
                scope.spawn(move || engine.layout(text, Rect::from_size(60.0, 500.0)))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for layout in &layouts[1..] {
        assert_eq!(layout, &layouts[0]);
    }
    assert!(layouts[0].lines.len() > 1);
}

#[test]
fn missing_font_file() {
    let mut font_system = empty_font_system();
    assert!(font_system
        .load_font_file("/nonexistent/glyph-layout/font.ttf")
        .is_err());
    assert_eq!(font_system.db().len(), 0);

    let font = Font::new();
    assert!(font_system.outline(&font, 1).is_none());
}

#[test]
fn shape_plans_are_shared_between_words() {
    let font_system = FontSystem::new();
    let font = Font::new();
    if font_system.face(&font.key()).is_none() {
        // Nothing installed to shape with
        return;
    }

    let first = font_system.shape(&font, "hello");
    let plans = font_system.shape_plan_cache().len();
    assert_eq!(plans, 1);

    font_system.shape(&font, "world");
    font_system.shape(&font.clone().size(30.0), "again");
    assert_eq!(font_system.shape_plan_cache().len(), plans);
    assert_eq!(font_system.shape(&font, "hello"), first);
}
