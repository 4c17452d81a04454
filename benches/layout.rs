use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glyph_layout as gl;
use glyph_layout::TypeLayout;

fn styled_paragraphs(paragraphs: usize) -> gl::AttributedText {
    let paragraph = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                     tempor incididunt ut labore et dolore magna aliqua.\n";
    let mut text = gl::AttributedText::new(paragraph.repeat(paragraphs));
    let len = text.len();
    let mut start = 0;
    while start < len {
        text.set_color(start..start + 7, gl::Color::rgb(0xC0, 0x20, 0x20));
        text.set_font(start + 3..start + 11, gl::Font::new().bold());
        start += 23;
    }
    text
}

fn bench_portable(c: &mut Criterion) {
    let font_system = gl::FontSystem::new();
    let engine = gl::PortableEngine::new(&font_system);
    let text = styled_paragraphs(50);

    c.bench_function("PortableEngine/Styled Paragraphs", |b| {
        b.iter(|| engine.layout(black_box(&text), gl::Rect::from_size(500.0, 1000.0)));
    });

    let balanced = gl::PortableEngine::with_options(
        &font_system,
        gl::LayoutOptions::new().balance_lines(true),
    );
    c.benchmark_group("balanced")
        .sample_size(10)
        .bench_function("PortableEngine/Balanced Paragraphs", |b| {
            b.iter(|| balanced.layout(black_box(&text), gl::Rect::from_size(500.0, 1000.0)));
        });
}

fn bench_attrs_runs(c: &mut Criterion) {
    let text = styled_paragraphs(200);

    c.bench_function("AttrsRuns/Range Maps", |b| {
        b.iter(|| gl::AttrsRuns::new(black_box(&text)));
    });
    c.benchmark_group("per_char")
        .sample_size(10)
        .bench_function("AttrsRuns/Per Character", |b| {
            b.iter(|| gl::AttrsRuns::new_per_char(black_box(&text)));
        });
}

criterion_group!(benches, bench_portable, bench_attrs_runs);
criterion_main!(benches);
