//! Editor benchmarks

use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use millia::{Cursor, Document, KeyDecoder, Renderer, StatusMessage, Viewport};

fn bench_decode_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Typing mixed with cursor and navigation keys
    let input = "hello\x1b[A\x1b[B world\x1b[5~\x1b[6~\x1bOH\r".repeat(500);
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("mixed_keys", |b| {
        b.iter(|| {
            let mut decoder = KeyDecoder::new();
            black_box(decoder.decode_all(black_box(input.as_bytes())))
        })
    });

    group.finish();
}

fn bench_draw_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("renderer");

    let lines: Vec<String> = (0..1000)
        .map(|i| format!("{}\tfn item_{}() {{ let x = {}; }}", i, i, i * 7))
        .collect();
    let doc = Document::from_lines("bench.rs", lines);
    let renderer = Renderer::default();
    let message = StatusMessage::default();

    let cursor = Cursor::new(4, 500);
    let mut view = Viewport::for_window(50, 200);
    view.scroll(cursor, doc.cursor_rx(cursor));

    group.bench_function("full_frame_200x50", |b| {
        b.iter(|| {
            let frame = renderer.draw_frame(&doc, &view, cursor, &message, Instant::now());
            black_box(frame)
        })
    });

    group.finish();
}

fn bench_insert_chars(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");

    group.bench_function("type_and_split", |b| {
        b.iter(|| {
            let mut doc = Document::new();
            let mut cursor = Cursor::default();
            for i in 0..2000u32 {
                if i % 80 == 79 {
                    doc.insert_newline(&mut cursor);
                } else {
                    doc.insert_char(&mut cursor, b'a' + (i % 26) as u8);
                }
            }
            black_box(doc)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_decode_keys, bench_draw_frame, bench_insert_chars);

criterion_main!(benches);
