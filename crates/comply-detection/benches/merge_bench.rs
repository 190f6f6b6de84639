//! Criterion benchmarks for comply-detection.
//!
//! - Tier-1 scan over a two-page résumé
//! - merge of 1K overlapping hits
//! - label redaction of the merged set

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comply_core::models::{Hit, HitSet, HitSource, MaskingMode};
use comply_detection::{merge, RedactionActuator, Tier1Scanner};

fn resume_text() -> String {
    let block = "Max Mustermann\nHauptstraße 5, 10115 Berlin\nTel 0151 1234567, max@example.de\n\
                 www.example-design.de\nGeboren am 3. März 1990\n\
                 Berufserfahrung als Softwareentwickler bei einer Agentur.\n";
    block.repeat(40)
}

fn overlapping_hits(len: usize) -> Vec<Hit> {
    (0..1000)
        .map(|i| {
            let start = (i * 7) % (len - 20);
            Hit::new(start, start + 5 + i % 13, "PER", HitSource::Recognizer, 0.9)
        })
        .collect()
}

fn bench_scan(c: &mut Criterion) {
    let text = resume_text();
    let scanner = Tier1Scanner::new();
    c.bench_function("tier1_scan_resume", |b| {
        b.iter(|| scanner.scan(black_box(&text)))
    });
}

fn bench_merge(c: &mut Criterion) {
    let text = "x".repeat(10_000);
    let hits = overlapping_hits(text.len());
    c.bench_function("merge_1k_hits", |b| {
        b.iter(|| merge(&text, HitSet::with_hits(&text, black_box(hits.clone()))))
    });
}

fn bench_redact(c: &mut Criterion) {
    let text = "x".repeat(10_000);
    let outcome = merge(&text, HitSet::with_hits(&text, overlapping_hits(text.len())));
    let Ok(outcome) = outcome else { return };
    let actuator = RedactionActuator::new(MaskingMode::Label);
    c.bench_function("redact_label_mode", |b| {
        b.iter(|| actuator.redact(black_box(&text), &outcome.resolved))
    });
}

criterion_group!(benches, bench_scan, bench_merge, bench_redact);
criterion_main!(benches);
