//! Export Rendering Benchmarks
//!
//! Layout and PDF serialization cost for flashcard decks and quizzes.
//!
//! Run with: `cargo bench --bench export_rendering`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use study_coach_server::export::{render, ExportRequest, FlashcardRecord, QuizRecord};

fn flashcard_deck(count: usize) -> ExportRequest<FlashcardRecord> {
    ExportRequest {
        title: "Benchmark Deck".to_string(),
        records: (1..=count)
            .map(|i| FlashcardRecord {
                question: format!("What is concept number {}?", i),
                answer: format!("Concept {} is explained by a short sentence.", i),
            })
            .collect(),
    }
}

fn quiz(count: usize) -> ExportRequest<QuizRecord> {
    ExportRequest {
        title: "Benchmark Quiz".to_string(),
        records: (1..=count)
            .map(|i| QuizRecord {
                question: format!("Which option describes item {}?", i),
                options: (0..4).map(|o| format!("Option {}", o)).collect(),
                answer: "Option 1".to_string(),
            })
            .collect(),
    }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    for count in [6, 60, 600] {
        let request = flashcard_deck(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("flashcards", count), &request, |b, request| {
            b.iter(|| render(black_box(request)))
        });
    }

    group.finish();
}

fn bench_pdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf");

    for count in [6, 60, 600] {
        let flashcards = render(&flashcard_deck(count));
        group.bench_with_input(BenchmarkId::new("flashcards", count), &flashcards, |b, document| {
            b.iter(|| document.to_pdf().unwrap())
        });

        let quiz = render(&quiz(count));
        group.bench_with_input(BenchmarkId::new("quiz", count), &quiz, |b, document| {
            b.iter(|| document.to_pdf().unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout, bench_pdf);
criterion_main!(benches);
