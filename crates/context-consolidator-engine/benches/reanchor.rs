use context_consolidator_engine::{DocumentId, Reanchorer, SnippetAnchor, TextDocument, TextRange};
use criterion::{Criterion, criterion_group, criterion_main};
mod common;

fn bench_reanchor(c: &mut Criterion) {
    let mut group = c.benchmark_group("reanchor");
    group.sample_size(10);

    let content = common::generate_source_file(200);
    // the last function, so every strategy walks the whole file
    let first = 2 + 8 * 199;
    let captured = common::lines_of(&content, first, first + 6);
    let anchor = SnippetAnchor::new(DocumentId::from("bench"), captured, TextRange::default());
    let reanchorer = Reanchorer::default();

    let unchanged = TextDocument::from(content.as_str());
    group.bench_function("unchanged", |b| {
        b.iter(|| reanchorer.reanchor(std::hint::black_box(&anchor), &unchanged));
    });

    let shifted = TextDocument::from(common::with_comments_inserted(&content));
    group.bench_function("shifted", |b| {
        b.iter(|| reanchorer.reanchor(std::hint::black_box(&anchor), &shifted));
    });

    let edited = content.replace("seen.len()", "seen.len() + 1");
    let edited = TextDocument::from(edited);
    group.bench_function("fuzzy_lines", |b| {
        b.iter(|| reanchorer.reanchor(std::hint::black_box(&anchor), &edited));
    });

    let unrelated = TextDocument::from("nothing in common\n".repeat(2000));
    group.bench_function("collapse", |b| {
        b.iter(|| reanchorer.reanchor(std::hint::black_box(&anchor), &unrelated));
    });

    group.finish();
}

criterion_group!(benches, bench_reanchor);
criterion_main!(benches);
