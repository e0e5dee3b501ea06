use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crossword_csp::{find_fill, FillConfig, Puzzle, WordList};

const STRUCTURE: &str = "___\n___\n___";
const WORDS: &[&str] = &[
    "BIT", "ACE", "DEN", "BAD", "ICE", "TEN", "BAN", "TIN", "CAD", "DIE", "ATE", "TEA", "EAT",
    "NET", "ANT", "TAN", "CAT", "ACT", "BET", "BED",
];

pub fn criterion_benchmark(c: &mut Criterion) {
    let puzzle = Puzzle::from_structure(STRUCTURE).unwrap();
    let words = WordList::new(WORDS.iter().copied());

    c.bench_function("fill 3x3", |b| {
        b.iter(|| find_fill(black_box(&puzzle), black_box(&words), &FillConfig::default()))
    });

    let config = FillConfig::default().with_initial_arc_consistency(false);
    c.bench_function("fill 3x3 without arc consistency", |b| {
        b.iter(|| find_fill(black_box(&puzzle), black_box(&words), &config))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
