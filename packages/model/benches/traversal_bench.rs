use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_model::mutations::{remove_in_range, split_block_at_path_and_offset};
use folio_model::traversal::{find_backward_from, find_forward_from, next, walk};
use folio_model::{is_selectable, Block, Inline};

fn document(sections: usize) -> Block {
    let blocks = (0..sections)
        .flat_map(|index| {
            vec![
                Block::text_block("heading", format!("Section {}", index)),
                Block::with_inlines(
                    "paragraph",
                    vec![
                        Inline::text("Lorem ipsum dolor sit amet, "),
                        Inline::text("consectetur adipiscing elit"),
                    ],
                ),
                Block::with_blocks(
                    "bullet_list",
                    vec![
                        Block::with_blocks("list_item", vec![Block::text_block("paragraph", "first")]),
                        Block::with_blocks("list_item", vec![Block::text_block("paragraph", "second")]),
                    ],
                ),
            ]
        })
        .collect();
    Block::with_blocks("doc", blocks)
}

fn walk_document(c: &mut Criterion) {
    let root = document(100);

    c.bench_function("walk_document", |b| {
        b.iter(|| walk(next, &[], black_box(&root)).count())
    });
}

fn find_selectable(c: &mut Criterion) {
    let root = document(100);
    let end = vec![299, 1, 0, 0];

    c.bench_function("find_forward_selectable", |b| {
        b.iter(|| find_forward_from(|_, node| is_selectable(node), black_box(&[150]), &root))
    });

    c.bench_function("find_backward_selectable", |b| {
        b.iter(|| find_backward_from(|_, node| is_selectable(node), black_box(&end), &root))
    });
}

fn edit_document(c: &mut Criterion) {
    let root = document(100);

    c.bench_function("split_mid_document", |b| {
        b.iter(|| split_block_at_path_and_offset(black_box(&[151, 0]), 5, &root))
    });

    c.bench_function("remove_range_mid_document", |b| {
        b.iter(|| remove_in_range(black_box(&[100, 1]), black_box(&[200, 0]), &root))
    });
}

criterion_group!(benches, walk_document, find_selectable, edit_document);
criterion_main!(benches);
