use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opportunity_search::data::paginator::Paginator;
use opportunity_search::data::record::Record;
use opportunity_search::data::record_store::RecordStore;
use opportunity_search::data::search_filter::SearchFilter;
use opportunity_search::data::sort::{SortDirection, SortSpec};

fn create_test_store(rows: usize) -> RecordStore {
    let accounts = vec![
        "Acme Corp",
        "Globex",
        "Initech",
        "Umbrella",
        "Hooli",
        "Stark Industries",
    ];
    let stages = vec![
        "Prospecting",
        "Qualification",
        "Proposal",
        "Negotiation",
        "Closed Won",
    ];

    let records = (0..rows)
        .map(|i| {
            Record::new(format!("006{:012}", i), format!("Opportunity {}", i))
                .with_attribute("accountName", accounts[i % accounts.len()])
                .with_attribute("stageName", stages[i % stages.len()])
                .with_attribute("amount", (i % 997) as f64 * 125.5)
        })
        .collect();

    let mut store = RecordStore::new();
    store.set_records(records);
    store
}

fn benchmark_search_filter(c: &mut Criterion) {
    let store_10k = create_test_store(10_000);
    let store_50k = create_test_store(50_000);

    let mut group = c.benchmark_group("search_filter");

    group.bench_function("10k_rows", |b| {
        b.iter(|| {
            let result = SearchFilter::apply(black_box("Acme"), &store_10k);
            assert!(!result.is_empty());
        });
    });

    group.bench_function("50k_rows", |b| {
        b.iter(|| {
            let result = SearchFilter::apply(black_box("Acme"), &store_50k);
            assert!(!result.is_empty());
        });
    });

    // No match anywhere still scans every record
    group.bench_function("50k_rows_no_match", |b| {
        b.iter(|| {
            let result = SearchFilter::apply(black_box("Wayne Enterprises"), &store_50k);
            assert!(result.is_empty());
        });
    });

    group.finish();
}

fn benchmark_sort_and_paginate(c: &mut Criterion) {
    let store = create_test_store(50_000);

    let mut group = c.benchmark_group("sort_and_paginate");

    group.bench_function("sort_amount_desc", |b| {
        let spec = SortSpec::new("amount", SortDirection::Descending);
        b.iter(|| {
            let mut working = store.records().to_vec();
            spec.apply(black_box(&mut working));
            assert_eq!(working.len(), 50_000);
        });
    });

    group.bench_function("walk_pages", |b| {
        let mut paginator = Paginator::new(20);
        paginator.set_working_set(store.records().to_vec());
        b.iter(|| {
            while paginator.next() {
                black_box(paginator.visible_page());
            }
            while paginator.previous() {}
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_search_filter, benchmark_sort_and_paginate);
criterion_main!(benches);
