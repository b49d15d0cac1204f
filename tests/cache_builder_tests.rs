//! Integration tests for static-cache building and generation merging

use qlat::cache::{format_cache, parse_cache, ThresholdCache, ThresholdCacheBuilder};

fn trec(entries: &[(u32, u32, f64)]) -> String {
    entries
        .iter()
        .map(|&(id, rank, score)| format!("{id}\tQ0\tdoc{rank}\t{rank}\t{score}\twandbl"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn build_then_merge_next_generation() {
    // Generation 1
    let ranked = trec(&[(1, 10, 4.0), (2, 10, 6.0)]);
    let queries = "1;rust language\n2;simd vectors\n";
    let gen1 = ThresholdCacheBuilder::new(10).build(&ranked, queries).unwrap();
    assert_eq!(gen1.len(), 2);
    assert_eq!(gen1["rust language"], 4.0);

    // Persist and reload, as the CLI does between generations
    let reloaded = parse_cache(&format_cache(&gen1)).unwrap();
    assert_eq!(reloaded, gen1);

    // Generation 2 recomputes one query and adds another
    let ranked = trec(&[(1, 10, 5.5), (2, 10, 9.0)]);
    let queries = "1;rust language\n2;query processing\n";
    let gen2 = ThresholdCacheBuilder::new(10)
        .with_prior(reloaded)
        .build(&ranked, queries)
        .unwrap();

    assert_eq!(gen2.len(), 3);
    assert_eq!(gen2["rust language"], 5.5); // overridden
    assert_eq!(gen2["simd vectors"], 6.0); // persisted from gen 1
    assert_eq!(gen2["query processing"], 9.0); // new
}

#[test]
fn groups_larger_than_k_only_take_rank_k() {
    let ranked = trec(&[(1, 1, 9.0), (1, 2, 8.0), (1, 3, 7.0), (1, 4, 6.0)]);
    let queries = "1;a\n";
    let cache = ThresholdCacheBuilder::new(3).build(&ranked, queries).unwrap();
    assert_eq!(cache["a"], 7.0);
}

#[test]
fn non_positive_thresholds_produce_no_entry() {
    let ranked = trec(&[(1, 5, 0.0), (2, 5, -1.5), (3, 5, 2.0)]);
    let queries = "1;a\n2;b\n3;c\n";
    let cache = ThresholdCacheBuilder::new(5).build(&ranked, queries).unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(cache["c"], 2.0);
}

#[test]
fn desynchronized_streams_fail_loudly() {
    let ranked = trec(&[(1, 5, 1.0), (9, 5, 2.0)]);
    let queries = "1;a\n2;b\n";
    let err = ThresholdCacheBuilder::new(5)
        .build(&ranked, queries)
        .unwrap_err();
    assert!(err.to_string().contains("desynchronized"));
}

#[test]
fn query_text_with_semicolons_survives_the_round_trip() {
    // Split is on the first separator only
    let mut cache = ThresholdCache::new();
    cache.insert("a".to_string(), 1.0);
    let parsed = parse_cache("a;1.000000\n").unwrap();
    assert_eq!(parsed, cache);

    let queries = "1;term one;term two\n";
    let ranked = trec(&[(1, 5, 3.0)]);
    let built = ThresholdCacheBuilder::new(5).build(&ranked, queries).unwrap();
    assert_eq!(built["term one;term two"], 3.0);
}

#[test]
fn empty_streams_build_empty_cache() {
    let cache = ThresholdCacheBuilder::new(5).build("", "").unwrap();
    assert!(cache.is_empty());
}
