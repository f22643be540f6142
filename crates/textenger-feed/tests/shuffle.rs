use textenger_feed::feed::{FeedTab, order_feed};
use textenger_feed::seed::SessionSeed;
use textenger_feed::shuffle::{SeededRng, hash_seed, shuffle_array, shuffle_posts_for_user};

fn sorted(mut v: Vec<u32>) -> Vec<u32> {
    v.sort_unstable();
    v
}

#[test]
fn hash_matches_rolling_polynomial() {
    assert_eq!(hash_seed(""), 0);
    assert_eq!(hash_seed("a"), 97);
    assert_eq!(hash_seed("ab"), 97 * 31 + 98);
}

#[test]
fn hash_wraps_at_32_bits() {
    assert_eq!(hash_seed("1700000000000-0.5"), -2_097_847_820);
}

#[test]
fn rng_stays_in_unit_interval_for_negative_hashes() {
    let mut rng = SeededRng::from_hash(i32::MIN);
    for _ in 0..1_000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v), "out of range: {v}");
    }
}

#[test]
fn known_seed_produces_known_order() {
    assert_eq!(shuffle_posts_for_user(&[1, 2, 3, 4, 5], "ab"), vec![3, 4, 2, 5, 1]);
    assert_eq!(
        shuffle_posts_for_user(&(1..=10).collect::<Vec<u32>>(), "1700000000000-0.5"),
        vec![6, 3, 7, 8, 4, 5, 9, 2, 1, 10]
    );
}

#[test]
fn shuffle_is_a_permutation() {
    let posts: Vec<u32> = (0..50).collect();
    for i in 0..20 {
        let seed = format!("1700000000{i:03}-0.{i}");
        let shuffled = shuffle_posts_for_user(&posts, &seed);
        assert_eq!(shuffled.len(), posts.len());
        assert_eq!(sorted(shuffled), posts);
    }
}

#[test]
fn shuffle_keeps_duplicates() {
    let posts = vec![1, 1, 2, 2, 2, 3];
    let shuffled = shuffle_posts_for_user(&posts, "dupes");
    assert_eq!(sorted(shuffled), posts);
}

#[test]
fn shuffle_is_deterministic() {
    let posts: Vec<u32> = (0..30).collect();
    let first = shuffle_posts_for_user(&posts, "session-a");
    let second = shuffle_posts_for_user(&posts, "session-a");
    assert_eq!(first, second);
}

#[test]
fn distinct_seeds_mostly_give_distinct_orders() {
    let posts: Vec<u32> = (0..10).collect();
    let differing = (0..100)
        .filter(|i| {
            let a = shuffle_posts_for_user(&posts, &format!("1700000000000-0.{i}1"));
            let b = shuffle_posts_for_user(&posts, &format!("1700000000000-0.{i}2"));
            a != b
        })
        .count();
    assert!(differing >= 90, "only {differing} of 100 seed pairs differed");
}

#[test]
fn degenerate_inputs_return_unchanged() {
    let empty: Vec<u32> = Vec::new();
    assert_eq!(shuffle_posts_for_user(&empty, "seed"), empty);
    assert_eq!(shuffle_posts_for_user(&[7], "seed"), vec![7]);
}

#[test]
fn empty_seed_returns_copy_in_original_order() {
    let posts: Vec<u32> = (0..10).collect();
    assert_eq!(shuffle_posts_for_user(&posts, ""), posts);
}

#[test]
fn unseeded_shuffle_is_a_permutation() {
    let items: Vec<u32> = (0..25).collect();
    assert_eq!(sorted(shuffle_array(&items)), items);
}

#[test]
fn explore_tab_uses_a_derived_seed() {
    let seed = SessionSeed::from("1700000000000-0.25");
    let posts: Vec<u32> = (0..12).collect();

    let home = order_feed(&posts, &seed, FeedTab::Home);
    let explore = order_feed(&posts, &seed, FeedTab::Explore);

    assert_eq!(home, shuffle_posts_for_user(&posts, seed.as_str()));
    assert_eq!(
        explore,
        shuffle_posts_for_user(&posts, "1700000000000-0.25-explore")
    );
}
