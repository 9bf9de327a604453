//! Property-based invariant tests for the core vocabulary.
//!
//! 1. Applying `diff(a, b)` to `a` yields `b`.
//! 2. Diffing a tree against itself yields no patches.
//! 3. Path normalization is idempotent and always rooted.
//! 4. Theme override push/release restores the prior effective mode.
//! 5. The RNG helpers respect their ranges.

use folio_core::diff::{apply, diff};
use folio_core::nav::normalize_path;
use folio_core::rng::Lcg;
use folio_core::theme::{ThemeContext, ThemeMode};
use folio_core::view::{Element, Node};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const TAGS: &[&str] = &["div", "p", "span", "ul", "li"];
const CLASSES: &[&str] = &["a", "b", "header--opaque", "header--transparent"];

fn leaf_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-z ]{0,8}".prop_map(Node::Text),
        (0..TAGS.len(), proptest::option::of(0..CLASSES.len())).prop_map(|(t, c)| {
            let el = Element::new(TAGS[t]);
            match c {
                Some(c) => Node::from(el.class(CLASSES[c])),
                None => Node::from(el),
            }
        }),
    ]
}

fn tree_strategy() -> impl Strategy<Value = Node> {
    leaf_strategy().prop_recursive(4, 48, 5, |inner| {
        (
            0..TAGS.len(),
            proptest::option::of(0..CLASSES.len()),
            proptest::collection::vec(inner, 0..5),
        )
            .prop_map(|(t, c, children)| {
                let mut el = Element::new(TAGS[t]).children(children);
                if let Some(c) = c {
                    el = el.class(CLASSES[c]);
                }
                Node::from(el)
            })
    })
}

fn mode_strategy() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![Just(ThemeMode::Light), Just(ThemeMode::Dark)]
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Diff / apply
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn apply_of_diff_reaches_target(a in tree_strategy(), b in tree_strategy()) {
        let mut patched = a.clone();
        apply(&mut patched, &diff(&a, &b)).expect("patches fit the source tree");
        prop_assert_eq!(patched, b);
    }

    #[test]
    fn self_diff_is_empty(a in tree_strategy()) {
        prop_assert!(diff(&a, &a).is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Path normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalization_idempotent(raw in "[a-z/?#=&]{0,24}") {
        let once = normalize_path(&raw);
        prop_assert!(once.starts_with('/'));
        prop_assert!(once == "/" || !once.ends_with('/'));
        prop_assert!(!once.contains("//"));
        prop_assert!(!once.contains('?') && !once.contains('#'));
        prop_assert_eq!(normalize_path(&once), once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Theme round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn override_round_trip_restores_mode(
        pref in mode_strategy(),
        forced in mode_strategy(),
        outer in proptest::option::of(mode_strategy()),
    ) {
        let mut ctx = ThemeContext::new(pref);
        if let Some(mode) = outer {
            ctx.push_override("outer", mode);
        }
        let before = ctx.effective();
        ctx.set_is_home_page("home", true, forced);
        prop_assert_eq!(ctx.effective(), forced);
        ctx.set_is_home_page("home", false, forced);
        prop_assert_eq!(ctx.effective(), before);
    }

    #[test]
    fn toggle_twice_is_identity(pref in mode_strategy()) {
        let mut ctx = ThemeContext::new(pref);
        ctx.toggle();
        ctx.toggle();
        prop_assert_eq!(ctx.preference(), pref);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. RNG ranges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rng_ranges_hold(seed in any::<u64>(), lo in -100.0f64..100.0, span in 0.001f64..50.0, len in 1usize..500) {
        let mut rng = Lcg::new(seed);
        for _ in 0..32 {
            let v = rng.range_f64(lo, lo + span);
            prop_assert!(v >= lo && v <= lo + span);
            prop_assert!(rng.index(len) < len);
        }
    }
}
