//! Property-based tests for message rendering

use super::*;
use proptest::prelude::*;

fn arb_video_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{11}"
}

fn arb_bad_video_id() -> impl Strategy<Value = String> {
    prop_oneof!["[A-Za-z0-9_-]{1,10}", "[A-Za-z0-9_-]{12,20}"]
}

fn arb_video_url(id: String) -> impl Strategy<Value = String> {
    prop_oneof![
        Just(format!("https://youtu.be/{id}")),
        Just(format!("https://www.youtube.com/watch?v={id}")),
        Just(format!("https://youtube.com/embed/{id}")),
        Just(format!("http://www.youtube.com/v/{id}")),
    ]
}

/// Plain prose without markup or URLs
fn arb_prose() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.#*\n-]{0,200}"
}

proptest! {
    #[test]
    fn prop_render_is_deterministic(text in any::<String>()) {
        prop_assert_eq!(render(&text), render(&text));
    }

    #[test]
    fn prop_prose_never_embeds(text in arb_prose()) {
        prop_assert!(!render(&text).contains("<iframe"));
    }

    #[test]
    fn prop_valid_link_embeds_its_id(
        url in arb_video_id().prop_flat_map(arb_video_url),
        prefix in "[a-zA-Z ]{0,20}",
    ) {
        let id = extract_video_id(&url).expect("generated url carries a valid id").to_string();
        let html = render(&format!("{prefix} {url}"));
        let expected = format!("youtube.com/embed/{id}\"");
        prop_assert!(html.contains(&expected));
        prop_assert_eq!(html.matches("<iframe").count(), 1);
    }

    #[test]
    fn prop_wrong_length_id_never_embeds(id in arb_bad_video_id()) {
        let html = render(&format!("watch https://youtu.be/{id}"));
        prop_assert!(!html.contains("<iframe"));
    }

    #[test]
    fn prop_one_embed_per_video_line(
        ids in proptest::collection::vec(arb_video_id(), 1..5),
    ) {
        let text = ids
            .iter()
            .map(|id| format!("video https://youtu.be/{id}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        prop_assert_eq!(render(&text).matches("<iframe").count(), ids.len());
    }

    #[test]
    fn prop_single_word_has_no_paragraph_wrapper(word in "[a-zA-Z]{1,30}") {
        prop_assert_eq!(render(&word), word);
    }
}
