use crate::utils::{edit_distance, find_similar, suggestion_distance};

#[test]
fn distance_to_empty_is_length() {
    assert_eq!(edit_distance("", "Master"), 6);
    assert_eq!(edit_distance("PCM", ""), 3);
}

#[test]
fn distance_counts_edits() {
    assert_eq!(edit_distance("Master", "Master"), 0);
    assert_eq!(edit_distance("Master", "Mastr"), 1);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn similar_picks_closest() {
    let names = ["Master Playback Volume", "Master Capture Volume", "Tone"];
    assert_eq!(
        find_similar("Master Playbak Volume", names, 4),
        Some("Master Playback Volume")
    );
}

#[test]
fn similar_respects_budget() {
    let names = ["Headphone", "Speaker"];
    assert_eq!(find_similar("Mic", names, 2), None);
}

#[test]
fn similar_prefers_first_on_tie() {
    let names = ["vol1", "vol2"];
    assert_eq!(find_similar("vol3", names, 2), Some("vol1"));
}

#[test]
fn budget_is_clamped() {
    assert_eq!(suggestion_distance("a"), 2);
    assert_eq!(suggestion_distance("twelve chars"), 4);
    assert_eq!(suggestion_distance("a much longer control name"), 4);
}
