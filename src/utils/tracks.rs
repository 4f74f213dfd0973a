/// Track display utilities
///
/// In the main event, item IDs carry a suffix naming the track they were
/// accepted to: `123-srw`, `45-tacl`, `7-demos`. Workshops and co-located
/// events use their own name as the only track.

/// Known ID suffixes and the track names shown in the app
const TRACK_SUFFIXES: &[(&str, &str)] = &[
    ("srw", "SRW"),
    ("tacl", "TACL"),
    ("demos", "Demos"),
    ("industry", "Industry"),
    ("tutorial", "Tutorial"),
];

/// Track of main-event items without a suffix
pub const MAIN_TRACK: &str = "Main";

/// Track every main-event paper and poster session belongs to
pub const RESEARCH_TRACK: &str = "Research";

/// Display name for the track encoded in an item ID suffix
///
/// # Examples
/// ```
/// use appagenda::utils::suffix_track;
///
/// assert_eq!(suffix_track("123-srw"), Some("SRW"));
/// assert_eq!(suffix_track("45-TACL"), Some("TACL"));
/// assert_eq!(suffix_track("123"), None);
/// assert_eq!(suffix_track("123-unknown"), None);
/// ```
pub fn suffix_track(local_id: &str) -> Option<&'static str> {
    let (_, suffix) = local_id.rsplit_once('-')?;
    let suffix = suffix.to_lowercase();
    TRACK_SUFFIXES
        .iter()
        .find(|(key, _)| *key == suffix)
        .map(|(_, display)| *display)
}

/// Track for a single agenda item
///
/// # Examples
/// ```
/// use appagenda::utils::item_track;
///
/// assert_eq!(item_track("main", "main", "12-demos"), "Demos");
/// assert_eq!(item_track("main", "main", "12"), "Main");
/// assert_eq!(item_track("BEA", "main", "12-demos"), "BEA");
/// ```
pub fn item_track(event: &str, main_event: &str, local_id: &str) -> String {
    if event == main_event {
        suffix_track(local_id).unwrap_or(MAIN_TRACK).to_string()
    } else {
        event.to_string()
    }
}

/// Tracks for a research session in the main event: "Research" followed by
/// the distinct suffix tracks of its items in first-seen order.
pub fn research_session_tracks<'a>(item_ids: impl IntoIterator<Item = &'a str>) -> String {
    let mut tracks: Vec<&'static str> = Vec::new();
    for id in item_ids {
        if let Some(track) = suffix_track(id) {
            if !tracks.contains(&track) {
                tracks.push(track);
            }
        }
    }

    let mut display = RESEARCH_TRACK.to_string();
    for track in tracks {
        display.push_str("; ");
        display.push_str(track);
    }
    display
}
