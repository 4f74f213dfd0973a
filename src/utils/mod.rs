pub mod normalize;
pub mod tracks;

pub use normalize::{normalize_email, normalize_name, normalize_whitespace, split_list};
pub use tracks::{item_track, research_session_tracks, suffix_track};
