//! # Chat Rooms
//!
//! Pure helpers around room identifiers: minting new ones, turning them into
//! shareable invitation links, and reading them back out of a pasted link.

/// Query parameter carrying the room id in an invitation link.
const ROOM_PARAM: &str = "room";
/// Number of hex characters kept from the uuid when minting a room id.
const ROOM_ID_LEN: usize = 12;

/// Mint a new room id: the first 12 hex digits of a uuid v4.
pub fn new_room_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(ROOM_ID_LEN);
    id
}

/// Whether `id` can be used as a room id.
///
/// Ids are limited to ASCII alphanumerics, `-` and `_`, so they survive a
/// trip through an invitation link's query string unescaped.
pub fn is_valid_room_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Derive the invitation link for `room_id`.
///
/// Pure: the same base and id always give the same link.
pub fn invitation_link(base_url: &str, room_id: &str) -> String {
    format!("{}/?{}={}", base_url.trim_end_matches('/'), ROOM_PARAM, room_id)
}

/// Extract a room id from user input.
///
/// Accepts either a full invitation link (anything with a `?`, the `room`
/// query parameter is read) or a bare room id. Ids outside the room id
/// alphabet are rejected.
pub fn room_id_from_invitation(input: &str) -> Option<String> {
    let input = input.trim();

    let candidate = match input.split_once('?') {
        None => input,
        Some((_, query)) => query
            .split(['&', '#'])
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == ROOM_PARAM)
            .map(|(_, value)| value.trim())?,
    };

    is_valid_room_id(candidate).then(|| candidate.to_string())
}
