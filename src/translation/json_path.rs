//! Setting values at a dotted path inside a JSON document.

use serde_json::{
    Map,
    Value,
};

use super::MessageKey;

/// Sets `value` at the path described by `key`, creating intermediate objects.
///
/// Existing siblings are kept. An intermediate that is not an object is
/// replaced by one, except for arrays addressed with a decimal index, which
/// are indexed (and padded with `null` when the index is past the end).
///
/// # Examples
/// ```
/// use serde_json::json;
/// use translation_manager_language_server::translation::{MessageKey, set_at_path};
///
/// let mut doc = json!({ "common": { "cancel": "Cancel" } });
/// let key = MessageKey::parse("common.save").unwrap();
///
/// set_at_path(&mut doc, &key, json!("Save"));
///
/// assert_eq!(doc, json!({ "common": { "cancel": "Cancel", "save": "Save" } }));
/// ```
pub fn set_at_path(root: &mut Value, key: &MessageKey, value: Value) {
    let mut current = root;
    let mut segments = key.segments().peekable();

    while let Some(segment) = segments.next() {
        let slot = child_mut(current, segment);
        if segments.peek().is_none() {
            *slot = value;
            return;
        }
        current = slot;
    }
}

/// Returns the child slot for `segment`, turning `container` into an object if needed.
fn child_mut<'a>(container: &'a mut Value, segment: &str) -> &'a mut Value {
    if let Some(index) = prepare_array_index(container, segment) {
        return &mut container[index];
    }

    if !container.is_object() {
        *container = Value::Object(Map::new());
    }
    // Inserts `null` for a missing key; `container` is an object here.
    &mut container[segment]
}

/// Most `null` entries added to reach an index past the end of an array.
const MAX_ARRAY_PADDING: usize = 1024;

/// Returns the index to use when `container` is an array and `segment` is a canonical index.
///
/// The array is grown so that the index is in bounds. An index further than
/// [`MAX_ARRAY_PADDING`] past the end is not an index; the segment is then
/// treated as an object key.
fn prepare_array_index(container: &mut Value, segment: &str) -> Option<usize> {
    let Value::Array(items) = container else {
        return None;
    };
    if !is_canonical_index(segment) {
        return None;
    }
    let index = segment.parse::<usize>().ok()?;
    if index.saturating_sub(items.len()) > MAX_ARRAY_PADDING {
        return None;
    }
    if items.len() <= index {
        items.resize(index.checked_add(1)?, Value::Null);
    }
    Some(index)
}

/// `0`, `7`, `42` are indices; `07`, `+1`, `-1` and `1.5` are plain keys.
fn is_canonical_index(segment: &str) -> bool {
    !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'))
}
