//! Shared test fixtures: contexts and raw Telegram update payloads.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use super::AppContext;
use crate::naming::WordList;
use crate::telegram::Messenger;
use crate::thumbnail::ThumbnailPreparer;

pub const TOKEN: &str = "123456:TEST-TOKEN";
pub const CHAT_ID: i64 = 4242;
pub const DOCUMENT_FILE_ID: &str = "BQACAgIAAxkBAAIB";

/// Builds a context whose word list strips "Movie". The thumbnail is absent.
pub fn context(messenger: Arc<dyn Messenger>) -> (AppContext, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let ctx = AppContext::new(
        messenger,
        ThumbnailPreparer::new(dir.path().join("thumbnail.jpg")),
        Some(Arc::new(WordList::from_words(["Movie"]).unwrap())),
        dir.path(),
        TOKEN,
    );
    (ctx, dir)
}

fn message(extra: serde_json::Value) -> serde_json::Value {
    let mut message = json!({
        "message_id": 7,
        "date": 1_700_000_000,
        "chat": { "id": CHAT_ID, "type": "private", "first_name": "Dana" },
        "from": { "id": CHAT_ID, "is_bot": false, "first_name": "Dana" }
    });
    if let (Some(target), Some(fields)) = (message.as_object_mut(), extra.as_object()) {
        target.extend(fields.clone());
    }
    message
}

/// An update carrying a text message.
pub fn text_update(text: &str) -> String {
    let mut fields = json!({ "text": text });
    if text.starts_with('/') {
        let length = text.split_whitespace().next().map_or(0, |c| c.encode_utf16().count());
        fields["entities"] = json!([{ "type": "bot_command", "offset": 0, "length": length }]);
    }
    json!({ "update_id": 1001, "message": message(fields) }).to_string()
}

/// An update carrying a document.
pub fn document_update(file_name: Option<&str>) -> String {
    let mut document = json!({
        "file_id": DOCUMENT_FILE_ID,
        "file_unique_id": "AgADBQAC",
        "mime_type": "video/mp4",
        "file_size": 4
    });
    if let Some(name) = file_name {
        document["file_name"] = json!(name);
    }
    json!({ "update_id": 1002, "message": message(json!({ "document": document })) }).to_string()
}
