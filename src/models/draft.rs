/// An entry of a list being committed: either a reference to an item row
/// that already exists, or the fields of a row to insert.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDraft<T> {
    Existing(i64),
    New(T),
}

impl<T> ItemDraft<T> {
    /// `0` means "create", matching the request payloads
    pub fn from_request(existing_id: i64, fields: T) -> Self {
        if existing_id != 0 {
            ItemDraft::Existing(existing_id)
        } else {
            ItemDraft::New(fields)
        }
    }
}
