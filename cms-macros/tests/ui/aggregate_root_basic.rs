use cms_domain::aggregate_root::AggregateRoot;
use cms_domain::entity::Entity;
use cms_macros::{entity, entity_id};

#[entity_id]
struct NoteId(String);

#[entity(id = NoteId, aggregate_root = "note")]
struct Note {
    text: String,
}

fn main() {
    let note = Note::new(NoteId::new("n-1"), 0);
    assert_eq!(note.id().to_string(), "n-1");
    assert_eq!(Note::TYPE, "note");
    assert!(!note.has_pending_events());
    assert!(note.text.is_empty());
}
