//! # Memo Pad Example
//!
//! Demonstrates the full jotkit stack on the classic flat-file API
//! exercises:
//!
//! 1. **To-do list** — create/delete with auto-incrementing, never-reused ids
//! 2. **Memo pad** — partial updates that only touch the fields present
//! 3. **Access counter** — a persisted counter that survives a restart
//! 4. **API keys** — issue, authenticate, revoke against a shared key file
//!
//! Record fields are plain serde structs implementing `RecordFields`; the
//! stores persist them as pretty-printed JSON documents, one file (or
//! in-memory document) per store.
//!
//! Run: `cargo run -p jot-example-memos`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jot_auth::{AuthError, KeyAuthenticator};
use jot_kit::prelude::*;
use jot_store::{CounterStore, FileConfig, JsonFileDocument, MemoryDocument, RecordStore, StoreError};

// ── Field types ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Todo {
    text: String,
}

#[derive(Default)]
struct TodoDraft {
    text: Option<String>,
}

impl RecordFields for Todo {
    type Draft = TodoDraft;
    type Patch = TodoDraft;

    fn from_draft(draft: TodoDraft) -> Result<Self, ValidationError> {
        match draft.text {
            Some(text) if !text.is_empty() => Ok(Todo { text }),
            Some(_) => Err(ValidationError::invalid("text", "must not be empty")),
            None => Err(ValidationError::missing("text")),
        }
    }

    fn apply_patch(&mut self, patch: TodoDraft) -> Result<(), ValidationError> {
        if let Some(text) = patch.text {
            if text.is_empty() {
                return Err(ValidationError::invalid("text", "must not be empty"));
            }
            self.text = text;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Memo {
    text: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct MemoDraft {
    text: Option<String>,
    tags: Option<Vec<String>>,
}

impl RecordFields for Memo {
    type Draft = MemoDraft;
    type Patch = MemoDraft;

    fn from_draft(draft: MemoDraft) -> Result<Self, ValidationError> {
        let text = draft.text.ok_or_else(|| ValidationError::missing("text"))?;
        Ok(Memo {
            text,
            tags: draft.tags.unwrap_or_default(),
            created_at: Utc::now(),
        })
    }

    fn apply_patch(&mut self, patch: MemoDraft) -> Result<(), ValidationError> {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        Ok(())
    }
}

fn main() {
    println!("=== Memo Pad Example (Flat-File Stores) ===\n");

    demo_todos();
    demo_memo_patch();
    demo_counter();
    demo_api_keys();

    println!("\n=== Done! ===");
}

// ── Section 1: To-do list ─────────────────────────────────────────

fn demo_todos() {
    println!("1. To-do list with never-reused ids...\n");

    let mut todos: RecordStore<Todo, _> = RecordStore::open(MemoryDocument::new()).unwrap();

    let first = todos
        .create(TodoDraft {
            text: Some("buy milk".into()),
        })
        .unwrap();
    println!("   Created: [{}] {}", first.id, first.fields.text);

    let second = todos
        .create(TodoDraft {
            text: Some("call bob".into()),
        })
        .unwrap();
    println!("   Created: [{}] {}", second.id, second.fields.text);

    todos.delete(1).unwrap();
    println!("   Deleted id 1; {} todo(s) remain", todos.len());

    // Deleting again reports not-found instead of silently succeeding.
    let err = todos.delete(1).unwrap_err();
    println!("   Deleting id 1 again: {err}");
    assert!(matches!(err, StoreError::NotFound(1)));

    // A draft with no text never touches the store.
    let err = todos.create(TodoDraft::default()).unwrap_err();
    println!("   Creating without text: {err}");
    assert_eq!(todos.len(), 1);

    // The freed id is not handed out again.
    let third = todos
        .create(TodoDraft {
            text: Some("water plants".into()),
        })
        .unwrap();
    println!("   Next create got id {} (id 1 stays retired)", third.id);
    assert_eq!(third.id, 3);

    println!();
}

// ── Section 2: Memo pad with partial updates ──────────────────────

fn demo_memo_patch() {
    println!("2. Memo pad — patches touch only the fields present...\n");

    let mut memos: RecordStore<Memo, _> = RecordStore::open(MemoryDocument::new()).unwrap();

    let memo = memos
        .create(MemoDraft {
            text: Some("rustup update".into()),
            tags: Some(vec!["tools".into()]),
        })
        .unwrap();
    let id = memo.id;
    println!("   Created memo [{}]: {:?}", id, memo.fields.text);

    // Patch the tags; the text and createdAt stay as they were.
    let updated = memos
        .update(
            id,
            MemoDraft {
                tags: Some(vec!["tools".into(), "weekly".into()]),
                ..MemoDraft::default()
            },
        )
        .unwrap();
    println!(
        "   Patched tags: {:?} (text still {:?})",
        updated.fields.tags, updated.fields.text
    );
    assert_eq!(updated.fields.text, "rustup update");
    assert_eq!(updated.fields.tags.len(), 2);

    // Single-record lookup.
    let fetched = memos.get(id).unwrap();
    println!("   Fetched [{}] created at {}", fetched.id, fetched.fields.created_at);

    println!();
}

// ── Section 3: Persisted access counter ───────────────────────────

fn demo_counter() {
    println!("3. Access counter persisted across a restart...\n");

    let dir = std::env::temp_dir().join("jot-example-memos");
    let path = dir.join("access.json");
    // Start fresh on every run.
    let _ = std::fs::remove_file(&path);

    let config = FileConfig {
        create_parents: true,
        ..FileConfig::default()
    };

    {
        let mut hits =
            CounterStore::open(JsonFileDocument::with_config(&path, config.clone())).unwrap();
        hits.increment().unwrap();
        hits.increment().unwrap();
        hits.increment().unwrap();
        println!("   Counted {} hits into {}", hits.value(), path.display());
    }

    // "Restart": a brand-new store over the same file.
    let mut hits = CounterStore::open(JsonFileDocument::with_config(&path, config)).unwrap();
    println!("   Reopened counter reads {}", hits.value());
    assert_eq!(hits.value(), 3);

    hits.reset().unwrap();
    println!("   Reset to {}", hits.value());

    println!();
}

// ── Section 4: API keys ───────────────────────────────────────────

fn demo_api_keys() {
    println!("4. API keys — issue, authenticate, revoke...\n");

    let mut auth = KeyAuthenticator::new(MemoryDocument::new());

    let issued = auth.issue().unwrap();
    println!("   Issued key {}... ({})", &issued.key[..8], issued.created_at);

    // No credential → the request never reaches a handler.
    let err = auth.authenticate(None).unwrap_err();
    println!("   No key presented: {err}");
    assert!(matches!(err, AuthError::MissingCredential));

    // Wrong credential.
    let err = auth.authenticate(Some("wrong-key")).unwrap_err();
    println!("   Wrong key presented: {err}");
    assert!(matches!(err, AuthError::InvalidCredential));

    // The real one.
    let matched = auth.authenticate(Some(&issued.key)).unwrap();
    println!("   Valid key accepted (issued {})", matched.created_at);

    // Revoke and try again.
    auth.revoke(&issued.key).unwrap();
    let err = auth.authenticate(Some(&issued.key)).unwrap_err();
    println!("   After revocation: {err}");
    assert!(matches!(err, AuthError::InvalidCredential));
}
