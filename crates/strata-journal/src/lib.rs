//! # strata-journal
//!
//! A note journal split into three layers:
//!
//! | Layer | Units | Holds |
//! |-------|-------|-------|
//! | `entity` | `note` | the `Note` type and its rules |
//! | `gateway` | `codec`, `file_store` | JSON lines storage |
//! | `interactor` | `errors`, `add_entity`, `list_entities` | use cases |
//!
//! Units refer to each other through the layer aliases only, so a test can
//! substitute the `gateway` layer and weave the real `add_entity` source
//! against it (see `tests/unit/add_entity_substitution_test.rs`).

strata::layers! {
    pub entity: note;
    pub gateway: codec, file_store;
    pub interactor: errors, add_entity, list_entities;
}

mod add_entity;
mod codec;
mod errors;
mod file_store;
mod list_entities;
mod note;
