use std::collections::BTreeMap;
use std::sync::RwLock;

use bazaar_auth::AuthService;

use crate::models::{Item, ItemPatch};

/// Application state shared across all handlers
pub struct AppState {
    pub auth: AuthService,
    pub items: ItemStore,
}

impl AppState {
    pub fn new(auth: AuthService, items: ItemStore) -> Self {
        Self { auth, items }
    }
}

/// In-memory item table, the only mutable state in the app.
///
/// The lock is held for single map operations and never across an
/// await point.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<BTreeMap<u32, Item>>,
}

impl ItemStore {
    pub fn new(seed: impl IntoIterator<Item = (u32, Item)>) -> Self {
        Self {
            items: RwLock::new(seed.into_iter().collect()),
        }
    }

    /// The demo inventory the server starts with.
    pub fn with_demo_items() -> Self {
        Self::new([
            (
                1,
                Item {
                    name: Some("Foo".to_string()),
                    price: Some(50.2),
                    ..Item::default()
                },
            ),
            (
                2,
                Item {
                    name: Some("Bar".to_string()),
                    description: Some("The bartenders".to_string()),
                    price: Some(62.0),
                    tax: Some(20.2),
                    ..Item::default()
                },
            ),
            (
                3,
                Item {
                    name: Some("Baz".to_string()),
                    price: Some(50.2),
                    tax: Some(10.5),
                    ..Item::default()
                },
            ),
        ])
    }

    pub fn get(&self, id: u32) -> Option<Item> {
        self.items.read().unwrap().get(&id).cloned()
    }

    /// Merge a patch into the stored item and return the updated copy,
    /// or `None` when the id is unknown.
    pub fn update(&self, id: u32, patch: ItemPatch) -> Option<Item> {
        let mut items = self.items.write().unwrap();
        let item = items.get_mut(&id)?;
        item.apply(patch);
        Some(item.clone())
    }
}
