//! Library tree model: libraries, their items, one selection and a search filter

use indexmap::IndexMap;

use super::lib_id::LibId;

/// One library as reported by an adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub nickname: String,
    pub items: Vec<String>,
}

impl LibraryEntry {
    pub fn new(nickname: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            nickname: nickname.into(),
            items,
        }
    }
}

/// Source of the libraries shown in a tree, typically backed by a library table
pub trait LibTreeAdapter {
    fn libraries(&self) -> Vec<LibraryEntry>;
}

#[derive(Debug, Clone, Default)]
pub struct LibTree {
    libraries: IndexMap<String, Vec<String>>,
    selected: Option<LibId>,
    search: String,
}

impl LibTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the tree from `adapter`
    ///
    /// With `keep_state` the search text survives, as does the selection if
    /// the selected item still exists. Without it both are cleared.
    pub fn regenerate(&mut self, adapter: &dyn LibTreeAdapter, keep_state: bool) {
        self.libraries = adapter
            .libraries()
            .into_iter()
            .map(|lib| (lib.nickname, lib.items))
            .collect();

        if keep_state {
            if let Some(selected) = &self.selected {
                if !self.contains(selected) {
                    self.selected = None;
                }
            }
        } else {
            self.selected = None;
            self.search.clear();
        }

        tracing::debug!(
            libraries = self.libraries.len(),
            items = self.item_count(),
            keep_state,
            "library tree regenerated"
        );
    }

    pub fn library_count(&self) -> usize {
        self.libraries.len()
    }

    pub fn item_count(&self) -> usize {
        self.libraries.values().map(Vec::len).sum()
    }

    pub fn libraries(&self) -> impl Iterator<Item = &str> {
        self.libraries.keys().map(String::as_str)
    }

    pub fn items(&self, nickname: &str) -> &[String] {
        self.libraries.get(nickname).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &LibId) -> bool {
        self.items(id.nickname()).iter().any(|item| item == id.item())
    }

    /// Select an item; returns false, leaving the selection unchanged, if it is not in the tree
    pub fn select(&mut self, id: &LibId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn unselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_lib_id(&self) -> Option<&LibId> {
        self.selected.as_ref()
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.search = text.trim().to_string();
    }

    /// Items matching the search text, in tree order
    ///
    /// Every whitespace-separated term must appear, case-insensitively, in
    /// the item's `nickname:item` form. An empty search matches everything.
    pub fn visible_items(&self) -> Vec<LibId> {
        let terms: Vec<String> = self
            .search
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        self.libraries
            .iter()
            .flat_map(|(nickname, items)| items.iter().map(move |item| LibId::new(nickname.clone(), item.clone())))
            .filter(|id| {
                let text = id.to_string().to_lowercase();
                terms.iter().all(|term| text.contains(term.as_str()))
            })
            .collect()
    }
}
