//! Repeated sections and the document-wide single-slot undo.
//!
//! A repeatable section type's template is its `Default` form state. Adding
//! appends a fresh instance; removing tags an instance as removed rather than
//! dropping it, so it can be restored. At most one removed instance exists in
//! the whole form tree: a new removal evicts the previous one for good.

use super::{SectionForm, SectionKey};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(u32);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Monotonic id source, owned by the editing context.
#[derive(Debug, Clone, Default)]
pub struct SectionIds {
    next: u32,
}

impl SectionIds {
    pub fn next(&mut self) -> SectionId {
        self.next += 1;
        SectionId(self.next)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry<T> {
    id: SectionId,
    state: T,
    removed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionList<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for SectionList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> SectionList<T> {
    pub fn push(&mut self, ids: &mut SectionIds, state: T) -> SectionId {
        let id = ids.next();
        self.entries.push(Entry {
            id,
            state,
            removed: false,
        });
        id
    }

    /// Live instances in display order; the removed one is skipped.
    pub fn live(&self) -> impl Iterator<Item = (SectionId, &T)> + '_ {
        self.entries
            .iter()
            .filter(|e| !e.removed)
            .map(|e| (e.id, &e.state))
    }

    pub fn live_mut(&mut self) -> impl Iterator<Item = (SectionId, &mut T)> + '_ {
        self.entries
            .iter_mut()
            .filter(|e| !e.removed)
            .map(|e| (e.id, &mut e.state))
    }

    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.removed).count()
    }

    pub fn get(&self, id: SectionId) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.id == id && !e.removed)
            .map(|e| &e.state)
    }

    pub fn get_mut(&mut self, id: SectionId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id && !e.removed)
            .map(|e| &mut e.state)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Default> SectionList<T> {
    /// Instantiate the template and append it.
    pub fn add(&mut self, ids: &mut SectionIds) -> SectionId {
        self.push(ids, T::default())
    }
}

impl<T: SectionForm> SectionList<T> {
    /// Replace the contents with one instance per record.
    pub fn load_all<'r>(
        &mut self,
        records: impl IntoIterator<Item = &'r T::Record>,
        ids: &mut SectionIds,
    ) where
        T::Record: 'r,
    {
        self.clear();
        for record in records {
            let mut state = T::default();
            state.load(record, ids);
            self.push(ids, state);
        }
    }

    /// Unload live instances, dropping the empty ones.
    pub fn unload_all(&self) -> Vec<T::Record> {
        self.live()
            .map(|(_, state)| state.unload())
            .filter(|record| !crate::codec::is_empty_message(record))
            .collect()
    }

    pub fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        for (_, state) in self.live() {
            state.collect_invalid(out);
        }
    }
}

/// Tree walk for removal and undo across nested section lists.
pub trait SectionTree {
    /// Validation scope an instance of this type opens, if any.
    fn scope(_id: SectionId) -> Option<SectionKey>
    where
        Self: Sized,
    {
        None
    }

    /// Tag the live section `id` as removed. Returns the enclosing validated
    /// sections, innermost first, or `None` when `id` is not found.
    fn remove_section(&mut self, _id: SectionId) -> Option<Vec<SectionKey>> {
        None
    }

    /// Drop every removed section other than `keep`.
    fn purge_removed_except(&mut self, _keep: SectionId) {}

    /// Bring the removed section back. Returns whether anything was restored.
    fn restore_removed(&mut self) -> bool {
        false
    }
}

impl<T: SectionTree> SectionTree for SectionList<T> {
    fn remove_section(&mut self, id: SectionId) -> Option<Vec<SectionKey>> {
        for entry in self.entries.iter_mut().filter(|e| !e.removed) {
            if entry.id == id {
                entry.removed = true;
                return Some(Vec::new());
            }
            if let Some(mut path) = entry.state.remove_section(id) {
                path.extend(T::scope(entry.id));
                return Some(path);
            }
        }
        None
    }

    fn purge_removed_except(&mut self, keep: SectionId) {
        self.entries.retain(|e| !e.removed || e.id == keep);
        for entry in &mut self.entries {
            entry.state.purge_removed_except(keep);
        }
    }

    fn restore_removed(&mut self) -> bool {
        let mut restored = false;
        for entry in &mut self.entries {
            if entry.removed {
                entry.removed = false;
                restored = true;
            } else if entry.state.restore_removed() {
                restored = true;
            }
        }
        restored
    }
}

/// Remove `id` from the tree under `root`, evicting any earlier undo buffer.
pub fn remove<F: SectionTree>(root: &mut F, id: SectionId) -> Option<Vec<SectionKey>> {
    let path = root.remove_section(id)?;
    root.purge_removed_except(id);
    Some(path)
}

/// Restore the last removed section. No-op when nothing is buffered.
pub fn undo<F: SectionTree>(root: &mut F) -> bool {
    root.restore_removed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Leaf {
        label: String,
    }

    impl SectionTree for Leaf {}

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Parent {
        children: SectionList<Leaf>,
    }

    impl SectionTree for Parent {
        fn scope(id: SectionId) -> Option<SectionKey> {
            Some(SectionKey::Outcome(id))
        }
        fn remove_section(&mut self, id: SectionId) -> Option<Vec<SectionKey>> {
            self.children.remove_section(id)
        }
        fn purge_removed_except(&mut self, keep: SectionId) {
            self.children.purge_removed_except(keep);
        }
        fn restore_removed(&mut self) -> bool {
            self.children.restore_removed()
        }
    }

    fn labels(list: &SectionList<Leaf>) -> Vec<String> {
        list.live().map(|(_, l)| l.label.clone()).collect()
    }

    #[test]
    fn add_appends_fresh_templates() {
        let mut ids = SectionIds::default();
        let mut list = SectionList::<Leaf>::default();
        let a = list.add(&mut ids);
        let b = list.add(&mut ids);
        assert_ne!(a, b);
        assert_eq!(list.live_count(), 2);
        assert_eq!(list.get(a), Some(&Leaf::default()));
    }

    #[test]
    fn remove_then_undo_restores_the_section() {
        let mut ids = SectionIds::default();
        let mut list = SectionList::<Leaf>::default();
        list.push(&mut ids, Leaf { label: "a".into() });
        let b = list.push(&mut ids, Leaf { label: "b".into() });
        list.push(&mut ids, Leaf { label: "c".into() });

        assert_eq!(remove(&mut list, b), Some(vec![]));
        assert_eq!(labels(&list), vec!["a", "c"]);
        assert!(list.get(b).is_none());

        assert!(undo(&mut list));
        assert_eq!(labels(&list), vec!["a", "b", "c"]);
        assert!(!undo(&mut list));
    }

    #[test]
    fn second_removal_evicts_the_first() {
        let mut ids = SectionIds::default();
        let mut parent = Parent::default();
        let a = parent.children.push(&mut ids, Leaf { label: "a".into() });
        let b = parent.children.push(&mut ids, Leaf { label: "b".into() });

        remove(&mut parent, a);
        remove(&mut parent, b);
        assert!(undo(&mut parent));
        assert_eq!(labels(&parent.children), vec!["b"]);
        assert!(!undo(&mut parent));
    }

    #[test]
    fn nested_removal_reports_enclosing_scopes() {
        let mut ids = SectionIds::default();
        let mut outer = SectionList::<Parent>::default();
        let p = outer.add(&mut ids);
        let child = outer
            .get_mut(p)
            .map(|parent| parent.children.add(&mut ids))
            .unwrap();

        assert_eq!(remove(&mut outer, child), Some(vec![SectionKey::Outcome(p)]));
        assert_eq!(outer.get(p).unwrap().children.live_count(), 0);
        assert!(undo(&mut outer));
        assert_eq!(outer.get(p).unwrap().children.live_count(), 1);
    }

    #[test]
    fn eviction_crosses_lists() {
        let mut ids = SectionIds::default();
        let mut outer = SectionList::<Parent>::default();
        let p = outer.add(&mut ids);
        let q = outer.add(&mut ids);
        let child = outer.get_mut(p).unwrap().children.add(&mut ids);

        remove(&mut outer, child);
        remove(&mut outer, q);
        assert!(undo(&mut outer));
        assert_eq!(outer.live_count(), 2);
        assert_eq!(outer.get(p).unwrap().children.live_count(), 0);
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut ids = SectionIds::default();
        let mut list = SectionList::<Leaf>::default();
        let a = list.add(&mut ids);
        remove(&mut list, a);
        assert_eq!(remove(&mut list, SectionId(999)), None);
        assert!(undo(&mut list));
    }
}
