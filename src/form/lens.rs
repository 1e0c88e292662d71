//! Addressing a field inside the form tree.
//!
//! Views never hold references into the form. They hold a `Lens` (a path from
//! the root to the field plus the validated sections enclosing it) and turn
//! user input into an [`Edit`] that the orchestrator applies to its state.

use super::{SectionIds, SectionKey};
use crate::tracking::ChangeKind;
use std::fmt;
use std::rc::Rc;

type Getter<R, T> = Rc<dyn for<'a> Fn(&'a mut R) -> Option<&'a mut T>>;

fn getter<R, T, F>(f: F) -> Getter<R, T>
where
    F: for<'a> Fn(&'a mut R) -> Option<&'a mut T> + 'static,
{
    Rc::new(f)
}

pub struct Lens<R, T> {
    get: Getter<R, T>,
    /// Enclosing validated sections, outermost first.
    scope: Rc<Vec<SectionKey>>,
}

impl<R, T> Clone for Lens<R, T> {
    fn clone(&self) -> Self {
        Self {
            get: Rc::clone(&self.get),
            scope: Rc::clone(&self.scope),
        }
    }
}

impl<R, T> PartialEq for Lens<R, T> {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && Rc::ptr_eq(&self.get, &other.get)
    }
}

impl<R, T> fmt::Debug for Lens<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens").field("scope", &self.scope).finish()
    }
}

impl<R: 'static> Lens<R, R> {
    pub fn root() -> Self {
        Self {
            get: getter(|root: &mut R| Some(root)),
            scope: Rc::new(Vec::new()),
        }
    }
}

impl<R: 'static, T: 'static> Lens<R, T> {
    /// Narrow to a part of `T` that may not exist (a list entry).
    pub fn focus<U: 'static, F>(&self, f: F) -> Lens<R, U>
    where
        F: for<'a> Fn(&'a mut T) -> Option<&'a mut U> + 'static,
    {
        let parent = Rc::clone(&self.get);
        Lens {
            get: getter(move |root: &mut R| parent(root).and_then(|t| f(t))),
            scope: Rc::clone(&self.scope),
        }
    }

    /// Narrow to a field of `T` that always exists.
    pub fn field<U: 'static, F>(&self, f: F) -> Lens<R, U>
    where
        F: for<'a> Fn(&'a mut T) -> &'a mut U + 'static,
    {
        self.focus(move |t| Some(f(t)))
    }

    /// Narrow into a section that owns a validation indicator.
    pub fn section<U: 'static, F>(&self, key: SectionKey, f: F) -> Lens<R, U>
    where
        F: for<'a> Fn(&'a mut T) -> Option<&'a mut U> + 'static,
    {
        let mut lens = self.focus(f);
        let mut scope = (*self.scope).clone();
        scope.push(key);
        lens.scope = Rc::new(scope);
        lens
    }

    pub fn scope(&self) -> &[SectionKey] {
        &self.scope
    }

    pub fn get_mut<'a>(&self, root: &'a mut R) -> Option<&'a mut T> {
        (self.get)(root)
    }

    /// An edit that mutates the target with `f`.
    pub fn edit<F>(&self, change: ChangeKind, f: F) -> Edit<R>
    where
        F: Fn(&mut T) + 'static,
    {
        self.edit_with_ids(change, move |target, _| f(target))
    }

    /// An edit that may also add sections, and so needs the id source.
    pub fn edit_with_ids<F>(&self, change: ChangeKind, f: F) -> Edit<R>
    where
        F: Fn(&mut T, &mut SectionIds) + 'static,
    {
        let get = Rc::clone(&self.get);
        Edit {
            change,
            scope: Rc::clone(&self.scope),
            apply: Rc::new(move |root: &mut R, ids: &mut SectionIds| match get(root) {
                Some(target) => {
                    f(target, ids);
                    true
                }
                None => false,
            }),
        }
    }
}

/// A pending mutation of the form, produced by a view event.
pub struct Edit<R> {
    pub change: ChangeKind,
    pub scope: Rc<Vec<SectionKey>>,
    apply: Rc<dyn Fn(&mut R, &mut SectionIds) -> bool>,
}

impl<R> Clone for Edit<R> {
    fn clone(&self) -> Self {
        Self {
            change: self.change,
            scope: Rc::clone(&self.scope),
            apply: Rc::clone(&self.apply),
        }
    }
}

impl<R> fmt::Debug for Edit<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edit")
            .field("change", &self.change)
            .field("scope", &self.scope)
            .finish()
    }
}

impl<R> Edit<R> {
    /// Apply to `root`. False when the target no longer exists, e.g. its
    /// section was removed while the event was in flight.
    pub fn apply(&self, root: &mut R, ids: &mut SectionIds) -> bool {
        (self.apply)(root, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{SectionList, SectionTree, TextField};

    #[derive(Default)]
    struct Item(String);

    impl SectionTree for Item {}

    #[derive(Default)]
    struct Root {
        title: String,
        items: SectionList<Item>,
    }

    #[test]
    fn field_edits_reach_the_target() {
        let lens = Lens::<Root, Root>::root().field(|r: &mut Root| &mut r.title);
        let edit = lens.edit(ChangeKind::Blur, |title: &mut String| title.push_str("done"));
        let mut root = Root::default();
        assert!(edit.apply(&mut root, &mut SectionIds::default()));
        assert_eq!(root.title, "done");
        assert!(edit.scope.is_empty());
    }

    #[test]
    fn section_lenses_accumulate_scope_and_miss_removed_entries() {
        let mut ids = SectionIds::default();
        let mut root = Root::default();
        let id = root.items.push(&mut ids, Item("a".to_string()));

        let lens = Lens::<Root, Root>::root()
            .section(SectionKey::Outcome(id), move |r: &mut Root| r.items.get_mut(id));
        assert_eq!(lens.scope(), &[SectionKey::Outcome(id)]);

        let edit = lens.edit(ChangeKind::Change, |item: &mut Item| item.0.push('b'));
        assert!(edit.apply(&mut root, &mut ids));
        assert_eq!(root.items.get(id).map(|item| item.0.as_str()), Some("ab"));

        crate::form::sections::remove(&mut root.items, id);
        assert!(!edit.apply(&mut root, &mut ids));
    }

    #[test]
    fn text_fields_through_a_lens() {
        let mut field = TextField::float("x");
        let lens = Lens::<TextField, TextField>::root();
        lens.edit(ChangeKind::Input, |f: &mut TextField| f.set_text("1.5"))
            .apply(&mut field, &mut SectionIds::default());
        assert_eq!(field.as_float(), Some(1.5));
    }
}
