use crate::input::InputBuffer;
use crate::markers::{derive_markers, Marker};
use crate::model::{DayKey, Todo, TodoId, TodoStore};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Idle,
    /// Holds the id of the todo being edited; the store still owns it.
    Editing(TodoId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(TodoId),
    Updated(TodoId),
    /// The edited todo was removed before the edit was committed. The edit
    /// ends and the input is cleared; the store is unchanged.
    Vanished(TodoId),
    /// Blank buffer; nothing changed.
    Ignored,
}

/// The store plus everything the screen selects or edits.
pub struct Session {
    store: TodoStore,
    selected_day: DayKey,
    edit: EditState,
    input: InputBuffer,
}

impl Session {
    pub fn new(store: TodoStore) -> Self {
        Session {
            store,
            selected_day: DayKey::new(),
            edit: EditState::Idle,
            input: InputBuffer::default(),
        }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn selected_day(&self) -> &str {
        &self.selected_day
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.edit {
            EditState::Editing(id) => Some(id.as_str()),
            EditState::Idle => None,
        }
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    /// Leaves the edit state and the input untouched. An edit committed after
    /// switching days lands on the new day.
    pub fn select_day(&mut self, day: impl Into<DayKey>) {
        self.selected_day = day.into();
        log::debug!("selected day {:?}", self.selected_day);
    }

    /// Starts editing `id`, loading its text into the input. Unknown ids are
    /// ignored.
    pub fn edit_todo(&mut self, id: &str) -> bool {
        let text = match self.store.get(id) {
            Some(todo) => todo.text.clone(),
            None => return false,
        };
        self.input.set(&text);
        self.edit = EditState::Editing(id.to_string());
        true
    }

    pub fn cancel_edit(&mut self) -> bool {
        if self.edit == EditState::Idle {
            return false;
        }
        self.edit = EditState::Idle;
        self.input.clear();
        true
    }

    /// Commits the input: updates the edited todo, or adds a new one on the
    /// selected day. A blank input changes nothing, including the edit state.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.input.is_blank() {
            return SubmitOutcome::Ignored;
        }
        let text = self.input.value().to_string();
        let outcome = match std::mem::replace(&mut self.edit, EditState::Idle) {
            EditState::Editing(id) => {
                if self.store.update(&id, &text, &self.selected_day) {
                    SubmitOutcome::Updated(id)
                } else {
                    log::debug!("edited todo {} no longer exists", id);
                    SubmitOutcome::Vanished(id)
                }
            }
            EditState::Idle => match self.store.add(&text, &self.selected_day) {
                Some(id) => SubmitOutcome::Added(id),
                None => SubmitOutcome::Ignored,
            },
        };
        self.input.clear();
        outcome
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.store.toggle_completed(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.store.remove(id)
    }

    pub fn visible_todos(&self) -> impl Iterator<Item = &Todo> + '_ {
        self.store.filter_by_day(&self.selected_day)
    }

    pub fn markers(&self) -> BTreeMap<DayKey, Marker> {
        derive_markers(self.store.todos(), &self.selected_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(TodoStore::default())
    }

    fn type_text(session: &mut Session, text: &str) {
        session.input_mut().set(text);
    }

    fn add(session: &mut Session, text: &str) -> TodoId {
        type_text(session, text);
        match session.submit() {
            SubmitOutcome::Added(id) => id,
            other => panic!("expected an add, got {:?}", other),
        }
    }

    #[test]
    fn starts_idle_with_no_day() {
        let s = session();
        assert_eq!(s.selected_day(), "");
        assert_eq!(s.edit_state(), &EditState::Idle);
        assert_eq!(s.input().value(), "");
    }

    #[test]
    fn submit_adds_on_selected_day_and_clears_input() {
        let mut s = session();
        s.select_day("2024-05-01");
        let id = add(&mut s, "Buy milk");
        assert_eq!(s.input().value(), "");
        let todo = s.store().get(&id).unwrap();
        assert_eq!(todo.day, "2024-05-01");
        assert!(!todo.completed);
    }

    #[test]
    fn blank_submit_leaves_input_alone() {
        let mut s = session();
        type_text(&mut s, "   ");
        assert_eq!(s.submit(), SubmitOutcome::Ignored);
        assert_eq!(s.input().value(), "   ");
        assert!(s.store().is_empty());
    }

    #[test]
    fn blank_submit_while_editing_keeps_editing() {
        let mut s = session();
        let id = add(&mut s, "keep me");
        assert!(s.edit_todo(&id));
        type_text(&mut s, " ");
        assert_eq!(s.submit(), SubmitOutcome::Ignored);
        assert_eq!(s.edit_state(), &EditState::Editing(id.clone()));
        assert_eq!(s.store().get(&id).unwrap().text, "keep me");
    }

    #[test]
    fn edit_loads_text_into_input() {
        let mut s = session();
        let id = add(&mut s, "draft");
        assert!(s.edit_todo(&id));
        assert_eq!(s.input().value(), "draft");
        assert_eq!(s.input().cursor(), "draft".len());
        assert_eq!(s.editing_id(), Some(id.as_str()));
        assert!(!s.edit_todo("missing"));
        assert_eq!(s.editing_id(), Some(id.as_str()));
    }

    #[test]
    fn buy_milk_becomes_buy_bread() {
        let mut s = session();
        s.select_day("2024-05-01");
        let id = add(&mut s, "Buy milk");
        assert!(s.toggle(&id));
        assert!(s.store().get(&id).unwrap().completed);

        s.edit_todo(&id);
        type_text(&mut s, "Buy bread");
        assert_eq!(s.submit(), SubmitOutcome::Updated(id.clone()));

        assert_eq!(
            s.store().todos(),
            &[Todo {
                id: id.clone(),
                text: "Buy bread".into(),
                day: "2024-05-01".into(),
                completed: true,
            }]
        );
        assert_eq!(s.edit_state(), &EditState::Idle);
        assert_eq!(s.input().value(), "");
    }

    #[test]
    fn edit_after_switching_days_moves_the_todo() {
        let mut s = session();
        s.select_day("2024-05-01");
        let id = add(&mut s, "A");
        s.edit_todo(&id);
        s.select_day("2024-05-02");
        assert_eq!(s.edit_state(), &EditState::Editing(id.clone()));
        assert_eq!(s.input().value(), "A");
        type_text(&mut s, "X");
        s.submit();
        let todo = s.store().get(&id).unwrap();
        assert_eq!(todo.day, "2024-05-02");
        assert_eq!(todo.text, "X");
    }

    #[test]
    fn editing_a_removed_todo_ends_quietly() {
        let mut s = session();
        let id = add(&mut s, "gone");
        s.edit_todo(&id);
        s.remove(&id);
        type_text(&mut s, "new text");
        assert_eq!(s.submit(), SubmitOutcome::Vanished(id));
        assert!(s.store().is_empty());
        assert_eq!(s.edit_state(), &EditState::Idle);
        assert_eq!(s.input().value(), "");
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut s = session();
        assert!(!s.cancel_edit());
        let id = add(&mut s, "a");
        s.edit_todo(&id);
        assert!(s.cancel_edit());
        assert_eq!(s.edit_state(), &EditState::Idle);
        assert_eq!(s.input().value(), "");
        assert_eq!(s.store().get(&id).unwrap().text, "a");
    }

    #[test]
    fn visible_todos_follow_selection() {
        let mut s = session();
        s.select_day("2024-01-01");
        add(&mut s, "a");
        s.select_day("2024-01-02");
        add(&mut s, "b");
        add(&mut s, "c");
        let texts: Vec<_> = s.visible_todos().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
        s.select_day("2024-01-03");
        assert_eq!(s.visible_todos().count(), 0);
    }

    #[test]
    fn markers_track_store_and_selection() {
        let mut s = session();
        s.select_day("2024-01-01");
        add(&mut s, "a");
        s.select_day("2024-01-03");
        let markers = s.markers();
        assert!(markers["2024-01-01"].marked);
        assert!(markers["2024-01-03"].selected);
        s.select_day("2024-01-01");
        let markers = s.markers();
        assert_eq!(markers.len(), 1);
        assert!(!markers["2024-01-01"].selected);
    }
}
