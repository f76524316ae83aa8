use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashSet;

pub type TodoId = String;

/// Calendar date key, `YYYY-MM-DD` when produced by the calendar. Empty means
/// no day was selected.
pub type DayKey = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub day: DayKey,
    pub completed: bool,
}

/// Source of todo ids. Implementations must never hand out the same id twice.
pub trait IdGenerator {
    fn next_id(&mut self) -> TodoId;
}

#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TodoId {
        self.next += 1;
        self.next.to_string()
    }
}

/// Short alphanumeric ids. Remembers every id it issued so a removed todo's
/// id is never reused.
#[derive(Debug, Default)]
pub struct RandomIds {
    issued: HashSet<TodoId>,
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> TodoId {
        loop {
            let id: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(6)
                .map(char::from)
                .collect();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

pub struct TodoStore {
    todos: Vec<Todo>,
    ids: Box<dyn IdGenerator>,
}

impl Default for TodoStore {
    fn default() -> Self {
        TodoStore::new(Box::new(SequentialIds::default()))
    }
}

impl TodoStore {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        TodoStore {
            todos: Vec::new(),
            ids,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Appends a todo unless `text` is blank. Returns the new id.
    pub fn add(&mut self, text: &str, day: &str) -> Option<TodoId> {
        if text.trim().is_empty() {
            return None;
        }
        let id = self.ids.next_id();
        self.todos.push(Todo {
            id: id.clone(),
            text: text.to_string(),
            day: day.to_string(),
            completed: false,
        });
        log::debug!("added todo {} on {:?}", id, day);
        Some(id)
    }

    pub fn update(&mut self, id: &str, text: &str, day: &str) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.text = text.to_string();
                todo.day = day.to_string();
                log::debug!("updated todo {} on {:?}", id, day);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        let removed = self.todos.len() != before;
        if removed {
            log::debug!("removed todo {}", id);
        }
        removed
    }

    pub fn toggle_completed(&mut self, id: &str) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                log::debug!("todo {} completed={}", id, todo.completed);
                true
            }
            None => false,
        }
    }

    /// Todos on `day`, in insertion order. Evaluated lazily on every call.
    pub fn filter_by_day<'a>(&'a self, day: &'a str) -> impl Iterator<Item = &'a Todo> + 'a {
        self.todos.iter().filter(move |t| t.day == day)
    }
}
