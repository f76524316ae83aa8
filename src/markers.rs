use crate::model::{DayKey, Todo};
use std::collections::BTreeMap;

/// Calendar annotation for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marker {
    /// At least one todo lives on this day (dot).
    pub marked: bool,
    /// Selection highlight. Only set for a selected day without todos.
    pub selected: bool,
}

/// Rebuilds the day markers from scratch. A selected day that already has
/// todos keeps only its dot and gets no selection highlight.
pub fn derive_markers<'a, I>(todos: I, selected_day: &str) -> BTreeMap<DayKey, Marker>
where
    I: IntoIterator<Item = &'a Todo>,
{
    let mut markers: BTreeMap<DayKey, Marker> = BTreeMap::new();
    for todo in todos {
        markers.entry(todo.day.clone()).or_default().marked = true;
    }
    if !selected_day.is_empty() && !markers.contains_key(selected_day) {
        markers.insert(
            selected_day.to_string(),
            Marker {
                marked: false,
                selected: true,
            },
        );
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, day: &str) -> Todo {
        Todo {
            id: id.into(),
            text: format!("todo {}", id),
            day: day.into(),
            completed: false,
        }
    }

    const DOT: Marker = Marker {
        marked: true,
        selected: false,
    };
    const HIGHLIGHT: Marker = Marker {
        marked: false,
        selected: true,
    };

    #[test]
    fn empty_store_and_no_selection_has_no_markers() {
        assert!(derive_markers(&Vec::<Todo>::new(), "").is_empty());
    }

    #[test]
    fn selected_day_without_todos_is_highlighted() {
        let todos = vec![todo("1", "2024-01-01"), todo("2", "2024-01-02")];
        let markers = derive_markers(&todos, "2024-01-03");
        assert_eq!(markers.len(), 3);
        assert_eq!(markers["2024-01-01"], DOT);
        assert_eq!(markers["2024-01-02"], DOT);
        assert_eq!(markers["2024-01-03"], HIGHLIGHT);
    }

    #[test]
    fn selected_day_with_todos_keeps_only_the_dot() {
        // Inherited precedence: the dot entry wins and no highlight is added.
        let todos = vec![todo("1", "2024-01-01"), todo("2", "2024-01-02")];
        let markers = derive_markers(&todos, "2024-01-01");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers["2024-01-01"], DOT);
    }

    #[test]
    fn many_todos_on_one_day_collapse() {
        let todos = vec![
            todo("1", "2024-01-01"),
            todo("2", "2024-01-01"),
            todo("3", "2024-01-01"),
        ];
        let markers = derive_markers(&todos, "");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers["2024-01-01"], DOT);
    }

    #[test]
    fn undated_todos_mark_the_empty_key() {
        let todos = vec![todo("1", "")];
        let markers = derive_markers(&todos, "");
        assert_eq!(markers.get(""), Some(&DOT));
    }
}
