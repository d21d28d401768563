//! Titled list model and the three-line window over it.

use alloc::{string::String, vec::Vec};

use heapless::Vec as HeaplessVec;

use crate::render::{BODY_LINES, EMPTY_PLACEHOLDER, RowView, Screen};

/// One body line of a window; `item == None` is the empty-list placeholder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VisibleRow {
    pub item: Option<usize>,
    pub highlighted: bool,
}

pub type Window = HeaplessVec<VisibleRow, BODY_LINES>;

/// Picks the rows visible for a list of `len` items with `select_index` selected.
///
/// The selection is kept on the middle line, except at the ends of the list
/// where the window sticks to the first or last `BODY_LINES` items.
pub fn window(len: usize, select_index: usize, highlight: bool) -> Window {
    let mut rows = Window::new();

    if len == 0 {
        let _ = rows.push(VisibleRow {
            item: None,
            highlighted: false,
        });
        return rows;
    }

    let last = len - 1;
    let selected = select_index.min(last);
    let start = if selected == 0 {
        0
    } else if selected == last {
        len.saturating_sub(BODY_LINES)
    } else {
        selected - 1
    };
    let end = (start + BODY_LINES).min(len);

    for item in start..end {
        let _ = rows.push(VisibleRow {
            item: Some(item),
            highlighted: highlight && item == selected,
        });
    }
    rows
}

/// Wraps `index` one step forward within `total`.
pub fn rotate_down(index: usize, total: usize) -> usize {
    if total == 0 { 0 } else { (index + 1) % total }
}

/// Wraps `index` one step backward within `total`.
pub fn rotate_up(index: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else if index == 0 {
        total - 1
    } else {
        index - 1
    }
}

/// Titled, scrollable list shared by every screen.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListView {
    title: String,
    items: Vec<String>,
    select_index: usize,
    invert_selected: bool,
    invert_title: bool,
}

impl ListView {
    pub fn new(title: impl Into<String>, invert_selected: bool, invert_title: bool) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            select_index: 0,
            invert_selected,
            invert_title,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replaces the items and moves the selection back to the first one.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.select_index = 0;
    }

    /// Replaces the items keeping the selection, clamped to the new length.
    pub fn replace_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.select_index = self.select_index.min(self.items.len().saturating_sub(1));
    }

    pub fn select_index(&self) -> usize {
        self.select_index
    }

    pub fn select(&mut self, index: usize) {
        self.select_index = index.min(self.items.len().saturating_sub(1));
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.select_index).map(String::as_str)
    }

    /// Moves the selection up with wraparound; returns `false` when fewer than two items exist.
    pub fn select_up(&mut self) -> bool {
        if self.items.len() < 2 {
            return false;
        }
        self.select_index = rotate_up(self.select_index, self.items.len());
        true
    }

    /// Moves the selection down with wraparound; returns `false` when fewer than two items exist.
    pub fn select_down(&mut self) -> bool {
        if self.items.len() < 2 {
            return false;
        }
        self.select_index = rotate_down(self.select_index, self.items.len());
        true
    }

    pub fn window(&self) -> Window {
        window(self.items.len(), self.select_index, self.invert_selected)
    }

    pub fn screen(&self) -> Screen<'_> {
        let mut rows = HeaplessVec::new();
        for row in self.window() {
            let text = match row.item {
                Some(index) => self.items[index].as_str(),
                None => EMPTY_PLACEHOLDER,
            };
            let _ = rows.push(RowView {
                text,
                highlighted: row.highlighted,
            });
        }

        Screen {
            title: &self.title,
            invert_title: self.invert_title,
            rows,
        }
    }
}
