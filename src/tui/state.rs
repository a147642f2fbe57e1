use crate::model::{Filter, Task};
use ratatui::widgets::ListState;

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Searching,
    PriorityFilter,
}

/// A fetch the view has asked for. The sequence number is strictly
/// increasing; responses tagged with an older sequence are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub page: u32,
}

pub struct AppState {
    pub tasks: Vec<Task>,
    pub view_indices: Vec<usize>,
    pub list_state: ListState,
    pub page: u32,
    pub filter: Filter,
    pub message: String,
    pub loading: bool,
    pub mode: InputMode,
    pub input_buffer: String,
    pub cursor_position: usize,
    latest_seq: u64,
}

impl AppState {
    pub fn new() -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));
        Self {
            tasks: vec![],
            view_indices: vec![],
            list_state: l_state,
            page: 1,
            filter: Filter::default(),
            message: "n/p: Page | r: Reload | /: Find | c: Status | f: Prio".to_string(),
            loading: true,
            mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            latest_seq: 0,
        }
    }

    // --- Pagination / fetch sequencing ---

    fn issue(&mut self, page: u32) -> FetchRequest {
        self.latest_seq += 1;
        self.page = page;
        self.loading = true;
        FetchRequest {
            seq: self.latest_seq,
            page,
        }
    }

    pub fn initial_fetch(&mut self) -> FetchRequest {
        self.issue(self.page)
    }

    pub fn next_page(&mut self) -> FetchRequest {
        self.issue(self.page + 1)
    }

    /// Page 1 is the floor: no decrement, no request.
    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        if self.page <= 1 {
            None
        } else {
            Some(self.issue(self.page - 1))
        }
    }

    pub fn refresh(&mut self) -> FetchRequest {
        self.issue(self.page)
    }

    /// Filter changes start over from page 1.
    pub fn reset_to_first_page(&mut self) -> FetchRequest {
        self.issue(1)
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Replace the list with a fetched page. Returns false (and changes
    /// nothing) when the response is older than the latest issued fetch.
    pub fn apply_loaded(&mut self, seq: u64, page: u32, tasks: Vec<Task>) -> bool {
        if seq < self.latest_seq {
            return false;
        }
        self.tasks = tasks;
        self.loading = false;
        self.message = format!("Page {}: {} task(s)", page, self.tasks.len());
        self.recalculate_view();
        true
    }

    /// A failed fetch keeps the previously rendered list. Stale failures
    /// are dropped entirely.
    pub fn apply_error(&mut self, seq: u64, message: &str) -> bool {
        if seq < self.latest_seq {
            return false;
        }
        self.loading = false;
        self.message = format!("Error: {}", message);
        true
    }

    // --- Input buffer (search / priority filter) ---

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        self.input_buffer.insert(self.cursor_position, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let from_left_to_current_index = current_index - 1;
            let before_char_to_delete = self.input_buffer.chars().take(from_left_to_current_index);
            let after_char_to_delete = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before_char_to_delete.chain(after_char_to_delete).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    // --- View projection ---

    pub fn recalculate_view(&mut self) {
        if self.mode == InputMode::Searching && !self.input_buffer.is_empty() {
            let query = self.input_buffer.to_lowercase();
            self.view_indices = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.title.to_lowercase().contains(&query))
                .map(|(i, _)| i)
                .collect();
        } else {
            self.view_indices = (0..self.tasks.len()).collect();
        }
        let sel = self.list_state.selected().unwrap_or(0);
        if self.view_indices.is_empty() {
            self.list_state.select(Some(0));
        } else if sel >= self.view_indices.len() {
            self.list_state.select(Some(self.view_indices.len() - 1));
        }
    }

    pub fn get_selected_master_index(&self) -> Option<usize> {
        if let Some(view_idx) = self.list_state.selected() {
            if view_idx < self.view_indices.len() {
                return Some(self.view_indices[view_idx]);
            }
        }
        None
    }

    pub fn next(&mut self) {
        let len = self.view_indices.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view_indices.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn jump_forward(&mut self, step: usize) {
        if self.view_indices.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        // Clamp to the last item (don't wrap around like next())
        let new_index = (current + step).min(self.view_indices.len() - 1);
        self.list_state.select(Some(new_index));
    }

    pub fn jump_backward(&mut self, step: usize) {
        if self.view_indices.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let new_index = current.saturating_sub(step);
        self.list_state.select(Some(new_index));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
