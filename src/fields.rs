//! Enumerations used to drive listings and the menu.

/// Display-time predicate for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Pending,
    Done,
}

impl Filter {
    /// Whether a task with the given completion flag is shown.
    pub fn matches(self, done: bool) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !done,
            Filter::Done => done,
        }
    }
}

/// The seven entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewAll,
    ViewPending,
    Add,
    Complete,
    Delete,
    ClearCompleted,
    Quit,
}

impl MenuChoice {
    /// Match a trimmed input line against the literal choice values "1".."7".
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ViewAll),
            "2" => Some(MenuChoice::ViewPending),
            "3" => Some(MenuChoice::Add),
            "4" => Some(MenuChoice::Complete),
            "5" => Some(MenuChoice::Delete),
            "6" => Some(MenuChoice::ClearCompleted),
            "7" => Some(MenuChoice::Quit),
            _ => None,
        }
    }

    /// Menu label for this choice.
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ViewAll => "View all tasks",
            MenuChoice::ViewPending => "View pending tasks",
            MenuChoice::Add => "Add a task",
            MenuChoice::Complete => "Mark task as done",
            MenuChoice::Delete => "Delete a task",
            MenuChoice::ClearCompleted => "Clear completed tasks",
            MenuChoice::Quit => "Quit",
        }
    }

    /// All choices in menu order.
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::ViewAll,
        MenuChoice::ViewPending,
        MenuChoice::Add,
        MenuChoice::Complete,
        MenuChoice::Delete,
        MenuChoice::ClearCompleted,
        MenuChoice::Quit,
    ];
}
