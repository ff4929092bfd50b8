//! Numbered console menu driving the to-do list.
//!
//! The loop prints the menu, reads one line, and dispatches on the literal
//! choice. Entries that need more input (add, complete, delete) switch the
//! menu into an awaiting state so the next line goes to the matching handler.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::cmd::{
    cmd_add, cmd_clear_completed, cmd_complete, cmd_delete, cmd_show, print_warning, CmdError,
};
use crate::db::Database;
use crate::fields::{Filter, MenuChoice};

const RULE_WIDTH: usize = 40;

/// Main menu application state.
pub struct MenuApp {
    db: Database,
    db_path: PathBuf,
    state: MenuState,
    should_exit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    MainMenu,
    AwaitingTitle,
    AwaitingComplete,
    AwaitingDelete,
}

impl MenuState {
    fn prompt(self) -> &'static str {
        match self {
            MenuState::MainMenu => "  Choose an option (1-7): ",
            MenuState::AwaitingTitle => "  Task title: ",
            MenuState::AwaitingComplete => "  Enter task number to mark as done: ",
            MenuState::AwaitingDelete => "  Enter task number to delete: ",
        }
    }
}

impl MenuApp {
    /// Create a menu over an already loaded task list.
    pub fn new(db: Database, db_path: PathBuf) -> Self {
        MenuApp {
            db,
            db_path,
            state: MenuState::MainMenu,
            should_exit: false,
        }
    }

    /// Current task list.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Check if the quit choice has been taken.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Run until the user quits or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<(), CmdError> {
        writeln!(out, "\n📋 Welcome to your To-Do List! Your tasks are saved automatically.")?;
        let mut buf = Vec::new();
        while !self.should_exit() {
            if self.state == MenuState::MainMenu {
                print_menu(out)?;
            }
            write!(out, "{}", self.state.prompt())?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!("input closed");
                writeln!(out)?;
                self.quit(out)?;
                break;
            }
            // Bytes that are not UTF-8 become U+FFFD instead of ending the session.
            let line = String::from_utf8_lossy(&buf);
            self.handle_line(&line, out)?;
        }
        Ok(())
    }

    /// Feed one line of input to the current state.
    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), CmdError> {
        let state = self.state;
        self.state = MenuState::MainMenu;
        match state {
            MenuState::MainMenu => self.handle_main_menu_input(line, out),
            MenuState::AwaitingTitle => cmd_add(&mut self.db, &self.db_path, line, out),
            MenuState::AwaitingComplete => cmd_complete(&mut self.db, &self.db_path, line, out),
            MenuState::AwaitingDelete => cmd_delete(&mut self.db, &self.db_path, line, out),
        }
    }

    fn handle_main_menu_input<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), CmdError> {
        let Some(choice) = MenuChoice::parse(line) else {
            debug!(input = line.trim(), "unknown menu choice");
            print_warning(out, "Please choose a number between 1 and 7.")?;
            return Ok(());
        };
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::ViewAll => cmd_show(&self.db, Filter::All, out)?,
            MenuChoice::ViewPending => cmd_show(&self.db, Filter::Pending, out)?,
            MenuChoice::Add => self.state = MenuState::AwaitingTitle,
            MenuChoice::Complete => self.await_position(MenuState::AwaitingComplete, out)?,
            MenuChoice::Delete => self.await_position(MenuState::AwaitingDelete, out)?,
            MenuChoice::ClearCompleted => {
                cmd_clear_completed(&mut self.db, &self.db_path, out)?;
            }
            MenuChoice::Quit => self.quit(out)?,
        }
        Ok(())
    }

    /// Show the list, then ask for a position unless there is nothing to pick.
    fn await_position<W: Write>(&mut self, next: MenuState, out: &mut W) -> Result<(), CmdError> {
        cmd_show(&self.db, Filter::All, out)?;
        if !self.db.is_empty() {
            self.state = next;
        }
        Ok(())
    }

    fn quit<W: Write>(&mut self, out: &mut W) -> Result<(), CmdError> {
        writeln!(out, "\n  👋 Goodbye! Your tasks have been saved.\n")?;
        self.should_exit = true;
        Ok(())
    }
}

/// Print the numbered menu.
pub fn print_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "  📝  To-Do List")?;
    writeln!(out, "{rule}")?;
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, choice.label())?;
    }
    writeln!(out, "{rule}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn run_session(app: &mut MenuApp, script: &str) -> String {
        let mut out = Vec::new();
        app.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn pending(title: &str) -> Task {
        Task { title: title.into(), done: false, created: "2024-05-01 09:30".into() }
    }

    #[test]
    fn test_buy_milk_scenario() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut app = MenuApp::new(Database::default(), path.clone());

        let out = run_session(&mut app, "3\nBuy milk\n4\n1\n6\n7\n");

        assert!(out.contains("Added: 'Buy milk'"));
        assert!(out.contains("'Buy milk' marked as done!"));
        assert!(out.contains("Cleared 1 completed task(s)."));
        assert!(out.contains("Goodbye!"));
        assert!(app.should_exit());
        assert!(app.database().is_empty());
        assert!(Database::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_state_after_each_step() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut app = MenuApp::new(Database::default(), path.clone());
        let mut out = Vec::new();

        app.handle_line("3\n", &mut out).unwrap();
        assert_eq!(app.state, MenuState::AwaitingTitle);
        app.handle_line("Buy milk\n", &mut out).unwrap();
        assert_eq!(app.state, MenuState::MainMenu);
        assert_eq!(app.database().len(), 1);
        assert_eq!(app.database().get(1).unwrap().title, "Buy milk");
        assert!(!app.database().get(1).unwrap().done);

        app.handle_line("4\n", &mut out).unwrap();
        assert_eq!(app.state, MenuState::AwaitingComplete);
        app.handle_line("1\n", &mut out).unwrap();
        assert!(app.database().get(1).unwrap().done);
        assert_eq!(Database::load(&path).unwrap(), *app.database());
    }

    #[test]
    fn test_invalid_choice_warns_and_redisplays_menu() {
        let tmp = TempDir::new().unwrap();
        let mut app = MenuApp::new(Database::default(), tmp.path().join("tasks.json"));

        let out = run_session(&mut app, "9\nhello\n7\n");

        assert_eq!(out.matches("Please choose a number between 1 and 7.").count(), 2);
        assert_eq!(out.matches("Choose an option (1-7): ").count(), 3);
        assert_eq!(out.matches("  📝  To-Do List").count(), 3);
    }

    #[test]
    fn test_complete_on_empty_list_skips_prompt() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut app = MenuApp::new(Database::default(), path.clone());

        let out = run_session(&mut app, "4\n5\n7\n");

        assert_eq!(out.matches("No tasks yet. Add one!").count(), 2);
        assert!(!out.contains("Enter task number"));
        assert!(!path.exists());
    }

    #[test]
    fn test_bad_index_leaves_list_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let db = Database { tasks: vec![pending("Write report"), pending("Call mum")] };
        let mut app = MenuApp::new(db.clone(), path.clone());

        let out = run_session(&mut app, "5\n3\n4\nfirst\n5\n0\n7\n");

        assert_eq!(out.matches("Invalid number.").count(), 2);
        assert_eq!(out.matches("Please enter a valid number.").count(), 1);
        assert_eq!(*app.database(), db);
        assert!(!path.exists());
    }

    #[test]
    fn test_pending_view_and_delete() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut done = pending("Buy milk");
        done.done = true;
        let db = Database { tasks: vec![pending("Write report"), done, pending("Call mum")] };
        let mut app = MenuApp::new(db, path.clone());

        let out = run_session(&mut app, "2\n5\n1\n7\n");

        assert!(out.contains("   3. ⬜ Call mum"));
        assert!(out.contains("Deleted: 'Write report'"));
        let saved = Database::load(&path).unwrap();
        let titles: Vec<&str> = saved.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy milk", "Call mum"]);
    }

    #[test]
    fn test_non_utf8_line_does_not_end_session() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut app = MenuApp::new(Database::default(), path.clone());

        let mut out = Vec::new();
        app.run(&b"3\nCaf\xe9\n3\nBuy milk\n7\n"[..], &mut out).unwrap();

        let titles: Vec<&str> = app.database().tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Caf\u{FFFD}", "Buy milk"]);
        assert!(app.should_exit());
        assert_eq!(Database::load(&path).unwrap(), *app.database());
    }

    #[test]
    fn test_end_of_input_quits() {
        let tmp = TempDir::new().unwrap();
        let mut app = MenuApp::new(Database::default(), tmp.path().join("tasks.json"));

        let out = run_session(&mut app, "3\n");

        assert!(app.should_exit());
        assert!(out.contains("Task title: "));
        assert!(out.ends_with("Goodbye! Your tasks have been saved.\n\n"));
        assert!(app.database().is_empty());
    }

    #[test]
    fn test_menu_lists_seven_choices() {
        let mut out = Vec::new();
        print_menu(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  1. View all tasks"));
        assert!(text.contains("  6. Clear completed tasks"));
        assert!(text.contains("  7. Quit"));
        assert_eq!(text.matches(&"=".repeat(RULE_WIDTH)).count(), 3);
    }
}
