// taskdeck/src/menu.rs

use anyhow::Result;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::store::SharedStore;

/// Where the run loop goes after a main-menu choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuState {
    MainMenu,
    AddingTasks,
    Listing,
    Completing,
    Exiting,
}

const AFFIRMATIVE: &str = "y";

/// Line-oriented interactive menu over the shared store. Generic over the
/// reader/writer pair so tests can drive it with in-memory buffers.
pub struct Menu<R, W> {
    input: R,
    output: W,
    store: SharedStore,
}

impl Menu<BufReader<Stdin>, Stdout> {
    pub fn over_stdio(store: SharedStore) -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout(), store)
    }
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, store: SharedStore) -> Self {
        Self {
            input,
            output,
            store,
        }
    }

    /// Runs until the user picks quit or input hits EOF. Persistence is the
    /// caller's job; this loop only mutates the store.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.main_menu()? {
                MenuState::AddingTasks => self.add_tasks()?,
                MenuState::Listing => self.list_tasks()?,
                MenuState::Completing => self.complete_tasks()?,
                MenuState::Exiting => {
                    writeln!(self.output, "Exiting.")?;
                    return Ok(());
                }
                MenuState::MainMenu => {}
            }
        }
    }

    fn main_menu(&mut self) -> Result<MenuState> {
        writeln!(self.output, "\n-- Menu --")?;
        writeln!(self.output, "1. Add task")?;
        writeln!(self.output, "2. Show tasks")?;
        writeln!(self.output, "3. Complete task")?;
        writeln!(self.output, "4. Quit")?;
        let Some(choice) = self.prompt("Pick an option: ")? else {
            return Ok(MenuState::Exiting);
        };
        Ok(match choice.as_str() {
            "1" => MenuState::AddingTasks,
            "2" => MenuState::Listing,
            "3" => MenuState::Completing,
            "4" => MenuState::Exiting,
            _ => {
                writeln!(self.output, "Invalid option, pick again.")?;
                MenuState::MainMenu
            }
        })
    }

    fn add_tasks(&mut self) -> Result<()> {
        loop {
            let Some(text) = self.prompt("Task text: ")? else {
                return Ok(());
            };
            self.store.lock().add(text);
            writeln!(self.output, "Task added.")?;
            if !self.ask("Add another task? (y/n): ")? {
                return Ok(());
            }
        }
    }

    fn list_tasks(&mut self) -> Result<()> {
        self.print_tasks()?;
        write!(self.output, "\nPress Enter to return to the menu...")?;
        self.output.flush()?;
        self.read_line()?;
        Ok(())
    }

    fn complete_tasks(&mut self) -> Result<()> {
        loop {
            self.print_tasks()?;
            let Some(line) = self.prompt("Number of the completed task: ")? else {
                return Ok(());
            };
            // remove_by_id re-checks under the lock, so a task deleted over
            // HTTP between the listing and this answer is still a clean miss.
            let removed = line
                .parse::<u64>()
                .ok()
                .map(|id| self.store.lock().remove_by_id(id))
                .unwrap_or(false);
            if !removed {
                writeln!(self.output, "Invalid task number.")?;
                continue;
            }
            writeln!(self.output, "Task completed and removed from the list.")?;
            if !self.ask("Complete another task? (y/n): ")? {
                return Ok(());
            }
        }
    }

    fn print_tasks(&mut self) -> Result<()> {
        let tasks = self.store.lock().list().to_vec();
        writeln!(self.output, "\n--- Tasks ---")?;
        for task in &tasks {
            writeln!(self.output, "{}. {}", task.id, task.text)?;
        }
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<bool> {
        Ok(self.prompt(question)?.as_deref() == Some(AFFIRMATIVE))
    }

    /// Prompt without a trailing newline, then read one trimmed line.
    /// `None` means EOF.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;
    use std::io::Cursor;

    fn run_script(store: SharedStore, script: &str) -> String {
        let mut out = Vec::new();
        Menu::new(Cursor::new(script.to_string()), &mut out, store)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_flow_assigns_dense_ids() {
        let store = TaskStore::default().shared();
        run_script(store.clone(), "1\nbuy milk\ny\nwalk dog\nn\n4\n");
        let tasks = store.lock().list().to_vec();
        assert_eq!(tasks.len(), 2);
        assert_eq!((tasks[0].id, tasks[0].text.as_str()), (1, "buy milk"));
        assert_eq!((tasks[1].id, tasks[1].text.as_str()), (2, "walk dog"));
    }

    #[test]
    fn invalid_menu_choice_recovers() {
        let store = TaskStore::default().shared();
        let out = run_script(store.clone(), "9\n4\n");
        assert!(out.contains("Invalid option"));
        assert!(out.contains("Exiting."));
        assert!(store.lock().is_empty());
    }

    #[test]
    fn listing_shows_tasks_and_returns() {
        let store = TaskStore::default().shared();
        store.lock().add("buy milk");
        let out = run_script(store, "2\n\n4\n");
        assert!(out.contains("--- Tasks ---"));
        assert!(out.contains("1. buy milk"));
    }

    #[test]
    fn complete_flow_rejects_bad_input_then_removes() {
        let store = TaskStore::default().shared();
        store.lock().add("a");
        store.lock().add("b");
        let out = run_script(store.clone(), "3\nnope\n0\n2\nn\n4\n");
        assert_eq!(out.matches("Invalid task number.").count(), 2);
        assert!(out.contains("Task completed and removed"));
        let tasks = store.lock().list().to_vec();
        assert_eq!(tasks.len(), 1);
        assert_eq!((tasks[0].id, tasks[0].text.as_str()), (1, "a"));
    }

    #[test]
    fn eof_exits_cleanly() {
        let store = TaskStore::default().shared();
        let out = run_script(store, "");
        assert!(out.contains("-- Menu --"));
        assert!(out.contains("Exiting."));
    }
}
