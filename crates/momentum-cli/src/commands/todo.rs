//! Todo management commands for CLI.

use chrono::Local;
use clap::Subcommand;
use momentum_core::storage::Database;

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a todo
    Add {
        /// Todo title
        title: String,
        /// Mark as a priority task
        #[arg(long)]
        priority: bool,
        /// Day the todo belongs to (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List todos for a day
    List {
        /// Day to list (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark a todo as done
    Done {
        /// Todo ID
        id: String,
    },
    /// Mark a todo as not done
    Undo {
        /// Todo ID
        id: String,
    },
    /// Delete a todo
    Delete {
        /// Todo ID
        id: String,
    },
}

pub fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TodoAction::Add { title, priority, date } => {
            let date = super::date_arg(date)?;
            let todo = db.add_todo(&title, priority, date)?;
            println!("Todo added: {}", todo.id);
            println!("{}", serde_json::to_string_pretty(&todo)?);
            super::record_action(&db, date);
        }
        TodoAction::List { date } => {
            let date = super::date_arg(date)?;
            let todos = db.todos(date)?;
            println!("{}", serde_json::to_string_pretty(&todos)?);
        }
        TodoAction::Done { id } => {
            db.set_todo_done(&id, true)?;
            println!("Todo done: {id}");
            super::record_action(&db, Local::now().date_naive());
        }
        TodoAction::Undo { id } => {
            db.set_todo_done(&id, false)?;
            println!("Todo reopened: {id}");
            super::record_action(&db, Local::now().date_naive());
        }
        TodoAction::Delete { id } => {
            db.delete_todo(&id)?;
            println!("Todo deleted: {id}");
        }
    }
    Ok(())
}
