use crate::task::{Deadline, Name, Note, Priority, Status, Tag, Task};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::BTreeSet;
use std::path::Path;

/// Keeps the ordered task list in a SQLite file.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open task database at {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                position INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                priority TEXT NOT NULL DEFAULT 'NONE',
                status TEXT NOT NULL DEFAULT 'incomplete',
                note TEXT,
                deadline TEXT,
                tags TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;
        Ok(Storage { conn })
    }

    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, priority, status, note, deadline, tags FROM tasks ORDER BY position",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,         // name
                row.get::<_, String>(1)?,         // priority
                row.get::<_, String>(2)?,         // status
                row.get::<_, Option<String>>(3)?, // note
                row.get::<_, Option<String>>(4)?, // deadline
                row.get::<_, String>(5)?,         // tags
            ))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (name, priority, status, note, deadline, tags) = row?;
            let task = Self::task_from_row(&name, &priority, &status, note, deadline, &tags)
                .with_context(|| format!("Stored task '{}' is invalid", name))?;
            tasks.push(task);
        }

        log::debug!("Loaded {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Replaces everything stored with `tasks`, keeping their order.
    pub fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (position, name, priority, status, note, deadline, tags)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                let tags: Vec<&str> = task.tags.iter().map(Tag::as_str).collect();
                stmt.execute(params![
                    position as i64,
                    task.name.as_str(),
                    task.priority.as_persisted(),
                    task.status.to_string(),
                    task.note.as_ref().map(Note::as_str),
                    task.deadline.as_ref().map(Deadline::to_persisted),
                    tags.join(","),
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("Saved {} tasks", tasks.len());
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_read_only(&self, read_only: bool) {
        let pragma = if read_only { "PRAGMA query_only = ON" } else { "PRAGMA query_only = OFF" };
        self.conn.execute_batch(pragma).unwrap();
    }

    fn task_from_row(
        name: &str,
        priority: &str,
        status: &str,
        note: Option<String>,
        deadline: Option<String>,
        tags: &str,
    ) -> Result<Task> {
        let tags = tags
            .split(',')
            .filter(|t| !t.is_empty())
            .map(Tag::new)
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Task {
            name: Name::new(name)?,
            priority: Priority::parse_persisted(priority)?,
            status: Status::new(status)?,
            note: note.as_deref().map(Note::new).transpose()?,
            deadline: deadline.as_deref().map(Deadline::new).transpose()?,
            tags,
        })
    }
}
