//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use todo_core::{InMemoryRepository, SqliteRepository, StoreResult, TodoRepository};

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "Serve a to-do list over HTTP")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file. Without it items live in memory only.
    #[arg(long, env = "TODO_DATABASE")]
    pub database: Option<PathBuf>,

    /// Log filter, e.g. `info` or `todo_core=debug,info`
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    pub log: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn backend_name(&self) -> &'static str {
        match self.database {
            Some(_) => "sqlite",
            None => "memory",
        }
    }

    /// Open the repository this configuration asks for.
    pub fn open_repository(&self) -> StoreResult<Box<dyn TodoRepository>> {
        match &self.database {
            Some(path) => Ok(Box::new(SqliteRepository::open(path)?)),
            None => Ok(Box::new(InMemoryRepository::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_memory_on_localhost_3000() {
        let config = Config::try_parse_from(["todo-server"]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.backend_name(), "memory");
        assert_eq!(config.log, "info");
    }

    #[test]
    fn database_flag_selects_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.db");
        let config = Config::try_parse_from([
            "todo-server",
            "--port",
            "8080",
            "--database",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.backend_name(), "sqlite");
        let repo = config.open_repository().unwrap();
        assert!(repo.list().unwrap().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(Config::try_parse_from(["todo-server", "--port", "http"]).is_err());
    }
}
