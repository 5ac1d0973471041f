//! Full lifecycle over real HTTP against a SQLite-backed server.
//!
//! Starts the server on a random port, then drives it with ureq the way a
//! browser would: form posts, redirects followed back to the list.

use todo_core::{SqliteRepository, TodoItem};

struct Live {
    base: String,
    agent: ureq::Agent,
}

impl Live {
    fn start(db: &std::path::Path) -> Self {
        let repo = SqliteRepository::open(db).unwrap();

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                todo_server::run(listener, todo_server::state(Box::new(repo))).await
            })
            .unwrap();
        });

        // 4xx/5xx come back as data so the test can inspect them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            base: format!("http://{addr}"),
            agent,
        }
    }

    fn read(&self, response: Result<ureq::http::Response<ureq::Body>, ureq::Error>) -> (u16, String) {
        let mut response = response.expect("HTTP transport error");
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        (status, body)
    }

    fn list(&self) -> Vec<TodoItem> {
        let (status, body) = self.read(self.agent.get(&format!("{}/todo", self.base)).call());
        assert_eq!(status, 200);
        serde_json::from_str(&body).unwrap()
    }

    fn create(&self, form: &str) -> (u16, String) {
        self.read(
            self.agent
                .post(&format!("{}/todo/create", self.base))
                .content_type("application/x-www-form-urlencoded")
                .send(form.as_bytes()),
        )
    }

    fn post(&self, path: &str) -> (u16, String) {
        self.read(self.agent.post(&format!("{}{path}", self.base)).send_empty())
    }
}

#[test]
fn crud_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let server = Live::start(&dir.path().join("todo.db"));

    // Step 1: empty list.
    assert!(server.list().is_empty(), "expected empty list");

    // Step 2: create; the redirect lands back on the list.
    let (status, body) = server.create("title=Buy+milk");
    assert_eq!(status, 200);
    let todos: Vec<TodoItem> = serde_json::from_str(&body).unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Buy milk");
    assert!(!todos[0].is_complete);
    let id = todos[0].id;

    // Step 3: rejected create.
    let (status, body) = server.create("title=");
    assert_eq!(status, 422);
    let page: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(page["form"]["title"], "");
    assert_eq!(server.list().len(), 1);

    // Step 4: toggle twice.
    let (status, _) = server.post(&format!("/todo/togglecomplete/{id}"));
    assert_eq!(status, 200);
    assert!(server.list()[0].is_complete);
    server.post(&format!("/todo/togglecomplete/{id}"));
    assert!(!server.list()[0].is_complete);

    // Step 5: delete, then delete again.
    let (status, _) = server.post(&format!("/todo/delete/{id}"));
    assert_eq!(status, 200);
    assert!(server.list().is_empty(), "expected empty list after delete");
    let (status, _) = server.post(&format!("/todo/delete/{id}"));
    assert_eq!(status, 200);

    // Step 6: a new item never reuses the deleted id.
    server.create("title=Walk+dog");
    let todos = server.list();
    assert_eq!(todos.len(), 1);
    assert!(todos[0].id > id);
}
