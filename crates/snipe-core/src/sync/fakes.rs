//! In-memory backend and recording surface for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Notify;

use super::Surface;
use crate::api::{ApiError, ApiResult, TaskBackend};
use crate::models::{Task, TaskId};
use crate::render::Row;

/// Backend operations, for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Toggle,
    SearchAndAdd,
    DeleteCourse,
}

/// A request as seen by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List,
    Toggle(TaskId),
    SearchAndAdd(String),
    DeleteCourse(String),
}

#[derive(Default)]
struct BackendState {
    tasks: Vec<Task>,
    /// Course name -> section ids the search will discover
    catalog: HashMap<String, Vec<String>>,
    next_id: i64,
    calls: Vec<BackendCall>,
    failures: HashMap<Op, Option<String>>,
}

/// Task service kept in memory, recording every call
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
    search_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.lock().unwrap();
            state.next_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
            state.tasks = tasks;
        }
        backend
    }

    /// Make a course discoverable by `search_and_add`
    pub fn add_catalog_course(&self, name: &str, sections: &[&str]) {
        self.state.lock().unwrap().catalog.insert(
            name.to_string(),
            sections.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Make every call of `op` fail with a 500 carrying `message`
    pub fn fail(&self, op: Op, message: Option<&str>) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(op, message.map(str::to_string));
    }

    /// Block searches until the returned handle is notified
    pub fn hold_searches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.search_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.state
            .lock()
            .unwrap()
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Record a call and return the injected failure for it, if any
    fn record(&self, call: BackendCall, op: Op) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.get(&op) {
            Some(message) => Err(server_error(message.clone())),
            None => Ok(()),
        }
    }
}

fn server_error(message: Option<String>) -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message,
    }
}

#[async_trait]
impl TaskBackend for FakeBackend {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.record(BackendCall::List, Op::List)?;
        Ok(self.state.lock().unwrap().tasks.clone())
    }

    async fn toggle_task(&self, id: TaskId) -> ApiResult<Option<Task>> {
        self.record(BackendCall::Toggle(id), Op::Toggle)?;
        let mut state = self.state.lock().unwrap();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| server_error(Some(format!("Task not found: {}", id))))?;
        task.enabled = !task.enabled;
        Ok(Some(task.clone()))
    }

    async fn search_and_add(&self, course_name: &str) -> ApiResult<Vec<Task>> {
        self.record(
            BackendCall::SearchAndAdd(course_name.to_string()),
            Op::SearchAndAdd,
        )?;

        let gate = self.search_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        let sections = state
            .catalog
            .get(course_name)
            .cloned()
            .ok_or_else(|| server_error(Some(format!("Course not found: {}", course_name))))?;

        let mut created = Vec::new();
        for section in sections {
            state.next_id += 1;
            let task = Task::new(state.next_id, course_name, section);
            state.tasks.push(task.clone());
            created.push(task);
        }
        Ok(created)
    }

    async fn delete_course(&self, course_display_name: &str) -> ApiResult<()> {
        self.record(
            BackendCall::DeleteCourse(course_display_name.to_string()),
            Op::DeleteCourse,
        )?;
        self.state
            .lock()
            .unwrap()
            .tasks
            .retain(|t| t.course_display_name != course_display_name);
        Ok(())
    }
}

/// Everything a surface was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Tasks { rows: Vec<Row>, total: usize },
    LoadError(Vec<Row>),
    Alert(String),
    Confirm(String),
    Busy(bool),
    ClearInput,
}

/// Surface that records its calls and answers confirmations from a flag
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
    confirm_answer: AtomicBool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(true),
        }
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Alert(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn busy_transitions(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Busy(busy) => Some(busy),
                _ => None,
            })
            .collect()
    }

    pub fn last_tasks(&self) -> Option<(Vec<Row>, usize)> {
        self.events().into_iter().rev().find_map(|e| match e {
            SurfaceEvent::Tasks { rows, total } => Some((rows, total)),
            _ => None,
        })
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl Surface for RecordingSurface {
    fn show_tasks(&self, rows: Vec<Row>, total: usize) {
        self.push(SurfaceEvent::Tasks { rows, total });
    }

    fn show_load_error(&self, rows: Vec<Row>) {
        self.push(SurfaceEvent::LoadError(rows));
    }

    fn alert(&self, message: &str) {
        self.push(SurfaceEvent::Alert(message.to_string()));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        self.push(SurfaceEvent::Confirm(prompt.to_string()));
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn set_add_busy(&self, busy: bool) {
        self.push(SurfaceEvent::Busy(busy));
    }

    fn clear_course_input(&self) {
        self.push(SurfaceEvent::ClearInput);
    }
}
