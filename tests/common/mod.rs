//! 集成测试共用的桩传输与测试数据
#![allow(dead_code)]

use async_trait::async_trait;
use canvas_unsubmitted::error::TransportError;
use canvas_unsubmitted::{Config, RawResponse, Transport};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const BASE: &str = "https://canvas.test/api/v1";

#[derive(Clone)]
enum Route {
    Respond { response: RawResponse, delay: Duration },
    Fail,
    Hang,
}

/// 按 URL 返回预设响应的桩传输，记录请求顺序和最大并发
#[derive(Default)]
pub struct StubTransport {
    routes: HashMap<String, Route>,
    log: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回 JSON（带防护前缀）
    pub fn json(self, url: impl Into<String>, body: Value) -> Self {
        self.respond(url, RawResponse::ok(guarded(&body)), Duration::ZERO)
    }

    /// 返回 JSON 并带分页头
    pub fn json_with_link(self, url: impl Into<String>, body: Value, link: impl Into<String>) -> Self {
        self.respond(url, RawResponse::ok(guarded(&body)).with_link(link), Duration::ZERO)
    }

    /// 延迟一段时间后返回 JSON
    pub fn json_after(self, url: impl Into<String>, body: Value, delay: Duration) -> Self {
        self.respond(url, RawResponse::ok(guarded(&body)), delay)
    }

    pub fn respond(mut self, url: impl Into<String>, response: RawResponse, delay: Duration) -> Self {
        self.routes.insert(url.into(), Route::Respond { response, delay });
        self
    }

    /// 请求失败
    pub fn fail(mut self, url: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Route::Fail);
        self
    }

    /// 永不返回
    pub fn hang(mut self, url: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Route::Hang);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        self.log.lock().unwrap().push(url.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        match self.routes.get(url).cloned() {
            Some(Route::Respond { response, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(response)
            }
            Some(Route::Hang) => {
                futures::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
            Some(Route::Fail) => Err(TransportError::Unavailable {
                url: url.to_string(),
                reason: "stubbed failure".to_string(),
            }),
            None => Err(TransportError::Unavailable {
                url: url.to_string(),
                reason: "no stubbed route".to_string(),
            }),
        }
    }
}

pub fn guarded(body: &Value) -> String {
    format!("while(1);{}", body)
}

// ========== 测试数据 ==========

pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap()
}

pub fn hours(h: i64) -> String {
    (reference_now() + ChronoDuration::hours(h)).to_rfc3339()
}

pub fn test_config() -> Config {
    Config {
        base_url: BASE.to_string(),
        display_utc_offset_minutes: Some(0),
        ..Config::default()
    }
}

pub fn courses_url(student: &str) -> String {
    format!("{}/users/{}/courses?page=1&per_page=10", BASE, student)
}

pub fn courses_page_url(student: &str, page: usize) -> String {
    format!("{}/users/{}/courses?page={}&per_page=10", BASE, student, page)
}

pub fn assignments_url(student: &str, course_id: u64) -> String {
    format!(
        "{}/users/{}/courses/{}/assignments?page=1&per_page=10&order_by=due_at",
        BASE, student, course_id
    )
}

pub fn submission_url(course_id: u64, assignment_id: u64, student: &str) -> String {
    format!(
        "{}/courses/{}/assignments/{}/submissions/{}",
        BASE, course_id, assignment_id, student
    )
}

pub fn observees_url() -> String {
    format!("{}/users/self/observees", BASE)
}

pub fn course(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn assignment(id: u64, course_id: u64, unlock_in_hours: i64, due_in_hours: Option<i64>) -> Value {
    json!({
        "id": id,
        "course_id": course_id,
        "name": format!("Assignment {}", id),
        "html_url": format!("https://canvas.test/courses/{}/assignments/{}", course_id, id),
        "unlock_at": hours(unlock_in_hours),
        "due_at": due_in_hours.map(hours),
    })
}

pub fn submission(state: &str) -> Value {
    json!({ "workflow_state": state })
}
