/// 学习平台 REST API 客户端
///
/// 拼接四个接口地址，并在分页遍历器之上提供带类型的请求
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{Fetcher, RetryPolicy, Transport};
use crate::models::{Assignment, Course, Observee, StudentId, Submission};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 学习平台 API 客户端
#[derive(Clone)]
pub struct CanvasClient {
    base_url: String,
    per_page: usize,
    fetcher: Fetcher,
}

impl CanvasClient {
    /// 创建新的客户端
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            per_page: config.per_page,
            fetcher: Fetcher::new(transport, RetryPolicy::from_config(config)),
        }
    }

    // ========== 接口地址 ==========

    pub fn courses_url(&self, student: StudentId) -> String {
        format!(
            "{}/users/{}/courses?page=1&per_page={}",
            self.base_url, student, self.per_page
        )
    }

    pub fn assignments_url(&self, student: StudentId, course_id: u64) -> String {
        format!(
            "{}/users/{}/courses/{}/assignments?page=1&per_page={}&order_by=due_at",
            self.base_url, student, course_id, self.per_page
        )
    }

    pub fn submission_url(&self, course_id: u64, assignment_id: u64, student: StudentId) -> String {
        format!(
            "{}/courses/{}/assignments/{}/submissions/{}",
            self.base_url, course_id, assignment_id, student
        )
    }

    pub fn observees_url(&self) -> String {
        format!("{}/users/self/observees", self.base_url)
    }

    // ========== 请求 ==========

    /// 获取学生的全部课程（分页）
    pub async fn fetch_courses(
        &self,
        student: StudentId,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Course>> {
        let courses = self
            .fetcher
            .walk(self.courses_url(student), cancel)
            .collect_all()
            .await?;
        debug!("学生 {} 共有 {} 门课程", student, courses.len());
        Ok(courses)
    }

    /// 获取学生在某门课程下的全部作业（分页，按截止时间请求排序）
    pub async fn fetch_assignments(
        &self,
        student: StudentId,
        course_id: u64,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Assignment>> {
        let assignments = self
            .fetcher
            .walk(self.assignments_url(student, course_id), cancel)
            .collect_all()
            .await?;
        debug!("课程 {} 共有 {} 个作业", course_id, assignments.len());
        Ok(assignments)
    }

    /// 获取某个作业的提交记录（单个资源）
    pub async fn fetch_submission(
        &self,
        course_id: u64,
        assignment_id: u64,
        student: StudentId,
        cancel: &CancellationToken,
    ) -> AppResult<Submission> {
        self.fetcher
            .fetch_one(&self.submission_url(course_id, assignment_id, student), cancel)
            .await
    }

    /// 获取当前用户的被观察者列表（单个资源，不分页）
    pub async fn fetch_observees(&self, cancel: &CancellationToken) -> AppResult<Vec<Observee>> {
        self.fetcher.fetch_one(&self.observees_url(), cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::infrastructure::RawResponse;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
            Err(TransportError::Unavailable {
                url: url.to_string(),
                reason: "offline".to_string(),
            })
        }
    }

    fn client() -> CanvasClient {
        let config = Config {
            base_url: "https://canvas.test/api/v1/".to_string(),
            ..Config::default()
        };
        CanvasClient::new(&config, Arc::new(Unreachable))
    }

    #[test]
    fn builds_endpoint_urls() {
        let c = client();
        assert_eq!(
            c.courses_url(StudentId::SelfUser),
            "https://canvas.test/api/v1/users/self/courses?page=1&per_page=10"
        );
        assert_eq!(
            c.assignments_url(StudentId::Id(5), 12),
            "https://canvas.test/api/v1/users/5/courses/12/assignments?page=1&per_page=10&order_by=due_at"
        );
        assert_eq!(
            c.submission_url(12, 99, StudentId::Id(5)),
            "https://canvas.test/api/v1/courses/12/assignments/99/submissions/5"
        );
        assert_eq!(c.observees_url(), "https://canvas.test/api/v1/users/self/observees");
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let cancel = CancellationToken::new();
        let result = client().fetch_observees(&cancel).await;
        assert!(matches!(result, Err(crate::error::AppError::Transport(_))));
    }
}
