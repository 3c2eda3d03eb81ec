//! 提交状态分类 - 业务能力层
//!
//! 只负责"为每个作业取提交记录并留下未提交的"，不关心排序和渲染

use crate::clients::CanvasClient;
use crate::error::{AppError, AppResult};
use crate::models::{Assignment, StudentId};
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 提交状态分类器
///
/// 职责：
/// - 按并发上限请求每个作业的提交记录
/// - 等全部请求完成后再输出，结果顺序与输入一致
/// - 任一请求失败则整门课程失败
pub struct SubmissionClassifier {
    client: CanvasClient,
    concurrency: usize,
}

impl SubmissionClassifier {
    /// 创建新的分类器，`concurrency` 至少为 1
    pub fn new(client: CanvasClient, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// 分类
    ///
    /// # 参数
    /// - `assignments`: 已通过开放窗口过滤的作业
    /// - `student`: 学生标识
    /// - `course_id`: 课程 ID
    /// - `cancel`: 所属流水线的取消信号
    ///
    /// # 返回
    /// 只包含提交状态为 `unsubmitted` 的作业，已附加提交记录
    pub async fn classify(
        &self,
        assignments: Vec<Assignment>,
        student: StudentId,
        course_id: u64,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Assignment>> {
        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let total = assignments.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let fetches = assignments.into_iter().map(|assignment| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| AppError::Cancelled)?;
                let submission = self
                    .client
                    .fetch_submission(course_id, assignment.id, student, cancel)
                    .await?;
                Ok::<_, AppError>(assignment.with_submission(submission))
            }
        });

        // try_join_all 按输入顺序返回，完成顺序不会影响结果
        let classified = try_join_all(fetches).await?;

        let unsubmitted: Vec<Assignment> = classified
            .into_iter()
            .filter(Assignment::is_unsubmitted)
            .collect();

        debug!(
            "课程 {}: {} 个开放作业中 {} 个未提交",
            course_id,
            total,
            unsubmitted.len()
        );

        Ok(unsubmitted)
    }
}
