//! 课程处理流程 - 流程层
//!
//! 核心职责：定义"一门课程"的完整处理流程
//!
//! 流程顺序：
//! 1. 拉取全部作业（分页）
//! 2. 开放窗口过滤
//! 3. 拉取提交记录 → 只留未提交
//! 4. 按截止时间排序
//! 5. 构建课程分区

use std::sync::Arc;

use tracing::{debug, info};

use crate::clients::CanvasClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Course, CourseSection};
use crate::services::{
    order_by_due, DisplayTreeBuilder, DisplayZone, EligibilityFilter, SubmissionClassifier,
};
use crate::workflow::student_ctx::StudentCtx;

/// 单门课程的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOutcome {
    /// 构建好的课程分区
    pub section: CourseSection,
    /// 拉取到的作业总数
    pub fetched: usize,
    /// 通过开放窗口过滤的数量
    pub eligible: usize,
}

/// 课程处理流程
///
/// - 编排单门课程从请求到渲染的完整流程
/// - 不持有面板，只返回构建好的分区
/// - 所有中间结果都是本次调用内的局部变量
#[derive(Clone)]
pub struct CourseFlow {
    client: CanvasClient,
    eligibility: EligibilityFilter,
    classifier: Arc<SubmissionClassifier>,
    builder: DisplayTreeBuilder,
    verbose_logging: bool,
}

impl CourseFlow {
    /// 创建新的课程处理流程
    pub fn new(config: &Config, client: CanvasClient) -> Self {
        Self {
            eligibility: EligibilityFilter::new(config.window_policy),
            classifier: Arc::new(SubmissionClassifier::new(
                client.clone(),
                config.submission_concurrency,
            )),
            builder: DisplayTreeBuilder::new(DisplayZone::from_config(config)),
            client,
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn builder(&self) -> &DisplayTreeBuilder {
        &self.builder
    }

    pub async fn run(&self, ctx: &StudentCtx, course: &Course) -> AppResult<CourseOutcome> {
        let student = ctx.student.id;

        // ========== 1. 拉取作业 ==========
        let assignments = self
            .client
            .fetch_assignments(student, course.id, &ctx.cancel)
            .await?;
        let fetched = assignments.len();

        // ========== 2. 开放窗口过滤 ==========
        let eligible = self.eligibility.filter(assignments, ctx.now);
        let eligible_count = eligible.len();
        debug!(
            "{} 课程 {}: {} 个作业中 {} 个处于开放窗口",
            ctx, course.id, fetched, eligible_count
        );

        // ========== 3. 提交状态分类 ==========
        let unsubmitted = self
            .classifier
            .classify(eligible, student, course.id, &ctx.cancel)
            .await?;

        // ========== 4. 排序 ==========
        let ordered = order_by_due(unsubmitted);

        if self.verbose_logging {
            for a in &ordered {
                info!("{}   {} → {} (截止 {:?})", ctx, course.name, a.name, a.due_at);
            }
        }

        // ========== 5. 构建分区 ==========
        let section = self.builder.build_section(course, &ordered);

        Ok(CourseOutcome {
            section,
            fetched,
            eligible: eligible_count,
        })
    }
}
