//! 单个学生流水线 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个学生的所有课程，是学生级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **创建面板**：向宿主挂上本学生的面板标题
//! 2. **拉取课程**：分页拉取全部课程，去掉带访问限制标记的课程
//! 3. **占位分区**：按课程顺序先挂上隐藏分区
//! 4. **流程调度**：按并发上限运行 `CourseFlow`，完成一门替换一门
//! 5. **统计输出**：记录课程数、可见分区数、作业行数、失败数

use crate::clients::CanvasClient;
use crate::error::{AppError, AppResult};
use crate::models::filter_active;
use crate::orchestrator::host_panel::PanelWriter;
use crate::workflow::{CourseFlow, StudentCtx};
use futures::stream::{self, StreamExt};
use tracing::{error, info};

/// 学生流水线统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    /// 参与处理的课程数（已去掉受限课程）
    pub courses: usize,
    /// 因访问限制被跳过的课程数
    pub restricted: usize,
    /// 可见的课程分区数
    pub visible_sections: usize,
    /// 作业行总数
    pub rows: usize,
    /// 处理失败的课程数（分区保持隐藏）
    pub failed_courses: usize,
}

/// 单个学生流水线
#[derive(Clone)]
pub struct StudentPipeline {
    client: CanvasClient,
    flow: CourseFlow,
    max_concurrent_courses: usize,
}

impl StudentPipeline {
    pub fn new(client: CanvasClient, flow: CourseFlow, max_concurrent_courses: usize) -> Self {
        Self {
            client,
            flow,
            max_concurrent_courses: max_concurrent_courses.max(1),
        }
    }

    /// 处理单个学生
    ///
    /// # 参数
    /// - `ctx`: 学生上下文（含取消信号）
    /// - `writer`: 本流水线独占的面板写入端
    ///
    /// # 返回
    /// 课程拉取失败或被取消时返回错误；单门课程失败只计入统计
    pub async fn run(&self, ctx: &StudentCtx, writer: &PanelWriter) -> AppResult<PipelineStats> {
        info!("{} 开始处理", ctx);

        let builder = self.flow.builder();
        writer.create_panel(builder.build_panel(&ctx.student));

        // ========== 拉取并过滤课程 ==========
        let all_courses = self
            .client
            .fetch_courses(ctx.student.id, &ctx.cancel)
            .await?;
        let total = all_courses.len();
        let courses = filter_active(all_courses);

        let mut stats = PipelineStats {
            courses: courses.len(),
            restricted: total - courses.len(),
            ..Default::default()
        };
        info!(
            "{} 找到 {} 门课程 (跳过 {} 门受限课程)",
            ctx, stats.courses, stats.restricted
        );

        // 先按课程顺序挂上隐藏分区，保持布局
        for (index, course) in courses.iter().enumerate() {
            writer.attach_section(index, builder.placeholder(course));
        }

        // ========== 课程子流程 ==========
        let flow = &self.flow;
        let mut outcomes = stream::iter(courses.into_iter().enumerate())
            .map(|(index, course)| async move {
                let result = flow.run(ctx, &course).await;
                (index, course, result)
            })
            .buffer_unordered(self.max_concurrent_courses);

        while let Some((index, course, result)) = outcomes.next().await {
            match result {
                Ok(outcome) => {
                    if outcome.section.visible {
                        stats.visible_sections += 1;
                    }
                    stats.rows += outcome.section.rows.len();
                    info!(
                        "{} ✓ {}: {} 个作业, {} 个开放, {} 个未提交",
                        ctx,
                        course.name,
                        outcome.fetched,
                        outcome.eligible,
                        outcome.section.rows.len()
                    );
                    writer.attach_section(index, outcome.section);
                }
                Err(AppError::Cancelled) => {
                    info!("{} 已取消", ctx);
                    return Err(AppError::Cancelled);
                }
                Err(e) => {
                    // 失败的课程分区保持隐藏
                    stats.failed_courses += 1;
                    error!("{} ❌ 课程 {} 处理失败: {}", ctx, course.name, e);
                }
            }
        }

        log_student_complete(ctx, &stats);

        Ok(stats)
    }
}

// ========== 日志辅助函数 ==========

fn log_student_complete(ctx: &StudentCtx, stats: &PipelineStats) {
    info!(
        "{} 课程统计: 可见 {}, 作业 {}, 失败 {}, 总计 {}",
        ctx, stats.visible_sections, stats.rows, stats.failed_courses, stats.courses
    );
    info!("{} ✅ 学生处理完成", ctx);
}
