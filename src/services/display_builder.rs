//! 渲染模型构建 - 业务能力层
//!
//! 纯函数：(学生 / 课程, 已排序作业) → 渲染节点。不发请求，不持有状态。

use crate::config::Config;
use crate::models::{Assignment, AssignmentRow, Course, CourseSection, PanelNode, Student};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Timelike, Utc};

/// 截止时间显示所用的时区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    /// 本机时区
    Local,
    /// 固定 UTC 偏移
    Fixed(FixedOffset),
}

impl DisplayZone {
    pub fn from_config(config: &Config) -> Self {
        config
            .display_utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
            .map(DisplayZone::Fixed)
            .unwrap_or(DisplayZone::Local)
    }

    fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).naive_local(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

/// 渲染模型构建器
#[derive(Debug, Clone, Copy)]
pub struct DisplayTreeBuilder {
    zone: DisplayZone,
}

impl DisplayTreeBuilder {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    /// 学生面板（只有标题，课程分区随后追加）
    pub fn build_panel(&self, student: &Student) -> PanelNode {
        PanelNode::new(student.panel_title())
    }

    /// 课程流程开始前先挂上的隐藏分区，用于保持课程顺序
    pub fn placeholder(&self, course: &Course) -> CourseSection {
        self.build_section(course, &[])
    }

    /// 课程分区，只有存在作业时才可见
    pub fn build_section(&self, course: &Course, assignments: &[Assignment]) -> CourseSection {
        CourseSection {
            course_id: course.id,
            name: course.name.clone(),
            href: course.href(),
            visible: !assignments.is_empty(),
            rows: assignments.iter().map(|a| self.build_row(a)).collect(),
        }
    }

    pub fn build_row(&self, assignment: &Assignment) -> AssignmentRow {
        AssignmentRow {
            name: assignment.name.clone(),
            href: assignment.html_url.clone(),
            subtitle: match assignment.due_at {
                Some(due) => self.format_due(due),
                None => "No due date".to_string(),
            },
            due_key: assignment.due_at.map(|d| d.to_rfc3339()),
        }
    }

    /// `Due on Tue Oct 20 2026 at 1:05 PM`
    ///
    /// 24 小时制转 12 小时制：0 点显示 12，13–23 点减 12；分钟补足两位
    pub fn format_due(&self, due: DateTime<Utc>) -> String {
        let local = self.zone.localize(due);
        let hour24 = local.hour();
        let period = if hour24 >= 12 { "PM" } else { "AM" };
        let hour = match hour24 {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };

        format!(
            "Due on {} at {}:{:02} {}",
            local.format("%a %b %d %Y"),
            hour,
            local.minute(),
            period
        )
    }
}

impl Default for DisplayTreeBuilder {
    fn default() -> Self {
        Self::new(DisplayZone::Local)
    }
}
