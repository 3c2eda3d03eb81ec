//! 学生流水线上下文
//!
//! 封装"我正在为哪个学生、以哪个时刻为准、在哪个面板槽位上工作"这一信息

use crate::models::Student;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use tokio_util::sync::CancellationToken;

/// 学生流水线上下文
///
/// 每条流水线独占一份，流水线之间不共享任何可变状态
#[derive(Debug, Clone)]
pub struct StudentCtx {
    /// 目标学生
    pub student: Student,

    /// 面板槽位（仅用于日志显示和宿主面板定位）
    pub slot: usize,

    /// 开放窗口的参考时刻，在流水线开始时确定
    pub now: DateTime<Utc>,

    /// 本流水线的取消信号
    pub cancel: CancellationToken,
}

impl StudentCtx {
    /// 创建新的学生上下文
    pub fn new(student: Student, slot: usize, now: DateTime<Utc>, cancel: CancellationToken) -> Self {
        Self {
            student,
            slot,
            now,
            cancel,
        }
    }
}

impl Display for StudentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.student.display_name {
            Some(name) => write!(f, "[学生 #{} {} ({})]", self.slot, name, self.student.id),
            None => write!(f, "[学生 #{} {}]", self.slot, self.student.id),
        }
    }
}
