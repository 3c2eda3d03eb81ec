//! 开放窗口过滤 - 业务能力层
//!
//! 只负责判断"作业当前是否处于开放窗口"，不发请求

use crate::error::ConfigError;
use crate::models::Assignment;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// 开放窗口策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPolicy {
    /// 只要求已解锁（旧版行为，没有截止时间上界）
    UnlockOnly,
    /// 要求有截止时间、已解锁且尚未截止
    #[default]
    UnlockAndDue,
}

impl FromStr for WindowPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "unlock-only" => Ok(WindowPolicy::UnlockOnly),
            "unlock-and-due" => Ok(WindowPolicy::UnlockAndDue),
            other => Err(ConfigError::invalid(
                "window_policy",
                format!("未知策略 {:?}，可选 unlock-only / unlock-and-due", other),
            )),
        }
    }
}

/// 开放窗口过滤器
///
/// 解锁时间为空时视为早已解锁
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityFilter {
    policy: WindowPolicy,
}

impl EligibilityFilter {
    pub fn new(policy: WindowPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> WindowPolicy {
        self.policy
    }

    /// 判断单个作业
    pub fn is_eligible(&self, assignment: &Assignment, now: DateTime<Utc>) -> bool {
        let unlocked = assignment.unlock_at.map_or(true, |unlock| unlock < now);

        match self.policy {
            WindowPolicy::UnlockOnly => unlocked,
            WindowPolicy::UnlockAndDue => match assignment.due_at {
                Some(due) => unlocked && due > now,
                None => false,
            },
        }
    }

    /// 过滤作业列表，保持原有相对顺序
    pub fn filter(&self, assignments: Vec<Assignment>, now: DateTime<Utc>) -> Vec<Assignment> {
        assignments
            .into_iter()
            .filter(|a| self.is_eligible(a, now))
            .collect()
    }
}
