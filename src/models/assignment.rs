use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 作业
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: u64,
    pub course_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unlock_at: Option<DateTime<Utc>>,
    /// 分类阶段附加的提交记录
    #[serde(skip)]
    pub submission: Option<Submission>,
}

impl Assignment {
    /// 附加提交记录，只在分类阶段调用一次
    pub fn with_submission(mut self, submission: Submission) -> Self {
        self.submission = Some(submission);
        self
    }

    /// 是否仍未提交
    pub fn is_unsubmitted(&self) -> bool {
        self.submission
            .as_ref()
            .map(Submission::is_unsubmitted)
            .unwrap_or(false)
    }
}

/// 提交记录，只关心 `workflow_state`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Submission {
    #[serde(default)]
    pub workflow_state: String,
}

impl Submission {
    pub const UNSUBMITTED: &'static str = "unsubmitted";

    pub fn is_unsubmitted(&self) -> bool {
        self.workflow_state == Self::UNSUBMITTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nullable_timestamps() {
        let a: Assignment = serde_json::from_str(
            r#"{"id": 7, "course_id": 3, "name": "Essay",
                "html_url": "https://x/courses/3/assignments/7",
                "due_at": null, "unlock_at": "2026-10-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert!(a.due_at.is_none());
        assert!(a.unlock_at.is_some());
        assert!(a.submission.is_none());
        assert!(!a.is_unsubmitted());
    }

    #[test]
    fn only_unsubmitted_state_counts() {
        for (state, expected) in [
            ("unsubmitted", true),
            ("submitted", false),
            ("graded", false),
            ("pending_review", false),
            ("Unsubmitted", false),
        ] {
            let s = Submission {
                workflow_state: state.to_string(),
            };
            assert_eq!(s.is_unsubmitted(), expected, "state {}", state);
        }
    }
}
