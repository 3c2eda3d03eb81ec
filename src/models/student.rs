use serde::Deserialize;
use std::fmt;

/// 学生标识：数字 ID，或代表当前登录用户的 `self`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentId {
    SelfUser,
    Id(u64),
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentId::SelfUser => write!(f, "self"),
            StudentId::Id(id) => write!(f, "{}", id),
        }
    }
}

/// 一条流水线的目标学生
///
/// 只有被观察者（observee）才带显示名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub display_name: Option<String>,
}

impl Student {
    /// 当前登录用户自身
    pub fn myself() -> Self {
        Self {
            id: StudentId::SelfUser,
            display_name: None,
        }
    }

    /// 观察者账号名下的学生
    pub fn observee(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: StudentId::Id(id),
            display_name: Some(name.into()),
        }
    }

    /// 面板标题
    pub fn panel_title(&self) -> String {
        match &self.display_name {
            Some(name) => format!("{}'s Unsubmitted Assignments", name),
            None => "My Unsubmitted Assignments".to_string(),
        }
    }
}

/// `/users/self/observees` 返回的条目
#[derive(Debug, Clone, Deserialize)]
pub struct Observee {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

impl From<Observee> for Student {
    fn from(observee: Observee) -> Self {
        Student::observee(observee.id, observee.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_titles() {
        assert_eq!(Student::myself().panel_title(), "My Unsubmitted Assignments");
        assert_eq!(
            Student::observee(42, "Ada").panel_title(),
            "Ada's Unsubmitted Assignments"
        );
    }

    #[test]
    fn student_id_renders_for_urls() {
        assert_eq!(StudentId::SelfUser.to_string(), "self");
        assert_eq!(StudentId::Id(1234).to_string(), "1234");
    }
}
