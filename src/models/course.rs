use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 课程
///
/// 被日期限制访问的课程可能不返回 `name`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// 字段出现即为 `Some`，包括显式的 `null`
    #[serde(default, deserialize_with = "present")]
    pub access_restricted_by_date: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Course {
    /// 是否带有访问限制标记（只看字段是否出现，不看取值）
    pub fn is_restricted(&self) -> bool {
        self.access_restricted_by_date.is_some()
    }

    /// 课程页面的相对链接
    pub fn href(&self) -> String {
        format!("/courses/{}", self.id)
    }
}

/// 去掉带访问限制标记的课程，保持原有顺序
pub fn filter_active(courses: Vec<Course>) -> Vec<Course> {
    courses.into_iter().filter(|c| !c.is_restricted()).collect()
}
