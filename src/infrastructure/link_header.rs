//! 分页头解析
//!
//! `<https://host/api/v1/courses?page=2&per_page=10>; rel="next", <...>; rel="last"`

use crate::error::HeaderParseError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static LINK_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*<([^>]+)>.*rel="([^"]+)""#).expect("分页头正则无效")
});

/// 分页关系集合：关系名 → 地址
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRelationSet {
    relations: HashMap<String, String>,
}

impl PageRelationSet {
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.relations.get(rel).map(String::as_str)
    }

    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }

    pub fn current(&self) -> Option<&str> {
        self.get("current")
    }

    pub fn last(&self) -> Option<&str> {
        self.get("last")
    }

    /// 旧版的终止信号：`current` 与 `last` 相同
    pub fn is_last_page(&self) -> bool {
        matches!((self.current(), self.last()), (Some(c), Some(l)) if c == l)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn relation_names(&self) -> impl Iterator<Item = &str> {
        self.relations.keys().map(String::as_str)
    }
}

/// 解析分页头
///
/// # 参数
/// - `header`: 分页头原始值，没有分页头时为 `None`
///
/// # 返回
/// 没有分页头时返回空集合；任何一个片段不符合 `<url>; rel="name"` 时返回错误
pub fn parse_link_header(header: Option<&str>) -> Result<PageRelationSet, HeaderParseError> {
    let mut set = PageRelationSet::default();

    let Some(header) = header else {
        return Ok(set);
    };

    for segment in header.split(',') {
        if segment.trim().is_empty() {
            continue;
        }

        let caps = LINK_SEGMENT.captures(segment).ok_or_else(|| HeaderParseError {
            segment: segment.trim().to_string(),
        })?;

        set.relations
            .insert(caps[2].to_string(), caps[1].to_string());
    }

    Ok(set)
}
