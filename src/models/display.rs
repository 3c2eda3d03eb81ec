//! 渲染模型
//!
//! 面板 → 课程分区 → 作业行。纯派生数据，每次流程完成时整体重建，不做局部修改。

use serde::Serialize;
use std::fmt::Write;

/// 渲染节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayNode {
    Panel(PanelNode),
    CourseSection(CourseSection),
    AssignmentRow(AssignmentRow),
}

/// 一个学生的面板
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelNode {
    pub title: String,
    pub sections: Vec<CourseSection>,
}

/// 一门课程的分区
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSection {
    pub course_id: u64,
    pub name: String,
    pub href: String,
    /// 没有待提交作业时分区仍然存在，但保持隐藏
    pub visible: bool,
    pub rows: Vec<AssignmentRow>,
}

/// 一条作业
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRow {
    pub name: String,
    pub href: String,
    /// `Due on Tue Oct 20 2026 at 1:05 PM`
    pub subtitle: String,
    /// 原始截止时间（RFC 3339），作为行的排序/样式键
    pub due_key: Option<String>,
}

impl PanelNode {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn visible_sections(&self) -> impl Iterator<Item = &CourseSection> {
        self.sections.iter().filter(|s| s.visible)
    }
}

impl DisplayNode {
    pub fn children(&self) -> Vec<DisplayNode> {
        match self {
            DisplayNode::Panel(panel) => panel
                .sections
                .iter()
                .cloned()
                .map(DisplayNode::CourseSection)
                .collect(),
            DisplayNode::CourseSection(section) => section
                .rows
                .iter()
                .cloned()
                .map(DisplayNode::AssignmentRow)
                .collect(),
            DisplayNode::AssignmentRow(_) => Vec::new(),
        }
    }

    /// 以缩进文本输出，隐藏的分区不输出
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            DisplayNode::Panel(panel) => {
                let _ = writeln!(out, "{}{}", indent, panel.title);
            }
            DisplayNode::CourseSection(section) => {
                if !section.visible {
                    return;
                }
                let _ = writeln!(out, "{}{} ({})", indent, section.name, section.href);
            }
            DisplayNode::AssignmentRow(row) => {
                let _ = writeln!(out, "{}- {} <{}>", indent, row.name, row.href);
                let _ = writeln!(out, "{}  {}", indent, row.subtitle);
                return;
            }
        }
        for child in self.children() {
            child.render_into(out, depth + 1);
        }
    }
}
