//! # Canvas Unsubmitted
//!
//! 为学习平台页面生成"未提交作业"面板：分页拉取课程、作业、提交记录和被观察者，
//! 按学生、按课程整理出当前开放且尚未提交的作业。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 客户端），只暴露能力
//! - `Transport` - GET 请求接口，`HttpTransport` 为 reqwest 实现
//! - `PageWalker` - 沿分页头逐页前进的只进遍历器
//! - `clients/CanvasClient` - 接口地址拼接与带类型的请求
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `EligibilityFilter` - 开放窗口过滤
//! - `SubmissionClassifier` - 提交状态分类（并发上限可配置）
//! - `order_by_due` - 按截止时间稳定排序
//! - `DisplayTreeBuilder` - 渲染模型构建
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一门课程"的完整处理流程
//! - `StudentCtx` - 上下文封装（学生 + 参考时刻 + 取消信号）
//! - `CourseFlow` - 流程编排（作业 → 过滤 → 分类 → 排序 → 分区）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/panel_orchestrator` - 学生发现与流水线扇出
//! - `orchestrator/student_pipeline` - 单个学生流水线，遍历课程列表
//! - `orchestrator/host_panel` - 宿主面板（各流水线只写自己的子树）
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::CanvasClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{HttpTransport, PageWalker, RawResponse, Transport};
pub use models::{Assignment, Course, DisplayNode, PanelNode, Student, StudentId, Submission};
pub use orchestrator::{HostPanel, PanelOrchestrator, PipelineHandle, RunReport};
pub use services::WindowPolicy;
pub use workflow::{CourseFlow, StudentCtx};
