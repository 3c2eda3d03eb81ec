//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责扇出和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `panel_orchestrator` - 面板编排器
//! - 查询被观察者，确定目标学生
//! - 每个学生启动一条独立流水线（tokio::spawn）
//! - 持有根取消信号，每条流水线一个子信号
//!
//! ### `student_pipeline` - 单个学生流水线
//! - 拉取课程、去掉受限课程
//! - 按并发上限运行每门课程的 `CourseFlow`
//! - 通过自己的 `PanelWriter` 挂上课程分区
//!
//! ### `host_panel` - 宿主面板
//! - 持有整棵渲染树，通过通道接收各流水线的更新
//!
//! ### `readiness` - 宿主就绪等待
//!
//! ## 层次关系
//!
//! ```text
//! panel_orchestrator (处理 Vec<Student>)
//!     ↓
//! student_pipeline (处理 Vec<Course>)
//!     ↓
//! workflow::CourseFlow (处理单门课程)
//!     ↓
//! services (能力层：eligibility / classifier / orderer / display)
//!     ↓
//! clients / infrastructure (CanvasClient / PageWalker / Transport)
//! ```

pub mod host_panel;
pub mod panel_orchestrator;
pub mod readiness;
pub mod student_pipeline;

// 重新导出主要类型
pub use host_panel::{HostPanel, PanelSink, PanelUpdate, PanelWriter};
pub use panel_orchestrator::{PanelOrchestrator, PipelineHandle, PipelineOutcome, RunReport};
pub use readiness::{wait_until_ready, DetachedHost, HostPage, Readiness};
pub use student_pipeline::{PipelineStats, StudentPipeline};
