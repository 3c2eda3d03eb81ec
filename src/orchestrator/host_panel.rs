//! 宿主面板
//!
//! 宿主持有整棵渲染树；每条流水线只拿到一个绑定到自己槽位的 `PanelWriter`，
//! 通过通道提交整体重建的节点，因此两条流水线永远不会写同一个节点，也不需要锁。

use crate::models::{CourseSection, PanelNode};
use std::collections::BTreeMap;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// 流水线提交给宿主的更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelUpdate {
    /// 创建学生面板
    PanelCreated { slot: usize, panel: PanelNode },
    /// 挂上（或整体替换）第 `index` 个课程分区
    SectionAttached {
        slot: usize,
        index: usize,
        section: CourseSection,
    },
}

/// 创建 `PanelWriter` 的入口，由编排器持有
#[derive(Clone)]
pub struct PanelSink {
    tx: UnboundedSender<PanelUpdate>,
}

impl PanelSink {
    /// 为某个槽位创建写入端，每个槽位只应创建一次
    pub fn writer(&self, slot: usize) -> PanelWriter {
        PanelWriter {
            slot,
            tx: self.tx.clone(),
        }
    }
}

/// 单条流水线独占的写入端
pub struct PanelWriter {
    slot: usize,
    tx: UnboundedSender<PanelUpdate>,
}

impl PanelWriter {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn create_panel(&self, panel: PanelNode) {
        self.send(PanelUpdate::PanelCreated {
            slot: self.slot,
            panel,
        });
    }

    pub fn attach_section(&self, index: usize, section: CourseSection) {
        self.send(PanelUpdate::SectionAttached {
            slot: self.slot,
            index,
            section,
        });
    }

    fn send(&self, update: PanelUpdate) {
        // 宿主已经卸载时静默丢弃
        if self.tx.send(update).is_err() {
            debug!("宿主面板已关闭，丢弃槽位 {} 的更新", self.slot);
        }
    }
}

#[derive(Debug, Default)]
struct SlotState {
    title: String,
    sections: BTreeMap<usize, CourseSection>,
}

/// 宿主面板
pub struct HostPanel {
    rx: UnboundedReceiver<PanelUpdate>,
    slots: BTreeMap<usize, SlotState>,
}

impl HostPanel {
    /// 创建宿主面板以及对应的写入入口
    pub fn channel() -> (PanelSink, HostPanel) {
        let (tx, rx) = unbounded_channel();
        (
            PanelSink { tx },
            HostPanel {
                rx,
                slots: BTreeMap::new(),
            },
        )
    }

    /// 应用一条更新
    pub fn apply(&mut self, update: PanelUpdate) {
        match update {
            PanelUpdate::PanelCreated { slot, panel } => {
                let state = self.slots.entry(slot).or_default();
                state.title = panel.title;
                for (index, section) in panel.sections.into_iter().enumerate() {
                    state.sections.insert(index, section);
                }
            }
            PanelUpdate::SectionAttached {
                slot,
                index,
                section,
            } => match self.slots.get_mut(&slot) {
                Some(state) => {
                    state.sections.insert(index, section);
                }
                None => warn!("槽位 {} 尚未创建面板，忽略课程分区 {}", slot, index),
            },
        }
    }

    /// 应用所有已到达的更新，不等待
    pub fn drain_pending(&mut self) {
        while let Ok(update) = self.rx.try_recv() {
            self.apply(update);
        }
    }

    /// 持续应用更新，直到所有写入端都被释放
    pub async fn collect(mut self) -> Vec<PanelNode> {
        while let Some(update) = self.rx.recv().await {
            self.apply(update);
        }
        self.snapshot()
    }

    /// 当前渲染树，按槽位顺序
    pub fn snapshot(&self) -> Vec<PanelNode> {
        self.slots
            .values()
            .map(|state| PanelNode {
                title: state.title.clone(),
                sections: state.sections.values().cloned().collect(),
            })
            .collect()
    }
}
