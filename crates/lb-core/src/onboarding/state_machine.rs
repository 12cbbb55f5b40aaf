//! Onboarding state machine.
//!
//! Defines a pure state transition function for the onboarding selection flow.

use serde::{Deserialize, Serialize};

use super::OnboardingStep;
use crate::selection::SelectionCategory;

/// Events that drive the onboarding flow.
///
/// 驱动入门引导流程的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingEvent {
    /// User presses "continue" with `selected` items picked on the current step.
    ///
    /// 用户在当前步骤点击“继续”。
    Advance { selected: usize },
    /// User presses "skip". Bypasses the gate.
    ///
    /// 用户点击“跳过”，不检查完成条件。
    Skip,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingAction {
    /// Save the step's final selection set before navigating.
    ///
    /// 导航前保存当前步骤的最终选择。
    PersistSelection { category: SelectionCategory },
    /// Record forward progress on the profile.
    ///
    /// 在用户资料上记录前进进度。
    RecordStep { step: OnboardingStep },
    /// Atomically set `onboarding_complete` and step `complete`.
    ///
    /// 原子地标记入门引导完成。
    MarkComplete,
}

/// Pure onboarding state machine.
///
/// 纯状态机：不包含副作用。
pub struct OnboardingStateMachine;

impl OnboardingStateMachine {
    pub fn transition(
        state: OnboardingStep,
        event: OnboardingEvent,
    ) -> (OnboardingStep, Vec<OnboardingAction>) {
        match (state, event) {
            (OnboardingStep::Complete, _) => (OnboardingStep::Complete, Vec::new()),
            (OnboardingStep::DealBreakers, OnboardingEvent::Advance { selected }) => {
                if !SelectionCategory::DealBreakers.gate_allows(selected) {
                    return (state, Vec::new());
                }
                (
                    OnboardingStep::Complete,
                    vec![
                        OnboardingAction::PersistSelection {
                            category: SelectionCategory::DealBreakers,
                        },
                        OnboardingAction::MarkComplete,
                    ],
                )
            }
            (OnboardingStep::DealBreakers, OnboardingEvent::Skip) => {
                (OnboardingStep::Complete, vec![OnboardingAction::MarkComplete])
            }
            (step, OnboardingEvent::Advance { selected }) => {
                let (Some(category), Some(next)) = (step.category(), step.next()) else {
                    return (step, Vec::new());
                };
                if !category.gate_allows(selected) {
                    return (step, Vec::new());
                }
                (
                    next,
                    vec![
                        OnboardingAction::PersistSelection { category },
                        OnboardingAction::RecordStep { step: next },
                    ],
                )
            }
            (step, OnboardingEvent::Skip) => match step.next() {
                Some(next) => (next, vec![OnboardingAction::RecordStep { step: next }]),
                None => (step, Vec::new()),
            },
        }
    }
}
