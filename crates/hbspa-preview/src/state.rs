//! Preview widget state machine.
//!
//! [`transition`] is pure: it maps the current state and one input to the
//! next state plus the effects the widget must carry out. It never touches
//! storage or rendering itself.

use hbspa_commerce::ProductId;
use serde::{Deserialize, Serialize};

/// Whether the popover is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewState {
    /// Only the trigger (bubble, bar or badge) is visible.
    #[default]
    Closed,
    /// The popover with cart lines is visible and page scroll is locked.
    Open,
}

impl PreviewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewState::Closed => "closed",
            PreviewState::Open => "open",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PreviewState::Open)
    }
}

/// How the trigger was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Pointer,
    Touch,
}

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

/// Per-line controls in the open popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemAction {
    Inc,
    Dec,
    Remove,
}

impl ItemAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemAction::Inc => "inc",
            ItemAction::Dec => "dec",
            ItemAction::Remove => "remove",
        }
    }
}

/// Everything that can happen to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewInput {
    /// Click or tap on the trigger.
    Activate(Activation),
    /// Key press anywhere on the page.
    Key { key: Key, trigger_focused: bool },
    /// The popover's close button.
    CloseButton,
    /// A click that landed outside both trigger and popover.
    OutsideClick,
    /// The "Ver carrito" link was followed.
    FollowCta,
    /// A per-line control in the popover.
    Item { product_id: ProductId, action: ItemAction },
    /// The cart changed somewhere.
    CartChanged,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LockScroll,
    UnlockScroll,
    /// Reload the cart snapshot before rendering.
    Refresh,
    Render,
    Mutate { product_id: ProductId, action: ItemAction },
    Navigate,
}

/// Result of feeding one input to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: PreviewState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: PreviewState) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
        }
    }

    fn open() -> Self {
        Self {
            next: PreviewState::Open,
            effects: vec![Effect::Refresh, Effect::LockScroll, Effect::Render],
        }
    }

    fn close() -> Self {
        Self {
            next: PreviewState::Closed,
            effects: vec![Effect::UnlockScroll, Effect::Render],
        }
    }

    fn toggle(state: PreviewState) -> Self {
        match state {
            PreviewState::Closed => Self::open(),
            PreviewState::Open => Self::close(),
        }
    }
}

/// Compute the next state and effects.
pub fn transition(state: PreviewState, input: &PreviewInput) -> Transition {
    use PreviewState::{Closed, Open};

    match (state, input) {
        (_, PreviewInput::Activate(_)) => Transition::toggle(state),
        (
            _,
            PreviewInput::Key {
                key: Key::Enter | Key::Space,
                trigger_focused: true,
            },
        ) => Transition::toggle(state),
        (Open, PreviewInput::Key { key: Key::Escape, .. }) => Transition::close(),
        (Open, PreviewInput::CloseButton | PreviewInput::OutsideClick) => Transition::close(),
        (Open, PreviewInput::FollowCta) => {
            let mut t = Transition::close();
            t.effects.push(Effect::Navigate);
            t
        }
        (Closed, PreviewInput::FollowCta) => Transition {
            next: Closed,
            effects: vec![Effect::Navigate],
        },
        (Open, PreviewInput::Item { product_id, action }) => Transition {
            next: Open,
            effects: vec![Effect::Mutate {
                product_id: product_id.clone(),
                action: *action,
            }],
        },
        (_, PreviewInput::CartChanged) => Transition {
            next: state,
            effects: vec![Effect::Render],
        },
        _ => Transition::stay(state),
    }
}
