use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use super::{Dom, Selector};

/// Animation speed; the named speeds use the usual 200/400/600 ms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Fast,
    Normal,
    Slow,
    Millis(u64),
}

impl Speed {
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::Fast => Duration::from_millis(200),
            Self::Normal => Duration::from_millis(400),
            Self::Slow => Duration::from_millis(600),
            Self::Millis(ms) => Duration::from_millis(ms),
        }
    }
}

impl FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fast" => Ok(Self::Fast),
            "normal" => Ok(Self::Normal),
            "slow" => Ok(Self::Slow),
            other => other
                .parse::<u64>()
                .map(Self::Millis)
                .map_err(|_| format!("invalid animation speed `{other}`")),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => f.write_str("fast"),
            Self::Normal => f.write_str("normal"),
            Self::Slow => f.write_str("slow"),
            Self::Millis(ms) => write!(f, "{ms}"),
        }
    }
}

/// Visibility transition strategy.
///
/// `Slide` hides and shows at the same time; `Fade` fades the outgoing
/// content out and only then fades the incoming content in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    None,
    Slide(Speed),
    Fade(Speed),
}

impl Animation {
    /// Length of one phase of the transition
    #[must_use]
    pub fn phase(self) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Slide(speed) | Self::Fade(speed) => speed.duration(),
        }
    }

    /// Length of an out-then-in transition
    #[must_use]
    pub fn swap(self) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Slide(speed) => speed.duration(),
            Self::Fade(speed) => speed.duration() * 2,
        }
    }
}

impl FromStr for Animation {
    type Err = String;

    /// `none`, `slide`, `fade`, optionally with a speed: `fade:fast`, `slide:250`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, speed) = match s.trim().split_once(':') {
            Some((kind, speed)) => (kind, Some(speed.parse::<Speed>()?)),
            None => (s.trim(), None),
        };

        match kind {
            "none" if speed.is_none() => Ok(Self::None),
            "slide" => Ok(Self::Slide(speed.unwrap_or(Speed::Slow))),
            "fade" => Ok(Self::Fade(speed.unwrap_or(Speed::Fast))),
            other => Err(format!("invalid animation `{other}`")),
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Slide(speed) => write!(f, "slide:{speed}"),
            Self::Fade(speed) => write!(f, "fade:{speed}"),
        }
    }
}

/// A CSS class forced on or off alongside a row replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassToggle {
    pub class: String,
    pub enabled: bool,
}

/// One declarative mutation of the page
#[derive(Debug, Clone, PartialEq)]
pub enum DomPatch {
    Append {
        target: Selector,
        html: String,
    },
    InsertBeforeFirst {
        target: Selector,
        html: String,
    },
    ReplaceRow {
        target: Selector,
        index: usize,
        html: String,
        class: Option<ClassToggle>,
        animation: Animation,
    },
    Clear {
        target: Selector,
    },
    SetText {
        target: Selector,
        text: String,
    },
    SetVisible {
        target: Selector,
        visible: bool,
        animation: Animation,
    },
    SwapVisibility {
        hide: Selector,
        show: Selector,
        animation: Animation,
    },
}

impl DomPatch {
    /// The container this patch mutates, used to serialize patches per container
    #[must_use]
    pub fn container(&self) -> String {
        match self {
            Self::Append { target, .. }
            | Self::InsertBeforeFirst { target, .. }
            | Self::ReplaceRow { target, .. }
            | Self::Clear { target }
            | Self::SetText { target, .. }
            | Self::SetVisible { target, .. } => target.to_string(),
            Self::SwapVisibility { hide, show, .. } => {
                let (a, b) = if hide <= show { (hide, show) } else { (show, hide) };
                format!("{a}|{b}")
            }
        }
    }

    /// Row this patch is confined to, if any
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::ReplaceRow { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// How long the container stays busy once this patch has been applied
    #[must_use]
    pub fn busy_for(&self) -> Duration {
        match self {
            Self::ReplaceRow { animation, .. } | Self::SwapVisibility { animation, .. } => {
                animation.swap()
            }
            Self::SetVisible { animation, .. } => animation.phase(),
            _ => Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingTarget(Selector),
    RowOutOfRange { index: usize, rows: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget(selector) => write!(f, "no element matches {selector}"),
            Self::RowOutOfRange { index, rows } => {
                write!(f, "row {index} is out of range ({rows} rows)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    Skipped(SkipReason),
}

impl PatchOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

fn matched(found: bool, target: &Selector) -> PatchOutcome {
    if found {
        PatchOutcome::Applied
    } else {
        PatchOutcome::Skipped(SkipReason::MissingTarget(target.clone()))
    }
}

/// Apply one patch. Missing targets and out-of-range rows are no-ops.
pub fn apply<D: Dom + ?Sized>(dom: &mut D, patch: &DomPatch) -> PatchOutcome {
    let outcome = match patch {
        DomPatch::Append { target, html } => matched(dom.append_html(target, html), target),
        DomPatch::InsertBeforeFirst { target, html } => {
            matched(dom.insert_before_first(target, html), target)
        }
        DomPatch::ReplaceRow {
            target,
            index,
            html,
            class,
            animation,
        } => match dom.row_count(target) {
            None => PatchOutcome::Skipped(SkipReason::MissingTarget(target.clone())),
            Some(rows) if *index >= rows => PatchOutcome::Skipped(SkipReason::RowOutOfRange {
                index: *index,
                rows,
            }),
            Some(_) => {
                dom.replace_row(target, *index, html, *animation);
                if let Some(toggle) = class {
                    dom.set_row_class(target, *index, &toggle.class, toggle.enabled);
                }
                PatchOutcome::Applied
            }
        },
        DomPatch::Clear { target } => matched(dom.clear(target), target),
        DomPatch::SetText { target, text } => matched(dom.set_text(target, text), target),
        DomPatch::SetVisible {
            target,
            visible,
            animation,
        } => matched(dom.set_visible(target, *visible, *animation) > 0, target),
        DomPatch::SwapVisibility {
            hide,
            show,
            animation,
        } => {
            let hidden = dom.set_visible(hide, false, *animation);
            let shown = dom.set_visible(show, true, *animation);
            match (hidden, shown) {
                (0, 0) => PatchOutcome::Skipped(SkipReason::MissingTarget(show.clone())),
                _ => PatchOutcome::Applied,
            }
        }
    };

    if let PatchOutcome::Skipped(reason) = &outcome {
        debug!("Skipped patch on {}: {}", patch.container(), reason);
    }

    outcome
}
